//! Section arrangement and résumé scoring

pub mod arrangement;
pub mod ats_keywords;
pub mod explanation;
pub mod length;
pub mod matching;
pub mod scoring;
pub mod weights;

pub use arrangement::{arrange, FALLBACK_ORDER};
pub use ats_keywords::{check_ats_keywords, AtsKeywordResult};
pub use explanation::{explain_arrangement, ArrangementExplanation};
pub use length::{check_resume_length, check_resume_length_with, LengthBounds, LengthResult};
pub use scoring::{score, Feedback, FeedbackCategory, FeedbackType, Grade, ResumeScorer, ScoreResult};
pub use weights::section_weights;
