//! Résumé section arrangement and scoring engine

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod input;
pub mod model;
pub mod output;

pub use config::Config;
pub use engine::{arrange, check_ats_keywords, check_resume_length, explain_arrangement, score, section_weights};
pub use error::{CvEngineError, Result};
pub use export::{build_export_request, ExportRequest};
pub use model::{Profession, ProfessionTable, ResumeData, SectionId, UserProfile};
