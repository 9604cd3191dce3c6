//! Résumé data model shared by both engines

pub mod lenient;
pub mod profession;
pub mod profile;
pub mod resume;
pub mod section;
pub mod skills;

pub use profession::{Profession, ProfessionTable};
pub use profile::{Degree, EffectiveProfile, ExperienceLevel, FocusArea, LevelBand, UserProfile};
pub use resume::ResumeData;
pub use section::SectionId;
pub use skills::{normalize_skills, SkillCategory, SkillItem, Skills};
