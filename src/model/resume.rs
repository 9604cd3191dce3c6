//! Résumé document as persisted by the builder

use crate::model::lenient;
use crate::model::skills::{normalize_skills, SkillItem, Skills};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeData {
    pub personal_info: PersonalInfo,
    #[serde(deserialize_with = "lenient::string")]
    pub summary: String,
    #[serde(deserialize_with = "lenient::seq")]
    pub experience: Vec<ExperienceEntry>,
    #[serde(deserialize_with = "lenient::seq")]
    pub education: Vec<EducationEntry>,
    #[serde(deserialize_with = "skills_or_default")]
    pub skills: Skills,
    #[serde(deserialize_with = "lenient::seq")]
    pub certifications: Vec<CertificationEntry>,
    #[serde(deserialize_with = "lenient::seq")]
    pub projects: Vec<ProjectEntry>,
    #[serde(deserialize_with = "lenient::seq")]
    pub achievements: Vec<AchievementEntry>,
    #[serde(deserialize_with = "lenient::seq")]
    pub publications: Vec<PublicationEntry>,
    #[serde(deserialize_with = "lenient::seq")]
    pub licenses: Vec<LicenseEntry>,
    #[serde(deserialize_with = "lenient::seq")]
    pub portfolio: Vec<PortfolioEntry>,
    /// Every unrecognized key, `custom_*` sections included, kept verbatim for the renderer
    #[serde(flatten)]
    pub custom_sections: BTreeMap<String, serde_json::Value>,
}

impl ResumeData {
    /// Skills flattened to items, whatever shape they were stored in
    pub fn skill_items(&self) -> Vec<SkillItem> {
        normalize_skills(&self.skills)
    }

    /// All experience descriptions joined with single spaces
    pub fn experience_text(&self) -> String {
        self.experience
            .iter()
            .map(|exp| exp.description.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    #[serde(deserialize_with = "lenient::string")]
    pub full_name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub email: String,
    #[serde(deserialize_with = "lenient::string")]
    pub phone: String,
    #[serde(deserialize_with = "lenient::string")]
    pub location: String,
    #[serde(deserialize_with = "lenient::string")]
    pub linkedin: String,
    #[serde(deserialize_with = "lenient::string")]
    pub website: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceEntry {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(deserialize_with = "lenient::string")]
    pub job_title: String,
    #[serde(deserialize_with = "lenient::string")]
    pub company: String,
    #[serde(deserialize_with = "lenient::string")]
    pub location: String,
    #[serde(deserialize_with = "lenient::string")]
    pub start_date: String,
    #[serde(deserialize_with = "lenient::string")]
    pub end_date: String,
    #[serde(deserialize_with = "lenient::string")]
    pub description: String,
}

impl ExperienceEntry {
    pub fn is_complete(&self) -> bool {
        !self.job_title.trim().is_empty()
            && !self.company.trim().is_empty()
            && !self.description.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationEntry {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(deserialize_with = "lenient::string")]
    pub degree: String,
    #[serde(deserialize_with = "lenient::string")]
    pub institution: String,
    #[serde(deserialize_with = "lenient::string")]
    pub field_of_study: String,
    #[serde(deserialize_with = "lenient::string")]
    pub location: String,
    #[serde(deserialize_with = "lenient::string")]
    pub start_date: String,
    #[serde(deserialize_with = "lenient::string")]
    pub end_date: String,
    #[serde(deserialize_with = "lenient::string")]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CertificationEntry {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub issuer: String,
    #[serde(deserialize_with = "lenient::string")]
    pub date: String,
    #[serde(deserialize_with = "lenient::string")]
    pub credential_id: String,
    #[serde(deserialize_with = "lenient::string")]
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectEntry {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub description: String,
    #[serde(deserialize_with = "lenient::string")]
    pub technologies: String,
    #[serde(deserialize_with = "lenient::string")]
    pub url: String,
    #[serde(deserialize_with = "lenient::string")]
    pub start_date: String,
    #[serde(deserialize_with = "lenient::string")]
    pub end_date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AchievementEntry {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(deserialize_with = "lenient::string")]
    pub title: String,
    #[serde(deserialize_with = "lenient::string")]
    pub description: String,
    #[serde(deserialize_with = "lenient::string")]
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PublicationEntry {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(deserialize_with = "lenient::string")]
    pub title: String,
    #[serde(deserialize_with = "lenient::string")]
    pub authors: String,
    #[serde(deserialize_with = "lenient::string")]
    pub publisher: String,
    #[serde(deserialize_with = "lenient::string")]
    pub date: String,
    #[serde(deserialize_with = "lenient::string")]
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LicenseEntry {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub issuer: String,
    #[serde(deserialize_with = "lenient::string")]
    pub license_number: String,
    #[serde(deserialize_with = "lenient::string")]
    pub issue_date: String,
    #[serde(deserialize_with = "lenient::string")]
    pub expiry_date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PortfolioEntry {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(deserialize_with = "lenient::string")]
    pub title: String,
    #[serde(deserialize_with = "lenient::string")]
    pub description: String,
    #[serde(deserialize_with = "lenient::string")]
    pub url: String,
}

fn skills_or_default<'de, D>(deserializer: D) -> Result<Skills, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum MaybeSkills {
        Skills(Skills),
        Other(IgnoredAny),
    }

    Ok(match MaybeSkills::deserialize(deserializer)? {
        MaybeSkills::Skills(skills) => skills,
        MaybeSkills::Other(_) => Skills::default(),
    })
}
