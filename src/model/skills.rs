//! Skills section: the legacy grouped lists and the current item list
//!
//! Persisted résumés hold either shape and no migration exists, so both are
//! accepted on input. Consumers call [`normalize_skills`] once and work on
//! the flat item list from there.

use crate::model::lenient;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Proficiency {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
    Expert,
    Master,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillCategory {
    #[default]
    Technical,
    Soft,
    Languages,
    Tools,
    Frameworks,
    #[serde(other)]
    Other,
}

impl SkillCategory {
    /// Hard skills: technical, tools and frameworks
    pub fn is_hard_skill(self) -> bool {
        matches!(
            self,
            SkillCategory::Technical | SkillCategory::Tools | SkillCategory::Frameworks
        )
    }

    /// Counted by completeness and keyword matching; spoken languages are not
    pub fn is_professional(self) -> bool {
        self.is_hard_skill() || self == SkillCategory::Soft
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillItem {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    pub proficiency: Proficiency,
    pub category: SkillCategory,
}

impl SkillItem {
    pub fn new(
        ids: &mut dyn IdSource,
        name: impl Into<String>,
        category: SkillCategory,
        proficiency: Proficiency,
    ) -> Self {
        Self {
            id: ids.next_id("skill"),
            name: name.into(),
            proficiency,
            category,
        }
    }
}

/// Grouped lists used by résumés created before skill items existed
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LegacySkills {
    #[serde(deserialize_with = "lenient::seq")]
    pub technical_skills: Vec<String>,
    #[serde(deserialize_with = "lenient::seq")]
    pub soft_skills: Vec<String>,
    #[serde(deserialize_with = "lenient::seq")]
    pub languages: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Skills {
    Items {
        #[serde(deserialize_with = "lenient::seq")]
        items: Vec<SkillItem>,
    },
    Legacy(LegacySkills),
}

impl Default for Skills {
    fn default() -> Self {
        Skills::Legacy(LegacySkills::default())
    }
}

/// Source of identifiers for skill items created outside persisted data
pub trait IdSource {
    fn next_id(&mut self, prefix: &str) -> String;
}

/// Monotonic counter. Deterministic, so engine output never depends on time.
#[derive(Debug, Clone, Default)]
pub struct SequentialIds {
    next: u64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self, prefix: &str) -> String {
        let id = format!("{}-{}", prefix, self.next);
        self.next += 1;
        id
    }
}

/// Flatten either skills shape into items, dropping blank names
pub fn normalize_skills(raw: &Skills) -> Vec<SkillItem> {
    normalize_skills_with(raw, &mut SequentialIds::new())
}

pub fn normalize_skills_with(raw: &Skills, ids: &mut dyn IdSource) -> Vec<SkillItem> {
    match raw {
        Skills::Items { items } => items
            .iter()
            .filter(|item| !item.name.trim().is_empty())
            .cloned()
            .collect(),
        Skills::Legacy(legacy) => {
            let groups = [
                (&legacy.technical_skills, SkillCategory::Technical),
                (&legacy.soft_skills, SkillCategory::Soft),
                (&legacy.languages, SkillCategory::Languages),
            ];

            groups
                .into_iter()
                .flat_map(|(names, category)| names.iter().map(move |name| (name, category)))
                .filter(|(name, _)| !name.trim().is_empty())
                .map(|(name, category)| SkillItem::new(ids, name.trim(), category, Proficiency::default()))
                .collect()
        }
    }
}
