//! Questionnaire answers and the effective profile the engines work from

use crate::model::section::SectionId;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Self-declared experience level from the questionnaire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ExperienceLevel {
    ZeroToTwo,
    ThreeToFive,
    SixToTen,
    TenPlus,
    Other(String),
}

impl From<String> for ExperienceLevel {
    fn from(value: String) -> Self {
        match value.as_str() {
            "0-2" => ExperienceLevel::ZeroToTwo,
            "3-5" => ExperienceLevel::ThreeToFive,
            "6-10" => ExperienceLevel::SixToTen,
            "10+" => ExperienceLevel::TenPlus,
            _ => ExperienceLevel::Other(value),
        }
    }
}

impl From<ExperienceLevel> for String {
    fn from(level: ExperienceLevel) -> Self {
        match level {
            ExperienceLevel::ZeroToTwo => "0-2".to_string(),
            ExperienceLevel::ThreeToFive => "3-5".to_string(),
            ExperienceLevel::SixToTen => "6-10".to_string(),
            ExperienceLevel::TenPlus => "10+".to_string(),
            ExperienceLevel::Other(value) => value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Degree {
    HighSchool,
    Associate,
    Bachelor,
    Master,
    Phd,
    Professional,
    Other(String),
}

impl Degree {
    pub fn is_bachelor_or_higher(&self) -> bool {
        matches!(
            self,
            Degree::Bachelor | Degree::Master | Degree::Phd | Degree::Professional
        )
    }
}

impl From<String> for Degree {
    fn from(value: String) -> Self {
        match value.as_str() {
            "high_school" | "highschool" => Degree::HighSchool,
            "associate" => Degree::Associate,
            "bachelor" => Degree::Bachelor,
            "master" => Degree::Master,
            "phd" => Degree::Phd,
            "professional" => Degree::Professional,
            _ => Degree::Other(value),
        }
    }
}

impl From<Degree> for String {
    fn from(degree: Degree) -> Self {
        match degree {
            Degree::HighSchool => "high_school".to_string(),
            Degree::Associate => "associate".to_string(),
            Degree::Bachelor => "bachelor".to_string(),
            Degree::Master => "master".to_string(),
            Degree::Phd => "phd".to_string(),
            Degree::Professional => "professional".to_string(),
            Degree::Other(value) => value,
        }
    }
}

/// Which part of the résumé the user wants to lead with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FocusArea {
    Education,
    Experience,
    Skills,
    Achievements,
    Other(String),
}

impl From<String> for FocusArea {
    fn from(value: String) -> Self {
        match value.as_str() {
            "education" => FocusArea::Education,
            "experience" => FocusArea::Experience,
            "skills" => FocusArea::Skills,
            "achievements" => FocusArea::Achievements,
            _ => FocusArea::Other(value),
        }
    }
}

impl From<FocusArea> for String {
    fn from(focus: FocusArea) -> Self {
        match focus {
            FocusArea::Education => "education".to_string(),
            FocusArea::Experience => "experience".to_string(),
            FocusArea::Skills => "skills".to_string(),
            FocusArea::Achievements => "achievements".to_string(),
            FocusArea::Other(value) => value,
        }
    }
}

/// Raw questionnaire answers. Every field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience_level: Option<ExperienceLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degree: Option<Degree>,
    #[serde(
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub years_in_field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub career_goal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus_area: Option<FocusArea>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_publications: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_projects: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_certifications: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_achievements: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_licenses: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_portfolio: Option<bool>,
}

impl UserProfile {
    /// The profile assumed when no questionnaire was filled in
    pub fn defaults() -> Self {
        Self {
            experience_level: Some(ExperienceLevel::ThreeToFive),
            degree: Some(Degree::Bachelor),
            years_in_field: Some("3".to_string()),
            current_role: None,
            career_goal: None,
            focus_area: Some(FocusArea::Experience),
            has_publications: Some(false),
            has_projects: Some(true),
            has_certifications: Some(true),
            has_achievements: Some(true),
            has_licenses: Some(false),
            has_portfolio: Some(false),
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(i64),
        Float(f64),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Text(text)) => Some(text),
        Some(Raw::Number(n)) => Some(n.to_string()),
        Some(Raw::Float(f)) => Some((f.trunc() as i64).to_string()),
        None => None,
    })
}

/// Experience band derived from the declared level and years in field.
///
/// Bands are mutually exclusive: 0-2, 3-5, 6-9 and 10+ years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelBand {
    Entry,
    Mid,
    Senior,
    Expert,
}

impl LevelBand {
    pub fn is_senior_or_expert(self) -> bool {
        matches!(self, LevelBand::Senior | LevelBand::Expert)
    }
}

impl fmt::Display for LevelBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LevelBand::Entry => "entry",
            LevelBand::Mid => "mid",
            LevelBand::Senior => "senior",
            LevelBand::Expert => "expert",
        };
        f.write_str(name)
    }
}

/// Optional sections the user asked for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SectionFlags {
    pub publications: bool,
    pub projects: bool,
    pub certifications: bool,
    pub achievements: bool,
    pub licenses: bool,
    pub portfolio: bool,
}

impl SectionFlags {
    /// Whether an optional section was requested. Base sections are never flagged.
    pub fn is_flagged(&self, section: &SectionId) -> bool {
        match section {
            SectionId::Publications => self.publications,
            SectionId::Projects => self.projects,
            SectionId::Certifications => self.certifications,
            SectionId::Achievements => self.achievements,
            SectionId::Licenses => self.licenses,
            SectionId::Portfolio => self.portfolio,
            _ => false,
        }
    }
}

/// A profile with every default applied
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveProfile {
    pub experience_level: Option<ExperienceLevel>,
    pub degree: Degree,
    pub years_in_field: Option<u32>,
    pub career_goal: String,
    pub focus_area: FocusArea,
    pub flags: SectionFlags,
}

impl EffectiveProfile {
    /// Apply defaults. An absent profile gets the full default profile.
    /// A present one keeps missing level and years unset, so the band is
    /// decided by whichever of the two is known, and missing flags are `false`.
    pub fn resolve(profile: Option<&UserProfile>) -> Self {
        let defaults = UserProfile::defaults();
        let profile = match profile {
            Some(profile) => profile,
            None => {
                log::debug!("No user profile supplied, using default profile");
                &defaults
            }
        };

        let years_in_field = profile
            .years_in_field
            .as_deref()
            .and_then(|years| years.trim().parse::<u32>().ok());

        Self {
            experience_level: profile.experience_level.clone(),
            degree: profile.degree.clone().unwrap_or(Degree::Bachelor),
            years_in_field,
            career_goal: profile.career_goal.clone().unwrap_or_default(),
            focus_area: profile.focus_area.clone().unwrap_or(FocusArea::Experience),
            flags: SectionFlags {
                publications: profile.has_publications.unwrap_or(false),
                projects: profile.has_projects.unwrap_or(false),
                certifications: profile.has_certifications.unwrap_or(false),
                achievements: profile.has_achievements.unwrap_or(false),
                licenses: profile.has_licenses.unwrap_or(false),
                portfolio: profile.has_portfolio.unwrap_or(false),
            },
        }
    }

    /// First matching band in entry, mid, senior, expert order
    pub fn level_band(&self) -> LevelBand {
        let level = self.experience_level.as_ref();
        let years = self.years_in_field;
        let is_level = |expected: ExperienceLevel| level == Some(&expected);
        let years_in = |range: std::ops::RangeInclusive<u32>| years.is_some_and(|y| range.contains(&y));

        if is_level(ExperienceLevel::ZeroToTwo) || years_in(0..=2) {
            LevelBand::Entry
        } else if is_level(ExperienceLevel::ThreeToFive) || years_in(3..=5) {
            LevelBand::Mid
        } else if is_level(ExperienceLevel::SixToTen) || years_in(6..=9) {
            LevelBand::Senior
        } else if is_level(ExperienceLevel::TenPlus) || years_in(10..=u32::MAX) {
            LevelBand::Expert
        } else {
            LevelBand::Mid
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(level: &str, years: &str) -> UserProfile {
        UserProfile {
            experience_level: Some(level.to_string().into()),
            years_in_field: Some(years.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_level_bands_are_exclusive() {
        let band = |level, years| EffectiveProfile::resolve(Some(&profile(level, years))).level_band();

        assert_eq!(band("0-2", "1"), LevelBand::Entry);
        assert_eq!(band("3-5", "4"), LevelBand::Mid);
        assert_eq!(band("6-10", "7"), LevelBand::Senior);
        assert_eq!(band("10+", "15"), LevelBand::Expert);
        // ten years must land in the expert band, not senior
        assert_eq!(band("unknown", "10"), LevelBand::Expert);
        assert_eq!(band("unknown", "9"), LevelBand::Senior);
    }

    #[test]
    fn test_entry_wins_when_years_are_low() {
        let resolved = EffectiveProfile::resolve(Some(&profile("10+", "2")));
        assert_eq!(resolved.level_band(), LevelBand::Entry);
    }

    #[test]
    fn test_absent_profile_uses_defaults() {
        let resolved = EffectiveProfile::resolve(None);
        assert_eq!(resolved, EffectiveProfile::resolve(Some(&UserProfile::defaults())));
        assert_eq!(resolved.level_band(), LevelBand::Mid);
        assert!(resolved.flags.projects);
        assert!(resolved.flags.certifications);
        assert!(resolved.flags.achievements);
        assert!(!resolved.flags.publications);
    }

    #[test]
    fn test_present_profile_missing_flags_are_false() {
        let resolved = EffectiveProfile::resolve(Some(&UserProfile::default()));
        assert_eq!(resolved.flags, SectionFlags::default());
        assert_eq!(resolved.focus_area, FocusArea::Experience);
        assert_eq!(resolved.years_in_field, None);
        assert_eq!(resolved.level_band(), LevelBand::Mid);
    }

    #[test]
    fn test_declared_level_without_years() {
        let partial = UserProfile {
            experience_level: Some(ExperienceLevel::TenPlus),
            ..Default::default()
        };
        assert_eq!(EffectiveProfile::resolve(Some(&partial)).level_band(), LevelBand::Expert);
    }

    #[test]
    fn test_deserialize_questionnaire() {
        let json = r#"{
            "experienceLevel": "6-10",
            "degree": "master",
            "yearsInField": 8,
            "focusArea": "leadership",
            "hasProjects": true
        }"#;
        let parsed: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.experience_level, Some(ExperienceLevel::SixToTen));
        assert_eq!(parsed.degree, Some(Degree::Master));
        assert_eq!(parsed.years_in_field.as_deref(), Some("8"));
        assert_eq!(parsed.focus_area, Some(FocusArea::Other("leadership".to_string())));
        assert_eq!(parsed.has_projects, Some(true));
        assert_eq!(parsed.has_licenses, None);
    }

    #[test]
    fn test_unparseable_years_fall_back_to_level() {
        let resolved = EffectiveProfile::resolve(Some(&profile("6-10", "many")));
        assert_eq!(resolved.years_in_field, None);
        assert_eq!(resolved.level_band(), LevelBand::Senior);
    }
}
