//! Section identifiers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Prefix carried by user-defined section identifiers
pub const CUSTOM_PREFIX: &str = "custom_";

/// Identifier of a résumé section.
///
/// The built-in set is closed. Anything prefixed with `custom_` is a
/// user-defined section and round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SectionId {
    PersonalInfo,
    Summary,
    Experience,
    Education,
    Skills,
    Certifications,
    Projects,
    Achievements,
    Publications,
    Licenses,
    Portfolio,
    Custom(String),
}

impl SectionId {
    /// Every built-in section, in table order
    pub const BUILT_IN: [SectionId; 11] = [
        SectionId::PersonalInfo,
        SectionId::Summary,
        SectionId::Experience,
        SectionId::Education,
        SectionId::Skills,
        SectionId::Certifications,
        SectionId::Projects,
        SectionId::Achievements,
        SectionId::Publications,
        SectionId::Licenses,
        SectionId::Portfolio,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            SectionId::PersonalInfo => "personalInfo",
            SectionId::Summary => "summary",
            SectionId::Experience => "experience",
            SectionId::Education => "education",
            SectionId::Skills => "skills",
            SectionId::Certifications => "certifications",
            SectionId::Projects => "projects",
            SectionId::Achievements => "achievements",
            SectionId::Publications => "publications",
            SectionId::Licenses => "licenses",
            SectionId::Portfolio => "portfolio",
            SectionId::Custom(name) => name,
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, SectionId::Custom(_))
    }

    /// Human readable label used by report formatters
    pub fn label(&self) -> String {
        match self {
            SectionId::PersonalInfo => "Personal Info".to_string(),
            SectionId::Summary => "Summary".to_string(),
            SectionId::Experience => "Experience".to_string(),
            SectionId::Education => "Education".to_string(),
            SectionId::Skills => "Skills".to_string(),
            SectionId::Certifications => "Certifications".to_string(),
            SectionId::Projects => "Projects".to_string(),
            SectionId::Achievements => "Achievements".to_string(),
            SectionId::Publications => "Publications".to_string(),
            SectionId::Licenses => "Licenses".to_string(),
            SectionId::Portfolio => "Portfolio".to_string(),
            SectionId::Custom(name) => name
                .trim_start_matches(CUSTOM_PREFIX)
                .replace('_', " "),
        }
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = match s {
            "personalInfo" => SectionId::PersonalInfo,
            "summary" => SectionId::Summary,
            "experience" => SectionId::Experience,
            "education" => SectionId::Education,
            "skills" => SectionId::Skills,
            "certifications" => SectionId::Certifications,
            "projects" => SectionId::Projects,
            "achievements" => SectionId::Achievements,
            "publications" => SectionId::Publications,
            "licenses" => SectionId::Licenses,
            "portfolio" => SectionId::Portfolio,
            custom if custom.starts_with(CUSTOM_PREFIX) && custom.len() > CUSTOM_PREFIX.len() => {
                SectionId::Custom(custom.to_string())
            }
            other => return Err(format!("Unknown section identifier: {}", other)),
        };
        Ok(id)
    }
}

impl TryFrom<String> for SectionId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SectionId> for String {
    fn from(id: SectionId) -> Self {
        id.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_built_in_names_parse_back() {
        for id in SectionId::BUILT_IN.iter() {
            assert_eq!(&id.as_str().parse::<SectionId>().unwrap(), id);
        }
    }

    #[test]
    fn test_custom_sections() {
        let id: SectionId = "custom_volunteering".parse().unwrap();
        assert!(id.is_custom());
        assert_eq!(id.as_str(), "custom_volunteering");
        assert_eq!(id.label(), "volunteering");

        assert!("custom_".parse::<SectionId>().is_err());
        assert!("hobbies".parse::<SectionId>().is_err());
    }

    #[test]
    fn test_serde_uses_plain_strings() {
        let json = serde_json::to_string(&vec![SectionId::PersonalInfo, SectionId::Licenses]).unwrap();
        assert_eq!(json, r#"["personalInfo","licenses"]"#);

        let back: Vec<SectionId> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vec![SectionId::PersonalInfo, SectionId::Licenses]);
    }
}
