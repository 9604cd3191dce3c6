//! Request body for the external PDF rendering service

use crate::engine::arrange;
use crate::model::{Profession, ResumeData, SectionId, UserProfile};
use serde::{Deserialize, Serialize};

pub const DEFAULT_TEMPLATE: &str = "modern";
pub const DEFAULT_LANGUAGE: &str = "en";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    pub resume_data: ResumeData,
    pub sections: Vec<SectionId>,
    pub template: String,
    pub language: String,
}

impl ExportRequest {
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Bundle a résumé with its arranged section order.
///
/// Blank template or language fall back to the defaults.
pub fn build_export_request(
    cv: &ResumeData,
    profession: Option<&Profession>,
    profile: Option<&UserProfile>,
    template: &str,
    language: &str,
) -> ExportRequest {
    let or_default = |value: &str, default: &str| match value.trim() {
        "" => default.to_string(),
        trimmed => trimmed.to_string(),
    };

    ExportRequest {
        resume_data: cv.clone(),
        sections: arrange(profession, profile),
        template: or_default(template, DEFAULT_TEMPLATE),
        language: or_default(language, DEFAULT_LANGUAGE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ProfessionTable;

    #[test]
    fn test_payload_shape() {
        let table = ProfessionTable::builtin();
        let cv = ResumeData {
            summary: "Hello".to_string(),
            ..Default::default()
        };
        let request = build_export_request(&cv, table.find("nurse"), None, "classic", "de");
        let json: serde_json::Value = serde_json::from_str(&request.to_json().unwrap()).unwrap();

        assert_eq!(json["resumeData"]["summary"], "Hello");
        assert_eq!(json["sections"][0], "personalInfo");
        assert_eq!(json["template"], "classic");
        assert_eq!(json["language"], "de");
        assert_eq!(request.sections, arrange(table.find("nurse"), None));
    }

    #[test]
    fn test_blank_template_and_language_use_defaults() {
        let request = build_export_request(&ResumeData::default(), None, None, " ", "");
        assert_eq!(request.template, DEFAULT_TEMPLATE);
        assert_eq!(request.language, DEFAULT_LANGUAGE);
        assert_eq!(request.sections, crate::engine::FALLBACK_ORDER.to_vec());
    }
}
