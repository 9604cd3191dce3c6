//! Report structures combining engine results with generation metadata

use crate::engine::{
    arrange, check_ats_keywords, check_resume_length_with, explain_arrangement, section_weights, score,
    ArrangementExplanation, AtsKeywordResult, LengthBounds, LengthResult, ScoreResult,
};
use crate::model::{Profession, ResumeData, SectionId, UserProfile};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub engine_version: String,
    pub profession_id: Option<String>,
    pub resume_file: Option<String>,
}

impl ReportMetadata {
    pub fn new(profession: Option<&Profession>, resume_file: Option<&Path>) -> Self {
        Self {
            generated_at: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            profession_id: profession.map(|p| p.id.clone()),
            resume_file: resume_file.map(|path| path.display().to_string()),
        }
    }
}

/// Score, length check and optional job-description match for one résumé
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreReport {
    pub score: ScoreResult,
    pub length: LengthResult,
    pub keywords: Option<AtsKeywordResult>,
    pub metadata: ReportMetadata,
}

impl ScoreReport {
    pub fn build(
        cv: &ResumeData,
        profession: Option<&Profession>,
        job_description: Option<&str>,
        bounds: &LengthBounds,
        resume_file: Option<&Path>,
    ) -> Self {
        Self {
            score: score(Some(cv), profession),
            length: check_resume_length_with(cv, bounds),
            keywords: job_description.map(|job| check_ats_keywords(cv, job)),
            metadata: ReportMetadata::new(profession, resume_file),
        }
    }
}

/// One arranged section with what the formatters show next to it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionRow {
    pub id: SectionId,
    pub label: String,
    pub weight: Option<u32>,
    pub tip: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrangementReport {
    pub profession_id: Option<String>,
    pub profession_name: Option<String>,
    pub sections: Vec<SectionId>,
    pub explanation: ArrangementExplanation,
    pub weights: BTreeMap<SectionId, u32>,
    pub tips: BTreeMap<SectionId, String>,
    pub metadata: ReportMetadata,
}

impl ArrangementReport {
    pub fn build(profession: Option<&Profession>, profile: Option<&UserProfile>) -> Self {
        let sections = arrange(profession, profile);
        let tips = profession
            .map(|p| {
                p.tips
                    .iter()
                    .filter(|(section, _)| sections.contains(section))
                    .map(|(section, tip)| (section.clone(), tip.clone()))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            profession_id: profession.map(|p| p.id.clone()),
            profession_name: profession.map(|p| p.name.clone()),
            explanation: explain_arrangement(profession, profile),
            weights: section_weights(profile),
            tips,
            sections,
            metadata: ReportMetadata::new(profession, None),
        }
    }

    /// Sections in arranged order with their weight and tip
    pub fn rows(&self) -> Vec<SectionRow> {
        self.sections
            .iter()
            .map(|section| SectionRow {
                id: section.clone(),
                label: section.label(),
                weight: self.weights.get(section).copied(),
                tip: self.tips.get(section).cloned(),
            })
            .collect()
    }
}
