//! Match a job description's vocabulary against a résumé

use crate::engine::matching::PhraseMatcher;
use crate::model::ResumeData;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Tokens of this many characters or fewer are ignored
const MIN_TOKEN_CHARS: usize = 3;
const MAX_REPORTED: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtsKeywordResult {
    pub match_rate: u32,
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
}

/// Splits job descriptions into candidate keywords
pub struct KeywordExtractor {
    separator: Regex,
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordExtractor {
    pub fn new() -> Self {
        Self {
            separator: Regex::new(r"\W+").expect("Invalid separator regex"),
        }
    }

    /// Lowercased distinct tokens in first-seen order
    pub fn keywords(&self, text: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        self.separator
            .split(text)
            .filter(|token| token.chars().count() > MIN_TOKEN_CHARS)
            .map(str::to_lowercase)
            .filter(|token| seen.insert(token.clone()))
            .collect()
    }

    pub fn check(&self, cv: &ResumeData, job_description: &str) -> AtsKeywordResult {
        let keywords = self.keywords(job_description);
        if keywords.is_empty() {
            log::debug!("Job description has no usable keywords");
            return AtsKeywordResult {
                match_rate: 0,
                matched_keywords: Vec::new(),
                missing_keywords: Vec::new(),
            };
        }

        let found = PhraseMatcher::new(&keywords).matches(&resume_text(cv));
        let (matched, missing): (Vec<_>, Vec<_>) = keywords.into_iter().zip(found).partition(|(_, hit)| *hit);
        let match_rate = (matched.len() as f64 * 100.0 / (matched.len() + missing.len()) as f64).round() as u32;

        AtsKeywordResult {
            match_rate,
            matched_keywords: matched.into_iter().map(|(k, _)| k).take(MAX_REPORTED).collect(),
            missing_keywords: missing.into_iter().map(|(k, _)| k).take(MAX_REPORTED).collect(),
        }
    }
}

fn resume_text(cv: &ResumeData) -> String {
    let mut parts: Vec<String> = vec![cv.personal_info.full_name.clone(), cv.summary.clone()];
    for exp in &cv.experience {
        parts.push(exp.job_title.clone());
        parts.push(exp.description.clone());
    }
    parts.extend(cv.skill_items().into_iter().map(|skill| skill.name));
    parts.join(" ")
}

pub fn check_ats_keywords(cv: &ResumeData, job_description: &str) -> AtsKeywordResult {
    KeywordExtractor::new().check(cv, job_description)
}
