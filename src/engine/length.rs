//! Word-count check for the written parts of a résumé

use crate::model::ResumeData;
use serde::{Deserialize, Serialize};

/// Inclusive word-count range considered ideal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LengthBounds {
    pub min_words: usize,
    pub max_words: usize,
}

impl Default for LengthBounds {
    fn default() -> Self {
        Self {
            min_words: 200,
            max_words: 800,
        }
    }
}

impl LengthBounds {
    pub fn contains(&self, words: usize) -> bool {
        (self.min_words..=self.max_words).contains(&words)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LengthResult {
    pub word_count: usize,
    pub ideal: bool,
    pub feedback: String,
}

pub fn check_resume_length(cv: &ResumeData) -> LengthResult {
    check_resume_length_with(cv, &LengthBounds::default())
}

pub fn check_resume_length_with(cv: &ResumeData, bounds: &LengthBounds) -> LengthResult {
    let text = format!("{} {}", cv.summary, cv.experience_text());
    let word_count = text.split_whitespace().count();

    let feedback = if word_count < bounds.min_words {
        format!(
            "Your résumé is too short. Aim for at least {} words to show your experience.",
            bounds.min_words
        )
    } else if word_count > bounds.max_words {
        format!(
            "Your résumé is too long. Keep it under {} words so recruiters read all of it.",
            bounds.max_words
        )
    } else {
        "Your résumé length is appropriate.".to_string()
    };

    LengthResult {
        word_count,
        ideal: bounds.contains(word_count),
        feedback,
    }
}
