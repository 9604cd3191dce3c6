//! Explanation of why sections were arranged the way they were
//!
//! Returns translation keys only; rendering them is left to the caller's
//! i18n layer.

use crate::model::profile::{EffectiveProfile, LevelBand};
use crate::model::{Profession, UserProfile};
use serde::{Deserialize, Serialize};

const TIPS_PER_BAND: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrangementExplanation {
    pub title_key: String,
    pub reason_key: String,
    pub tip_keys: Vec<String>,
}

/// Explanation bucket; entry level splits on whether a degree leads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExplanationBand {
    EntryWithDegree,
    EntryPractical,
    Mid,
    Senior,
    Expert,
}

impl ExplanationBand {
    pub fn key(self) -> &'static str {
        match self {
            ExplanationBand::EntryWithDegree => "entry_degree",
            ExplanationBand::EntryPractical => "entry_practical",
            ExplanationBand::Mid => "mid",
            ExplanationBand::Senior => "senior",
            ExplanationBand::Expert => "expert",
        }
    }
}

pub fn explanation_band(profile: Option<&UserProfile>) -> ExplanationBand {
    let profile = EffectiveProfile::resolve(profile);
    match profile.level_band() {
        LevelBand::Entry if profile.degree.is_bachelor_or_higher() => ExplanationBand::EntryWithDegree,
        LevelBand::Entry => ExplanationBand::EntryPractical,
        LevelBand::Mid => ExplanationBand::Mid,
        LevelBand::Senior => ExplanationBand::Senior,
        LevelBand::Expert => ExplanationBand::Expert,
    }
}

/// Explain the arrangement for a profile.
///
/// The profession is accepted for symmetry with [`super::arrangement::arrange`]
/// but only the level band and degree select the text.
pub fn explain_arrangement(
    _profession: Option<&Profession>,
    profile: Option<&UserProfile>,
) -> ArrangementExplanation {
    let band = explanation_band(profile).key();
    ArrangementExplanation {
        title_key: format!("arrangement.{}.title", band),
        reason_key: format!("arrangement.{}.reason", band),
        tip_keys: (1..=TIPS_PER_BAND)
            .map(|n| format!("arrangement.{}.tips.{}", band, n))
            .collect(),
    }
}
