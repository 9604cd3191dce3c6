//! Relative section weights used as scoring metadata

use crate::model::profile::{EffectiveProfile, LevelBand};
use crate::model::{SectionId, UserProfile};
use std::collections::BTreeMap;

const BASE_WEIGHTS: [(SectionId, u32); 7] = [
    (SectionId::PersonalInfo, 10),
    (SectionId::Summary, 15),
    (SectionId::Experience, 30),
    (SectionId::Education, 15),
    (SectionId::Skills, 20),
    (SectionId::Certifications, 5),
    (SectionId::Projects, 5),
];

pub fn section_weights(profile: Option<&UserProfile>) -> BTreeMap<SectionId, u32> {
    let mut weights: BTreeMap<SectionId, u32> = BASE_WEIGHTS.into_iter().collect();

    match EffectiveProfile::resolve(profile).level_band() {
        LevelBand::Entry => {
            weights.insert(SectionId::Education, 25);
            weights.insert(SectionId::Projects, 15);
            weights.insert(SectionId::Experience, 20);
        }
        LevelBand::Expert => {
            weights.insert(SectionId::Experience, 40);
            weights.insert(SectionId::Achievements, 15);
            weights.insert(SectionId::Education, 5);
        }
        LevelBand::Mid | LevelBand::Senior => {}
    }

    weights
}
