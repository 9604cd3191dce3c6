//! Section arrangement
//!
//! Picks the display and export order of résumé sections from the user's
//! experience band, focus area, profession and career goal. The order is
//! built by appending to a fresh list under named rules, then adjusted by
//! profession and goal overrides, then filtered to what the profession
//! declares.

use crate::model::profile::{EffectiveProfile, FocusArea, LevelBand, SectionFlags};
use crate::model::{Profession, SectionId, UserProfile};
use log::{debug, warn};

/// Order used when the profession is missing or has no section list
pub const FALLBACK_ORDER: [SectionId; 8] = [
    SectionId::PersonalInfo,
    SectionId::Summary,
    SectionId::Experience,
    SectionId::Education,
    SectionId::Skills,
    SectionId::Projects,
    SectionId::Certifications,
    SectionId::Achievements,
];

const CAREER_CHANGE_TERMS: [&str; 3] = ["career change", "transition", "pivot"];
const LEADERSHIP_TERMS: [&str; 3] = ["leadership", "manager", "director"];

/// Compute the ordered section list for a profession and questionnaire.
///
/// Never fails: a missing or malformed profession yields [`FALLBACK_ORDER`]
/// and a missing profile is replaced by the default profile. `personalInfo`
/// is always first, there are no duplicates, and every other section is one
/// the profession declares.
pub fn arrange(profession: Option<&Profession>, profile: Option<&UserProfile>) -> Vec<SectionId> {
    let profession = match profession {
        Some(p) if p.sections.is_some() => p,
        Some(p) => {
            warn!("Profession '{}' has no section list, using the default order", p.id);
            return FALLBACK_ORDER.to_vec();
        }
        None => {
            warn!("No profession supplied, using the default section order");
            return FALLBACK_ORDER.to_vec();
        }
    };

    let profile = EffectiveProfile::resolve(profile);
    let band = profile.level_band();
    debug!(
        "Arranging sections for '{}' (band: {}, focus: {:?})",
        profession.id, band, profile.focus_area
    );

    let has_degree = profile.degree.is_bachelor_or_higher();
    let mut order = SectionOrder::new(profession, profile.flags);
    match &profile.focus_area {
        FocusArea::Education => order.lead_with_education(),
        FocusArea::Skills => order.lead_with_skills(),
        FocusArea::Achievements => order.lead_with_achievements(),
        FocusArea::Experience | FocusArea::Other(_) => match band {
            LevelBand::Entry => order.entry_level(has_degree),
            LevelBand::Mid => order.mid_level(),
            LevelBand::Senior => order.senior_level(),
            LevelBand::Expert => order.expert_level(),
        },
    }

    order.apply_profession_rules(band, &profile.focus_area, has_degree);
    order.apply_career_goal(&profile.career_goal);
    order.finish()
}

/// Working list of sections, excluding `personalInfo`.
///
/// Positions used by the override rules count within this list.
struct SectionOrder<'a> {
    profession: &'a Profession,
    flags: SectionFlags,
    sections: Vec<SectionId>,
}

impl<'a> SectionOrder<'a> {
    fn new(profession: &'a Profession, flags: SectionFlags) -> Self {
        Self {
            profession,
            flags,
            sections: Vec::with_capacity(SectionId::BUILT_IN.len()),
        }
    }

    /// Requested by the user and declared by the profession
    fn wanted(&self, section: &SectionId) -> bool {
        self.flags.is_flagged(section) && self.profession.declares(section)
    }

    fn base(&mut self, sections: &[SectionId]) {
        self.sections.extend_from_slice(sections);
    }

    fn optional(&mut self, sections: &[SectionId]) {
        for section in sections {
            if self.wanted(section) {
                self.sections.push(section.clone());
            }
        }
    }

    fn position(&self, section: &SectionId) -> Option<usize> {
        self.sections.iter().position(|s| s == section)
    }

    fn insert_at(&mut self, section: SectionId, index: usize) {
        let index = index.min(self.sections.len());
        self.sections.insert(index, section);
    }

    fn remove(&mut self, section: &SectionId) -> bool {
        match self.position(section) {
            Some(pos) => {
                self.sections.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Place a section at `index` whether or not it is already present
    fn force_to(&mut self, section: SectionId, index: usize) {
        self.remove(&section);
        self.insert_at(section, index);
    }

    /// Move a section to `index` if it sits beyond `limit`; insert it there if absent
    fn pull_forward(&mut self, section: SectionId, index: usize, limit: usize) {
        match self.position(&section) {
            Some(pos) if pos > limit => self.force_to(section, index),
            Some(_) => {}
            None => self.insert_at(section, index),
        }
    }

    fn lead_with_education(&mut self) {
        use SectionId::*;
        self.base(&[Summary, Education, Skills, Experience]);
        self.optional(&[Certifications, Projects, Publications, Achievements, Licenses, Portfolio]);
    }

    fn lead_with_skills(&mut self) {
        use SectionId::*;
        self.base(&[Summary, Skills, Experience, Education]);
        if self.wanted(&Projects) {
            self.insert_at(Projects, 2);
        }
        if self.wanted(&Portfolio) {
            self.insert_at(Portfolio, 2);
        }
        self.optional(&[Certifications, Achievements, Publications, Licenses]);
    }

    fn lead_with_achievements(&mut self) {
        use SectionId::*;
        self.base(&[Summary, Experience]);
        self.optional(&[Achievements, Publications]);
        self.base(&[Skills]);
        self.optional(&[Certifications, Licenses, Projects, Portfolio]);
        self.base(&[Education]);
    }

    fn entry_level(&mut self, has_degree: bool) {
        use SectionId::*;
        if has_degree {
            self.base(&[Summary, Education, Skills, Experience]);
            self.optional(&[Projects, Certifications]);
        } else {
            self.base(&[Summary, Skills, Experience, Education]);
            self.optional(&[Projects]);
        }
        self.optional(&[Achievements, Publications, Licenses, Portfolio]);
    }

    fn mid_level(&mut self) {
        use SectionId::*;
        self.base(&[Summary, Experience, Skills, Education]);
        self.optional(&[Projects, Certifications, Achievements, Publications, Licenses, Portfolio]);
    }

    fn senior_level(&mut self) {
        use SectionId::*;
        self.base(&[Summary, Experience, Skills]);
        self.optional(&[Achievements, Certifications]);
        self.base(&[Education]);
        self.optional(&[Projects, Publications, Licenses, Portfolio]);
    }

    fn expert_level(&mut self) {
        use SectionId::*;
        self.base(&[Summary, Experience]);
        self.optional(&[Achievements, Publications]);
        self.base(&[Skills]);
        self.optional(&[Certifications, Licenses]);
        self.base(&[Education]);
        self.optional(&[Projects, Portfolio]);
    }

    fn apply_profession_rules(&mut self, band: LevelBand, focus: &FocusArea, has_degree: bool) {
        use SectionId::*;
        match self.profession.id.as_str() {
            "doctor" | "lawyer" => {
                if self.wanted(&Licenses) && self.remove(&Licenses) {
                    let after_summary = self.position(&Summary).map_or(0, |pos| pos + 1);
                    self.insert_at(Licenses, after_summary);
                }
                if band.is_senior_or_expert() && self.wanted(&Publications) {
                    self.keep_before(Publications, &Education);
                }
            }
            "designer" => {
                if self.wanted(&Portfolio) {
                    self.force_to(Portfolio, 2);
                }
            }
            "engineer" => {
                // the entry-level degree order already puts projects right after the core block
                let entry_degree = band == LevelBand::Entry
                    && has_degree
                    && matches!(focus, FocusArea::Experience | FocusArea::Other(_));
                if self.wanted(&Projects) && !entry_degree {
                    self.pull_forward(Projects, 3, 3);
                }
            }
            "accountant" => {
                if self.wanted(&Certifications) {
                    self.pull_forward(Certifications, 2, 2);
                }
            }
            "sales" => {
                if self.wanted(&Achievements) {
                    self.pull_forward(Achievements, 2, 2);
                }
            }
            _ => {}
        }
    }

    fn keep_before(&mut self, section: SectionId, anchor: &SectionId) {
        let Some(anchor_pos) = self.position(anchor) else {
            if self.position(&section).is_none() {
                self.sections.push(section);
            }
            return;
        };

        match self.position(&section) {
            Some(pos) if pos < anchor_pos => {}
            Some(_) => {
                self.remove(&section);
                let anchor_pos = self.position(anchor).unwrap_or(self.sections.len());
                self.insert_at(section, anchor_pos);
            }
            None => self.insert_at(section, anchor_pos),
        }
    }

    fn apply_career_goal(&mut self, goal: &str) {
        let goal = goal.to_lowercase();
        if goal.is_empty() {
            return;
        }

        if CAREER_CHANGE_TERMS.iter().any(|term| goal.contains(term)) {
            if let Some(pos) = self.position(&SectionId::Skills) {
                if pos > 2 {
                    self.force_to(SectionId::Skills, 2);
                }
            }
        }

        if LEADERSHIP_TERMS.iter().any(|term| goal.contains(term)) {
            match self.position(&SectionId::Achievements) {
                Some(pos) if pos > 3 => self.force_to(SectionId::Achievements, 2),
                Some(_) => {}
                None if self.wanted(&SectionId::Achievements) => {
                    self.insert_at(SectionId::Achievements, 2)
                }
                None => {}
            }
        }
    }

    fn finish(self) -> Vec<SectionId> {
        let mut result = Vec::with_capacity(self.sections.len() + 1);
        result.push(SectionId::PersonalInfo);
        for section in self.sections {
            if section == SectionId::PersonalInfo || result.contains(&section) {
                continue;
            }
            if self.profession.declares(&section) {
                result.push(section);
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::profile::{Degree, ExperienceLevel};
    use crate::model::ProfessionTable;
    use std::collections::HashSet;
    use SectionId::*;

    fn profession(id: &str) -> Profession {
        ProfessionTable::builtin().find(id).unwrap().clone()
    }

    fn profile(level: &str, years: &str, focus: &str) -> UserProfile {
        UserProfile {
            experience_level: Some(ExperienceLevel::from(level.to_string())),
            years_in_field: Some(years.to_string()),
            focus_area: Some(FocusArea::from(focus.to_string())),
            ..Default::default()
        }
    }

    fn assert_well_formed(order: &[SectionId], profession: &Profession) {
        assert_eq!(order[0], PersonalInfo);
        let unique: HashSet<_> = order.iter().collect();
        assert_eq!(unique.len(), order.len(), "duplicates in {:?}", order);
        for section in &order[1..] {
            assert!(profession.declares(section), "{} not declared by {}", section, profession.id);
        }
    }

    #[test]
    fn test_engineer_entry_with_degree() {
        let engineer = profession("engineer");
        let answers = UserProfile {
            degree: Some(Degree::Bachelor),
            has_projects: Some(true),
            ..profile("0-2", "1", "experience")
        };

        let order = arrange(Some(&engineer), Some(&answers));
        assert_eq!(order, vec![PersonalInfo, Summary, Education, Skills, Experience, Projects]);
    }

    #[test]
    fn test_engineer_entry_without_degree_pulls_projects_forward() {
        let engineer = profession("engineer");
        let answers = UserProfile {
            degree: Some(Degree::HighSchool),
            has_projects: Some(true),
            ..profile("0-2", "1", "experience")
        };

        let order = arrange(Some(&engineer), Some(&answers));
        assert_eq!(order, vec![PersonalInfo, Summary, Skills, Experience, Projects, Education]);
        assert_well_formed(&order, &engineer);
    }

    #[test]
    fn test_entry_without_degree_leads_with_skills() {
        let developer = profession("developer");
        let answers = UserProfile {
            degree: Some(Degree::HighSchool),
            has_projects: Some(true),
            has_portfolio: Some(true),
            ..profile("0-2", "0", "experience")
        };

        let order = arrange(Some(&developer), Some(&answers));
        assert_eq!(
            order,
            vec![PersonalInfo, Summary, Skills, Experience, Education, Projects, Portfolio]
        );
    }

    #[test]
    fn test_doctor_expert_licenses_and_publications() {
        let doctor = profession("doctor");
        let answers = UserProfile {
            has_licenses: Some(true),
            has_publications: Some(true),
            ..profile("10+", "15", "experience")
        };

        let order = arrange(Some(&doctor), Some(&answers));
        let pos = |s: &SectionId| order.iter().position(|x| x == s).unwrap();
        assert_eq!(pos(&Licenses), pos(&Summary) + 1);
        assert!(pos(&Publications) < pos(&Education));
        assert_eq!(
            order,
            vec![PersonalInfo, Summary, Licenses, Experience, Publications, Skills, Education]
        );
    }

    #[test]
    fn test_lawyer_senior_moves_publications_before_education() {
        let lawyer = profession("lawyer");
        let answers = UserProfile {
            has_publications: Some(true),
            ..profile("6-10", "7", "experience")
        };

        let order = arrange(Some(&lawyer), Some(&answers));
        assert_eq!(order, vec![PersonalInfo, Summary, Experience, Skills, Publications, Education]);
    }

    #[test]
    fn test_mid_level_appends_flagged_sections_in_fixed_order() {
        let teacher = profession("teacher");
        let answers = UserProfile {
            has_publications: Some(true),
            has_projects: Some(true),
            has_certifications: Some(true),
            has_achievements: Some(true),
            has_licenses: Some(true),
            ..profile("3-5", "4", "experience")
        };

        let order = arrange(Some(&teacher), Some(&answers));
        assert_eq!(
            order,
            vec![
                PersonalInfo, Summary, Experience, Skills, Education, Projects,
                Certifications, Achievements, Publications, Licenses,
            ]
        );
    }

    #[test]
    fn test_skills_focus_inserts_portfolio_ahead_of_projects() {
        let custom = Profession::custom("Illustrator");
        let answers = UserProfile {
            has_projects: Some(true),
            has_portfolio: Some(true),
            has_certifications: Some(true),
            ..profile("3-5", "4", "skills")
        };

        let order = arrange(Some(&custom), Some(&answers));
        assert_eq!(
            order,
            vec![PersonalInfo, Summary, Skills, Portfolio, Projects, Experience, Education, Certifications]
        );
    }

    #[test]
    fn test_achievements_focus_puts_education_last() {
        let custom = Profession::custom("Consultant");
        let answers = UserProfile {
            has_achievements: Some(true),
            has_licenses: Some(true),
            ..profile("6-10", "8", "achievements")
        };

        let order = arrange(Some(&custom), Some(&answers));
        assert_eq!(
            order,
            vec![PersonalInfo, Summary, Experience, Achievements, Skills, Licenses, Education]
        );
    }

    #[test]
    fn test_education_focus_respects_declared_sections() {
        let sales = profession("sales");
        let answers = UserProfile {
            has_publications: Some(true),
            has_certifications: Some(true),
            ..profile("0-2", "1", "education")
        };

        let order = arrange(Some(&sales), Some(&answers));
        assert_eq!(order, vec![PersonalInfo, Summary, Education, Skills, Experience, Certifications]);
    }

    #[test]
    fn test_designer_portfolio_forced_to_third() {
        let designer = profession("designer");
        let answers = UserProfile {
            has_portfolio: Some(true),
            has_achievements: Some(true),
            ..profile("6-10", "7", "experience")
        };

        let order = arrange(Some(&designer), Some(&answers));
        assert_eq!(order[..4], [PersonalInfo, Summary, Experience, Portfolio]);
        assert_well_formed(&order, &designer);
    }

    #[test]
    fn test_engineer_projects_pulled_forward_outside_entry_level() {
        let engineer = profession("engineer");
        let answers = UserProfile {
            has_projects: Some(true),
            has_achievements: Some(true),
            has_certifications: Some(true),
            ..profile("6-10", "7", "experience")
        };

        let order = arrange(Some(&engineer), Some(&answers));
        assert_eq!(order.iter().position(|s| *s == Projects), Some(4));
    }

    #[test]
    fn test_accountant_and_sales_promotions() {
        let accountant = profession("accountant");
        let answers = UserProfile {
            has_certifications: Some(true),
            ..profile("3-5", "4", "experience")
        };
        let order = arrange(Some(&accountant), Some(&answers));
        assert_eq!(order[..4], [PersonalInfo, Summary, Experience, Certifications]);

        let sales = profession("sales");
        let answers = UserProfile {
            has_achievements: Some(true),
            ..profile("3-5", "4", "experience")
        };
        let order = arrange(Some(&sales), Some(&answers));
        assert_eq!(order[..4], [PersonalInfo, Summary, Experience, Achievements]);
    }

    #[test]
    fn test_career_change_goal_moves_skills_up() {
        let custom = Profession::custom("Analyst");
        let answers = UserProfile {
            career_goal: Some("Planning a Career Change into data".to_string()),
            has_achievements: Some(true),
            has_publications: Some(true),
            ..profile("10+", "12", "achievements")
        };

        let order = arrange(Some(&custom), Some(&answers));
        assert_eq!(
            order,
            vec![PersonalInfo, Summary, Experience, Skills, Achievements, Publications, Education]
        );
    }

    #[test]
    fn test_leadership_goal_pulls_achievements_forward() {
        let custom = Profession::custom("Analyst");
        let answers = UserProfile {
            career_goal: Some("Become an engineering MANAGER".to_string()),
            has_projects: Some(true),
            has_achievements: Some(true),
            ..profile("3-5", "4", "experience")
        };

        let order = arrange(Some(&custom), Some(&answers));
        assert_eq!(order[3], Achievements);
        assert_well_formed(&order, &custom);
    }

    #[test]
    fn test_leadership_goal_does_not_add_unrequested_achievements() {
        let custom = Profession::custom("Analyst");
        let answers = UserProfile {
            career_goal: Some("director".to_string()),
            ..profile("3-5", "4", "experience")
        };

        let order = arrange(Some(&custom), Some(&answers));
        assert!(!order.contains(&Achievements));
    }

    #[test]
    fn test_missing_profession_uses_fallback() {
        let answers = profile("10+", "20", "skills");
        assert_eq!(arrange(None, Some(&answers)), FALLBACK_ORDER.to_vec());
        assert_eq!(arrange(None, None), FALLBACK_ORDER.to_vec());

        let malformed = Profession {
            sections: None,
            ..Profession::custom("Broken")
        };
        assert_eq!(arrange(Some(&malformed), Some(&answers)), FALLBACK_ORDER.to_vec());
    }

    #[test]
    fn test_missing_profile_matches_default_profile() {
        for profession in ProfessionTable::builtin().professions {
            assert_eq!(
                arrange(Some(&profession), None),
                arrange(Some(&profession), Some(&UserProfile::defaults())),
                "{}",
                profession.id
            );
        }
    }

    #[test]
    fn test_unknown_focus_area_falls_through_to_experience() {
        let engineer = profession("engineer");
        let unknown = profile("3-5", "4", "networking");
        let experience = profile("3-5", "4", "experience");
        assert_eq!(arrange(Some(&engineer), Some(&unknown)), arrange(Some(&engineer), Some(&experience)));
    }

    #[test]
    fn test_every_combination_is_well_formed_and_repeatable() {
        let levels = ["0-2", "3-5", "6-10", "10+"];
        let focuses = ["education", "experience", "skills", "achievements", "other"];
        let goals = ["", "career change", "leadership"];
        let mut professions = ProfessionTable::builtin().professions;
        professions.push(Profession::custom("Astronaut"));

        for profession in &professions {
            for level in levels {
                for focus in focuses {
                    for goal in goals {
                        for mask in 0u8..64 {
                            let answers = UserProfile {
                                degree: Some(if mask % 2 == 0 { Degree::Master } else { Degree::Associate }),
                                career_goal: Some(goal.to_string()),
                                has_publications: Some(mask & 1 != 0),
                                has_projects: Some(mask & 2 != 0),
                                has_certifications: Some(mask & 4 != 0),
                                has_achievements: Some(mask & 8 != 0),
                                has_licenses: Some(mask & 16 != 0),
                                has_portfolio: Some(mask & 32 != 0),
                                ..profile(level, "", focus)
                            };
                            let first = arrange(Some(profession), Some(&answers));
                            assert_well_formed(&first, profession);
                            for section in &first[1..] {
                                let optional = matches!(
                                    section,
                                    Publications | Projects | Certifications | Achievements | Licenses | Portfolio
                                );
                                if optional {
                                    let flags = EffectiveProfile::resolve(Some(&answers)).flags;
                                    assert!(flags.is_flagged(section), "{} unrequested in {:?}", section, first);
                                }
                            }
                            assert_eq!(first, arrange(Some(profession), Some(&answers)));
                        }
                    }
                }
            }
        }
    }
}
