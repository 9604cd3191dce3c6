//! Profession descriptors and the static profession table

use crate::model::section::SectionId;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use strsim::jaro_winkler;

/// Id given to professions synthesized from a free-text job title
pub const CUSTOM_PROFESSION_ID: &str = "custom";

/// Minimum Jaro-Winkler similarity for a title to resolve to a known profession
const FUZZY_NAME_THRESHOLD: f64 = 0.9;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profession {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Sections this profession uses, in table order. `None` when the
    /// descriptor had no usable list.
    #[serde(default, deserialize_with = "section_list")]
    pub sections: Option<Vec<SectionId>>,
    #[serde(default)]
    pub suggested_skills: Vec<String>,
    #[serde(default)]
    pub tips: BTreeMap<SectionId, String>,
}

impl Profession {
    pub fn new(id: impl Into<String>, name: impl Into<String>, sections: Vec<SectionId>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            sections: Some(sections),
            suggested_skills: Vec::new(),
            tips: BTreeMap::new(),
        }
    }

    pub fn with_suggested_skills(mut self, skills: &[&str]) -> Self {
        self.suggested_skills = skills.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_tips(mut self, tips: &[(SectionId, &str)]) -> Self {
        self.tips = tips
            .iter()
            .map(|(section, tip)| (section.clone(), tip.to_string()))
            .collect();
        self
    }

    /// Universal profession for a job title missing from the table
    pub fn custom(title: &str) -> Self {
        let name = match title.trim() {
            "" => "Custom".to_string(),
            trimmed => trimmed.to_string(),
        };
        Self::new(CUSTOM_PROFESSION_ID, name, SectionId::BUILT_IN.to_vec())
    }

    pub fn declares(&self, section: &SectionId) -> bool {
        self.sections
            .as_ref()
            .is_some_and(|sections| sections.contains(section))
    }

    pub fn tip(&self, section: &SectionId) -> Option<&str> {
        self.tips.get(section).map(String::as_str)
    }
}

fn section_list<'de, D>(deserializer: D) -> Result<Option<Vec<SectionId>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum MaybeList {
        List(Vec<String>),
        Other(IgnoredAny),
    }

    Ok(match MaybeList::deserialize(deserializer)? {
        MaybeList::List(names) => Some(
            names
                .iter()
                .filter_map(|name| match name.parse::<SectionId>() {
                    Ok(id) => Some(id),
                    Err(e) => {
                        log::debug!("Skipping section in profession table: {}", e);
                        None
                    }
                })
                .collect(),
        ),
        MaybeList::Other(_) => None,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfessionTable {
    #[serde(default)]
    pub professions: Vec<Profession>,
}

impl Default for ProfessionTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ProfessionTable {
    pub fn new(professions: Vec<Profession>) -> Self {
        Self { professions }
    }

    pub fn find(&self, id: &str) -> Option<&Profession> {
        let id = id.trim();
        self.professions
            .iter()
            .find(|p| p.id.eq_ignore_ascii_case(id))
    }

    /// Map a free-text job title to a profession. Falls back to a custom
    /// profession built from the title when nothing is close enough.
    pub fn resolve(&self, title: &str) -> Profession {
        if let Some(found) = self.find(title) {
            return found.clone();
        }

        let wanted = title.trim().to_lowercase();
        if let Some(found) = self
            .professions
            .iter()
            .find(|p| p.name.to_lowercase() == wanted)
        {
            return found.clone();
        }

        let best = self
            .professions
            .iter()
            .map(|p| (p, jaro_winkler(&p.name.to_lowercase(), &wanted)))
            .filter(|(_, similarity)| *similarity >= FUZZY_NAME_THRESHOLD)
            .max_by(|a, b| a.1.total_cmp(&b.1));

        match best {
            Some((profession, similarity)) => {
                log::debug!(
                    "Resolved '{}' to profession '{}' ({:.2} similarity)",
                    title,
                    profession.id,
                    similarity
                );
                profession.clone()
            }
            None => {
                log::info!("No profession matches '{}', using a custom profession", title);
                Profession::custom(title)
            }
        }
    }

    pub fn len(&self) -> usize {
        self.professions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.professions.is_empty()
    }

    /// The table shipped with the builder
    pub fn builtin() -> Self {
        use SectionId::*;

        Self::new(vec![
            Profession::new(
                "engineer",
                "Engineer",
                vec![PersonalInfo, Summary, Experience, Education, Skills, Projects, Certifications, Achievements, Licenses],
            )
            .with_suggested_skills(&[
                "AutoCAD", "MATLAB", "Project Management", "Problem Solving",
                "Technical Drawing", "Quality Assurance", "Teamwork", "Six Sigma",
            ])
            .with_tips(&[
                (Experience, "Quantify the scale of systems you designed or maintained."),
                (Projects, "List the engineering problem, your approach and the measurable outcome."),
                (Licenses, "Include PE or EIT status with the issuing state."),
            ]),
            Profession::new(
                "developer",
                "Software Developer",
                vec![PersonalInfo, Summary, Experience, Skills, Projects, Education, Certifications, Achievements, Portfolio],
            )
            .with_suggested_skills(&[
                "JavaScript", "Python", "React", "Node.js", "SQL",
                "Git", "Docker", "REST APIs", "Agile", "Testing",
            ])
            .with_tips(&[
                (Skills, "Group languages, frameworks and tools separately."),
                (Projects, "Link to repositories or live demos where possible."),
                (Experience, "Mention the stack and the impact of what you shipped."),
            ]),
            Profession::new(
                "designer",
                "Designer",
                vec![PersonalInfo, Summary, Experience, Portfolio, Skills, Education, Projects, Achievements, Certifications],
            )
            .with_suggested_skills(&[
                "Figma", "Adobe Photoshop", "Illustrator", "UI Design",
                "UX Research", "Typography", "Prototyping", "Branding",
            ])
            .with_tips(&[
                (Portfolio, "Show three to five of your strongest case studies."),
                (Skills, "Name the design tools you use daily."),
            ]),
            Profession::new(
                "doctor",
                "Doctor",
                vec![PersonalInfo, Summary, Licenses, Experience, Education, Certifications, Publications, Skills, Achievements],
            )
            .with_suggested_skills(&[
                "Patient Care", "Diagnosis", "Clinical Research", "EMR",
                "Emergency Medicine", "Communication", "Surgery",
            ])
            .with_tips(&[
                (Licenses, "List your medical license number and board certifications."),
                (Publications, "Cite peer-reviewed work in a consistent format."),
                (Experience, "Include residencies, fellowships and hospital affiliations."),
            ]),
            Profession::new(
                "nurse",
                "Nurse",
                vec![PersonalInfo, Summary, Licenses, Experience, Education, Certifications, Skills, Achievements],
            )
            .with_suggested_skills(&[
                "Patient Care", "Medication Administration", "BLS", "ACLS",
                "EMR", "Triage", "Wound Care", "Communication",
            ])
            .with_tips(&[
                (Licenses, "State your RN license and the states it is valid in."),
                (Certifications, "Keep BLS and ACLS expiry dates current."),
            ]),
            Profession::new(
                "lawyer",
                "Lawyer",
                vec![PersonalInfo, Summary, Licenses, Experience, Education, Publications, Skills, Achievements, Certifications],
            )
            .with_suggested_skills(&[
                "Legal Research", "Litigation", "Contract Drafting", "Negotiation",
                "Compliance", "Legal Writing", "Client Counseling",
            ])
            .with_tips(&[
                (Licenses, "List bar admissions with the year admitted."),
                (Experience, "Highlight notable cases or transactions."),
            ]),
            Profession::new(
                "accountant",
                "Accountant",
                vec![PersonalInfo, Summary, Experience, Certifications, Education, Skills, Licenses, Achievements],
            )
            .with_suggested_skills(&[
                "Excel", "GAAP", "Financial Reporting", "Tax Preparation",
                "Auditing", "QuickBooks", "Budgeting", "SAP",
            ])
            .with_tips(&[
                (Certifications, "Put CPA or ACCA status where recruiters see it first."),
                (Experience, "Mention portfolio size, savings found or close times reduced."),
            ]),
            Profession::new(
                "teacher",
                "Teacher",
                vec![PersonalInfo, Summary, Experience, Education, Certifications, Skills, Licenses, Achievements, Publications, Projects],
            )
            .with_suggested_skills(&[
                "Curriculum Development", "Classroom Management", "Lesson Planning",
                "Differentiated Instruction", "Assessment", "Communication", "Google Classroom",
            ])
            .with_tips(&[
                (Licenses, "Include your teaching credential and subject endorsements."),
                (Experience, "Mention grade levels, class sizes and student outcomes."),
            ]),
            Profession::new(
                "sales",
                "Sales Representative",
                vec![PersonalInfo, Summary, Experience, Achievements, Skills, Education, Certifications],
            )
            .with_suggested_skills(&[
                "CRM", "Salesforce", "Negotiation", "Lead Generation",
                "Cold Calling", "Account Management", "Pipeline Management", "Closing",
            ])
            .with_tips(&[
                (Achievements, "Lead with quota attainment and revenue numbers."),
                (Experience, "State territory, deal size and sales cycle length."),
            ]),
            Profession::new(
                "marketing",
                "Marketing Specialist",
                vec![PersonalInfo, Summary, Experience, Skills, Achievements, Education, Projects, Portfolio, Certifications],
            )
            .with_suggested_skills(&[
                "SEO", "Google Analytics", "Content Marketing", "Social Media",
                "Email Marketing", "Copywriting", "Campaign Management", "HubSpot",
            ])
            .with_tips(&[
                (Achievements, "Show campaign results as growth percentages."),
                (Portfolio, "Link to campaigns, landing pages or published content."),
            ]),
        ])
    }
}
