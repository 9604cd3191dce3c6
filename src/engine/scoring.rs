//! Rule-based résumé scoring
//!
//! Five capped sub-scores add up to a total out of 100. Every rule that
//! withholds points leaves a feedback item behind so the user knows what to
//! fix. Scoring is a pure function of its inputs.

use crate::engine::matching::PhraseMatcher;
use crate::model::{Profession, ResumeData, SkillCategory, SkillItem};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MAX_SCORE: u32 = 100;
pub const MAX_COMPLETENESS: u32 = 30;
pub const MAX_ATS_COMPATIBILITY: u32 = 25;
pub const MAX_CONTENT_QUALITY: u32 = 25;
pub const MAX_FORMATTING: u32 = 10;
pub const MAX_KEYWORDS: u32 = 10;

/// Verbs recruiters expect to open an accomplishment
pub const ACTION_VERBS: [&str; 12] = [
    "led",
    "developed",
    "created",
    "managed",
    "implemented",
    "increased",
    "improved",
    "reduced",
    "achieved",
    "designed",
    "built",
    "launched",
];

const SUMMARY_MIN_CHARS: usize = 100;
const SUMMARY_STRONG_CHARS: usize = 150;
const MIN_SKILLS: usize = 5;
const MISSING_SKILLS_SHOWN: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackCategory {
    Overall,
    Completeness,
    Ats,
    Content,
    Formatting,
    Keywords,
}

impl fmt::Display for FeedbackCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FeedbackCategory::Overall => "overall",
            FeedbackCategory::Completeness => "completeness",
            FeedbackCategory::Ats => "ats",
            FeedbackCategory::Content => "content",
            FeedbackCategory::Formatting => "formatting",
            FeedbackCategory::Keywords => "keywords",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackType {
    Success,
    Warning,
    Error,
    Suggestion,
}

impl fmt::Display for FeedbackType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FeedbackType::Success => "success",
            FeedbackType::Warning => "warning",
            FeedbackType::Error => "error",
            FeedbackType::Suggestion => "suggestion",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub category: FeedbackCategory,
    #[serde(rename = "type")]
    pub kind: FeedbackType,
    pub message: String,
}

impl Feedback {
    fn new(category: FeedbackCategory, kind: FeedbackType, message: impl Into<String>) -> Self {
        Self {
            category,
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub fn from_total(total: u32) -> Self {
        match total {
            90.. => Grade::A,
            80..=89 => Grade::B,
            70..=79 => Grade::C,
            60..=69 => Grade::D,
            _ => Grade::F,
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryScores {
    pub completeness: u32,
    pub ats_compatibility: u32,
    pub content_quality: u32,
    pub formatting: u32,
    pub keywords: u32,
}

impl CategoryScores {
    pub fn total(&self) -> u32 {
        self.completeness + self.ats_compatibility + self.content_quality + self.formatting + self.keywords
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    pub total_score: u32,
    pub max_score: u32,
    pub percentage: u32,
    pub scores: CategoryScores,
    pub feedback: Vec<Feedback>,
    pub grade: Grade,
}

impl ScoreResult {
    /// Result for a missing résumé
    pub fn empty() -> Self {
        Self {
            total_score: 0,
            max_score: MAX_SCORE,
            percentage: 0,
            scores: CategoryScores::default(),
            feedback: vec![Feedback::new(
                FeedbackCategory::Overall,
                FeedbackType::Error,
                "No résumé data to score",
            )],
            grade: Grade::F,
        }
    }

    pub fn feedback_of(&self, kind: FeedbackType) -> impl Iterator<Item = &Feedback> {
        self.feedback.iter().filter(move |item| item.kind == kind)
    }
}

/// Résumé fields the rules look at, normalized once
struct ScoringInput<'a> {
    cv: &'a ResumeData,
    skills: Vec<SkillItem>,
    experience_text: String,
}

impl<'a> ScoringInput<'a> {
    fn new(cv: &'a ResumeData) -> Self {
        Self {
            cv,
            skills: cv.skill_items(),
            experience_text: cv.experience_text(),
        }
    }

    fn professional_skills(&self) -> impl Iterator<Item = &SkillItem> {
        self.skills.iter().filter(|skill| skill.category.is_professional())
    }

    fn has_summary(&self) -> bool {
        !self.cv.summary.trim().is_empty()
    }

    /// Raw length, surrounding whitespace included
    fn summary_chars(&self) -> usize {
        self.cv.summary.chars().count()
    }
}

/// Scores résumés against the fixed rubric
pub struct ResumeScorer {
    action_verbs: PhraseMatcher,
}

impl Default for ResumeScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl ResumeScorer {
    pub fn new() -> Self {
        Self {
            action_verbs: PhraseMatcher::new(ACTION_VERBS),
        }
    }

    pub fn score(&self, cv: Option<&ResumeData>, profession: Option<&Profession>) -> ScoreResult {
        let Some(cv) = cv else {
            log::warn!("Scoring requested without résumé data");
            return ScoreResult::empty();
        };

        let input = ScoringInput::new(cv);
        let mut feedback = Vec::new();

        let scores = CategoryScores {
            completeness: self.completeness(&input, &mut feedback),
            ats_compatibility: self.ats_compatibility(&input, &mut feedback),
            content_quality: self.content_quality(&input, &mut feedback),
            formatting: self.formatting(&input, &mut feedback),
            keywords: self.keywords(&input, profession, &mut feedback),
        };

        let total_score = scores.total();
        let percentage = (total_score as f64 * 100.0 / MAX_SCORE as f64).round() as u32;
        log::debug!("Scored résumé: {:?} (total {})", scores, total_score);

        feedback.insert(0, overall_feedback(total_score));

        ScoreResult {
            total_score,
            max_score: MAX_SCORE,
            percentage,
            scores,
            feedback,
            grade: Grade::from_total(total_score),
        }
    }

    fn completeness(&self, input: &ScoringInput<'_>, feedback: &mut Vec<Feedback>) -> u32 {
        use FeedbackCategory::Completeness;
        let cv = input.cv;
        let mut points = 0;

        let info = &cv.personal_info;
        if [&info.full_name, &info.email, &info.phone]
            .iter()
            .all(|field| !field.trim().is_empty())
        {
            points += 5;
        } else {
            feedback.push(Feedback::new(
                Completeness,
                FeedbackType::Error,
                "Complete your personal information: full name, email and phone are required",
            ));
        }

        if !input.has_summary() {
            feedback.push(Feedback::new(
                Completeness,
                FeedbackType::Error,
                "Add a professional summary",
            ));
        } else if input.summary_chars() >= SUMMARY_MIN_CHARS {
            points += 5;
        } else {
            points += 2;
            feedback.push(Feedback::new(
                Completeness,
                FeedbackType::Warning,
                format!("Expand your summary to at least {} characters", SUMMARY_MIN_CHARS),
            ));
        }

        if cv.experience.is_empty() {
            feedback.push(Feedback::new(
                Completeness,
                FeedbackType::Error,
                "Add at least one work experience entry",
            ));
        } else {
            let complete = cv.experience.iter().filter(|exp| exp.is_complete()).count() as u32;
            points += (complete.saturating_mul(5)).min(10);
        }

        if cv
            .education
            .iter()
            .any(|edu| !edu.degree.trim().is_empty() && !edu.institution.trim().is_empty())
        {
            points += 5;
        } else {
            feedback.push(Feedback::new(
                Completeness,
                FeedbackType::Warning,
                "Add your education with degree and institution",
            ));
        }

        match input.professional_skills().count() {
            0 => {}
            n if n < MIN_SKILLS => {
                points += 2;
                feedback.push(Feedback::new(
                    Completeness,
                    FeedbackType::Warning,
                    format!("List at least {} technical or soft skills", MIN_SKILLS),
                ));
            }
            _ => points += 5,
        }

        points.min(MAX_COMPLETENESS)
    }

    fn ats_compatibility(&self, input: &ScoringInput<'_>, feedback: &mut Vec<Feedback>) -> u32 {
        let cv = input.cv;
        let mut points = 0;

        if input.has_summary() {
            points += 5;
        }
        if !cv.experience.is_empty() {
            points += 5;
        }
        if !cv.education.is_empty() {
            points += 5;
        }
        if input.skills.iter().any(|skill| skill.category == SkillCategory::Technical) {
            points += 5;
        }

        let info = &cv.personal_info;
        if !info.email.trim().is_empty() && !info.phone.trim().is_empty() {
            points += 5;
        } else {
            feedback.push(Feedback::new(
                FeedbackCategory::Ats,
                FeedbackType::Error,
                "Include both an email address and a phone number so applicant tracking systems can parse your contact details",
            ));
        }

        points.min(MAX_ATS_COMPATIBILITY)
    }

    fn content_quality(&self, input: &ScoringInput<'_>, feedback: &mut Vec<Feedback>) -> u32 {
        use FeedbackCategory::Content;
        let text = &input.experience_text;
        let mut points = 0;

        let has_digit = text.chars().any(|c| c.is_ascii_digit());
        if has_digit && text.contains('%') {
            points += 10;
        } else if has_digit {
            points += 5;
            feedback.push(Feedback::new(
                Content,
                FeedbackType::Suggestion,
                "Express some results as percentages to show the scale of your impact",
            ));
        } else {
            feedback.push(Feedback::new(
                Content,
                FeedbackType::Warning,
                "Quantify your achievements with numbers",
            ));
        }

        let verbs = self.action_verbs.count_matched(text);
        if verbs >= 5 {
            points += 10;
        } else if verbs >= 3 {
            points += 5;
            feedback.push(Feedback::new(
                Content,
                FeedbackType::Suggestion,
                "Use a wider range of action verbs to describe your work",
            ));
        } else {
            feedback.push(Feedback::new(
                Content,
                FeedbackType::Warning,
                "Start your experience bullet points with action verbs such as led, built or improved",
            ));
        }

        if input.has_summary() && input.summary_chars() >= SUMMARY_STRONG_CHARS {
            points += 5;
        }

        points.min(MAX_CONTENT_QUALITY)
    }

    fn formatting(&self, input: &ScoringInput<'_>, feedback: &mut Vec<Feedback>) -> u32 {
        let experience = &input.cv.experience;
        let mut points: u32 = 0;

        let structured = experience
            .iter()
            .filter(|exp| exp.description.contains('•') || exp.description.contains('\n'))
            .count() as u32;
        points = points.saturating_add(structured.saturating_mul(2));

        // with no entries there are no dates to reward
        if !experience.is_empty() {
            if experience.iter().all(|exp| !exp.start_date.trim().is_empty()) {
                points += 3;
            } else {
                feedback.push(Feedback::new(
                    FeedbackCategory::Formatting,
                    FeedbackType::Warning,
                    "Add a start date to every experience entry",
                ));
            }
        }

        if experience.iter().any(|exp| !exp.location.trim().is_empty()) {
            points += 3;
        }

        points.min(MAX_FORMATTING)
    }

    fn keywords(
        &self,
        input: &ScoringInput<'_>,
        profession: Option<&Profession>,
        feedback: &mut Vec<Feedback>,
    ) -> u32 {
        let Some(profession) = profession.filter(|p| !p.suggested_skills.is_empty()) else {
            return 0;
        };

        let mut haystack: Vec<&str> = input.professional_skills().map(|skill| skill.name.as_str()).collect();
        haystack.push(&input.experience_text);
        haystack.push(&input.cv.summary);
        let haystack = haystack.join(" ");

        let matcher = PhraseMatcher::new(&profession.suggested_skills);
        let found = matcher.matches(&haystack);
        let total = found.len();
        let matched = found.iter().filter(|m| **m).count();

        if matched * 2 < total {
            let missing: Vec<&str> = profession
                .suggested_skills
                .iter()
                .zip(&found)
                .filter(|(_, hit)| !**hit)
                .map(|(skill, _)| skill.as_str())
                .take(MISSING_SKILLS_SHOWN)
                .collect();
            feedback.push(Feedback::new(
                FeedbackCategory::Keywords,
                FeedbackType::Suggestion,
                format!("Consider adding these relevant skills: {}", missing.join(", ")),
            ));
        }

        let ratio = matched as f64 / total as f64;
        (ratio * MAX_KEYWORDS as f64).min(MAX_KEYWORDS as f64).round() as u32
    }
}

fn overall_feedback(total: u32) -> Feedback {
    let (kind, message) = match total {
        90.. => (FeedbackType::Success, "Excellent! Your résumé is in great shape"),
        70..=89 => (FeedbackType::Success, "Good job! A few improvements will make your résumé stand out"),
        50..=69 => (FeedbackType::Warning, "Your résumé needs improvement in several areas"),
        _ => (FeedbackType::Error, "Your résumé needs significant work before you apply"),
    };
    Feedback::new(FeedbackCategory::Overall, kind, message)
}

/// Score a résumé with the default rubric
pub fn score(cv: Option<&ResumeData>, profession: Option<&Profession>) -> ScoreResult {
    ResumeScorer::new().score(cv, profession)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::resume::{EducationEntry, ExperienceEntry, PersonalInfo};
    use crate::model::skills::{LegacySkills, Skills};
    use crate::model::{ProfessionTable, SectionId};

    fn strong_resume() -> ResumeData {
        ResumeData {
            personal_info: PersonalInfo {
                full_name: "Grace Hopper".to_string(),
                email: "grace@example.com".to_string(),
                phone: "+1 555 0100".to_string(),
                location: "Arlington, VA".to_string(),
                ..Default::default()
            },
            summary: "Software engineer with twelve years of experience building compilers, \
                      developer tooling and large distributed systems for finance and defence customers."
                .to_string(),
            experience: vec![
                ExperienceEntry {
                    job_title: "Principal Engineer".to_string(),
                    company: "Remington Rand".to_string(),
                    location: "Philadelphia".to_string(),
                    start_date: "1949-01".to_string(),
                    description: "• Led a team of 8 engineers\n• Developed the first compiler\n• Reduced costs by 40%"
                        .to_string(),
                    ..Default::default()
                },
                ExperienceEntry {
                    job_title: "Engineer".to_string(),
                    company: "Harvard".to_string(),
                    start_date: "1944-07".to_string(),
                    description: "• Designed test suites\n• Implemented and launched Mark I programs".to_string(),
                    ..Default::default()
                },
            ],
            education: vec![EducationEntry {
                degree: "PhD".to_string(),
                institution: "Yale".to_string(),
                ..Default::default()
            }],
            skills: Skills::Legacy(LegacySkills {
                technical_skills: vec!["Python".into(), "Git".into(), "Docker".into(), "SQL".into()],
                soft_skills: vec!["Communication".into()],
                languages: vec!["English".into()],
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_absent_resume_scores_zero() {
        let result = score(None, None);
        assert_eq!(result.total_score, 0);
        assert_eq!(result.max_score, 100);
        assert_eq!(result.grade, Grade::F);
        assert_eq!(result.feedback.len(), 1);
        assert_eq!(result.feedback[0].kind, FeedbackType::Error);
    }

    #[test]
    fn test_empty_skeleton() {
        let result = score(Some(&ResumeData::default()), None);

        assert_eq!(result.total_score, 0);
        assert_eq!(result.percentage, 0);
        assert_eq!(result.grade, Grade::F);
        assert_eq!(result.scores, CategoryScores::default());
        assert_eq!(result.feedback[0].category, FeedbackCategory::Overall);
        assert_eq!(result.feedback[0].kind, FeedbackType::Error);

        let completeness: Vec<_> = result
            .feedback
            .iter()
            .filter(|item| item.category == FeedbackCategory::Completeness)
            .collect();
        // personal info, summary, experience and education; no skills costs points only
        assert_eq!(completeness.len(), 4);
        assert!(result.feedback.iter().any(|item| item.message == "Add a professional summary"));
    }

    #[test]
    fn test_strong_resume_without_profession() {
        let result = score(Some(&strong_resume()), None);

        assert_eq!(result.scores.completeness, 30);
        assert_eq!(result.scores.ats_compatibility, 25);
        // digits and %, six distinct verbs, summary >= 150 chars
        assert_eq!(result.scores.content_quality, 25);
        // two bulleted entries, all dated, one located
        assert_eq!(result.scores.formatting, 10);
        assert_eq!(result.scores.keywords, 0);
        assert_eq!(result.total_score, 90);
        assert_eq!(result.grade, Grade::A);
        assert_eq!(result.feedback[0].kind, FeedbackType::Success);
    }

    #[test]
    fn test_keywords_against_profession() {
        let profession = Profession::new("devops", "DevOps Engineer", vec![SectionId::Summary])
            .with_suggested_skills(&["Docker", "Kubernetes", "Terraform", "Python"]);
        let result = score(Some(&strong_resume()), Some(&profession));

        // Docker and Python found, so no suggestion at exactly half
        assert_eq!(result.scores.keywords, 5);
        assert!(result.feedback_of(FeedbackType::Suggestion).all(|f| f.category != FeedbackCategory::Keywords));

        let sparse = Profession::new("ops", "Ops", vec![SectionId::Summary])
            .with_suggested_skills(&["Ansible", "Kubernetes", "Docker", "Terraform", "Chef"]);
        let result = score(Some(&strong_resume()), Some(&sparse));
        assert_eq!(result.scores.keywords, 2);
        let hint = result
            .feedback
            .iter()
            .find(|f| f.category == FeedbackCategory::Keywords)
            .unwrap();
        assert_eq!(hint.message, "Consider adding these relevant skills: Ansible, Kubernetes, Terraform");
    }

    #[test]
    fn test_languages_do_not_count_as_skills() {
        let cv = ResumeData {
            skills: Skills::Legacy(LegacySkills {
                languages: vec!["English".into(), "French".into(), "German".into(), "Spanish".into(), "Italian".into()],
                ..Default::default()
            }),
            ..Default::default()
        };
        let result = score(Some(&cv), None);
        assert_eq!(result.scores.completeness, 0);
        assert_eq!(result.scores.ats_compatibility, 0);
    }

    #[test]
    fn test_only_technical_category_counts_for_ats() {
        let item = |name: &str, category: SkillCategory| SkillItem {
            name: name.to_string(),
            category,
            ..Default::default()
        };
        let mut cv = ResumeData {
            skills: Skills::Items {
                items: vec![item("React", SkillCategory::Frameworks), item("Git", SkillCategory::Tools)],
            },
            ..Default::default()
        };
        let result = score(Some(&cv), None);
        assert_eq!(result.scores.ats_compatibility, 0);
        // still counted as professional skills
        assert_eq!(result.scores.completeness, 2);

        cv.skills = Skills::Items {
            items: vec![item("Rust", SkillCategory::Technical)],
        };
        assert_eq!(score(Some(&cv), None).scores.ats_compatibility, 5);
    }

    #[test]
    fn test_summary_length_includes_whitespace() {
        let padded = ResumeData {
            summary: format!("{}{}", " ".repeat(10), "a".repeat(145)),
            ..Default::default()
        };
        let result = score(Some(&padded), None);
        assert_eq!(result.scores.completeness, 5);
        assert_eq!(result.scores.content_quality, 5);

        let blank = ResumeData {
            summary: " ".repeat(160),
            ..Default::default()
        };
        let result = score(Some(&blank), None);
        assert_eq!(result.scores.completeness, 0);
        assert_eq!(result.scores.content_quality, 0);
        assert!(result.feedback.iter().any(|item| item.message == "Add a professional summary"));
    }

    #[test]
    fn test_partial_summary_and_contact() {
        let cv = ResumeData {
            personal_info: PersonalInfo {
                full_name: "A".to_string(),
                email: "a@example.com".to_string(),
                ..Default::default()
            },
            summary: "Short summary".to_string(),
            ..Default::default()
        };
        let result = score(Some(&cv), None);

        assert_eq!(result.scores.completeness, 2);
        assert_eq!(result.scores.ats_compatibility, 5);
        assert!(result
            .feedback
            .iter()
            .any(|f| f.category == FeedbackCategory::Ats && f.kind == FeedbackType::Error));
    }

    #[test]
    fn test_numbers_without_percent() {
        let cv = ResumeData {
            experience: vec![ExperienceEntry {
                description: "Managed 3 stores".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };
        let result = score(Some(&cv), None);
        assert_eq!(result.scores.content_quality, 5);
        assert!(result
            .feedback
            .iter()
            .any(|f| f.category == FeedbackCategory::Content && f.kind == FeedbackType::Suggestion));
        // one undated entry
        assert!(result
            .feedback
            .iter()
            .any(|f| f.category == FeedbackCategory::Formatting && f.kind == FeedbackType::Warning));
    }

    #[test]
    fn test_sub_scores_are_capped() {
        let entry = ExperienceEntry {
            job_title: "Engineer".to_string(),
            company: "Acme".to_string(),
            location: "Remote".to_string(),
            start_date: "2020".to_string(),
            description: "• Led, developed, created, managed, implemented, increased 50%\n• improved reduced achieved designed built launched".to_string(),
            ..Default::default()
        };
        let mut cv = strong_resume();
        cv.experience = vec![entry; 50];
        let items: Vec<String> = (0..50).map(|i| format!("Skill {}", i)).collect();
        cv.skills = Skills::Legacy(LegacySkills {
            technical_skills: items,
            ..Default::default()
        });

        let profession = ProfessionTable::builtin().find("engineer").cloned();
        let result = score(Some(&cv), profession.as_ref());

        assert!(result.scores.completeness <= MAX_COMPLETENESS);
        assert!(result.scores.ats_compatibility <= MAX_ATS_COMPATIBILITY);
        assert!(result.scores.content_quality <= MAX_CONTENT_QUALITY);
        assert_eq!(result.scores.formatting, MAX_FORMATTING);
        assert!(result.scores.keywords <= MAX_KEYWORDS);
        assert!(result.total_score <= MAX_SCORE);
        assert_eq!(result.total_score, result.scores.total());
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let cv = strong_resume();
        let profession = ProfessionTable::builtin().find("developer").cloned();
        assert_eq!(score(Some(&cv), profession.as_ref()), score(Some(&cv), profession.as_ref()));
    }

    #[test]
    fn test_grade_boundaries() {
        assert_eq!(Grade::from_total(100), Grade::A);
        assert_eq!(Grade::from_total(90), Grade::A);
        assert_eq!(Grade::from_total(89), Grade::B);
        assert_eq!(Grade::from_total(70), Grade::C);
        assert_eq!(Grade::from_total(60), Grade::D);
        assert_eq!(Grade::from_total(59), Grade::F);
    }

    #[test]
    fn test_feedback_serializes_with_type_field() {
        let json = serde_json::to_value(score(None, None)).unwrap();
        assert_eq!(json["feedback"][0]["type"], "error");
        assert_eq!(json["feedback"][0]["category"], "overall");
        assert_eq!(json["maxScore"], 100);
        assert_eq!(json["scores"]["atsCompatibility"], 0);
        assert_eq!(json["grade"], "F");
    }
}
