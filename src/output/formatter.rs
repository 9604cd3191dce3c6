//! Output formatters for score and arrangement reports

use crate::config::OutputFormat;
use crate::engine::scoring::{
    Feedback, FeedbackType, Grade, MAX_ATS_COMPATIBILITY, MAX_COMPLETENESS, MAX_CONTENT_QUALITY, MAX_FORMATTING,
    MAX_KEYWORDS,
};
use crate::error::{CvEngineError, Result};
use crate::output::report::{ArrangementReport, ScoreReport};
use askama::Template;
use colored::{Color, Colorize};
use std::path::Path;

/// Feedback items shown when the console output is not detailed
const SUMMARY_FEEDBACK_LIMIT: usize = 5;

pub trait OutputFormatter {
    fn format_score(&self, report: &ScoreReport) -> Result<String>;
    fn format_arrangement(&self, report: &ArrangementReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

pub struct HtmlFormatter {
    include_styles: bool,
}

/// Report generator that coordinates the formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
}

/// Category name, points and maximum in display order
fn category_rows(report: &ScoreReport) -> [(&'static str, u32, u32); 5] {
    let scores = &report.score.scores;
    [
        ("Completeness", scores.completeness, MAX_COMPLETENESS),
        ("ATS Compatibility", scores.ats_compatibility, MAX_ATS_COMPATIBILITY),
        ("Content Quality", scores.content_quality, MAX_CONTENT_QUALITY),
        ("Formatting", scores.formatting, MAX_FORMATTING),
        ("Keywords", scores.keywords, MAX_KEYWORDS),
    ]
}

fn grade_label(grade: Grade) -> &'static str {
    match grade {
        Grade::A => "Excellent",
        Grade::B => "Very Good",
        Grade::C => "Good",
        Grade::D => "Fair",
        Grade::F => "Needs Work",
    }
}

fn profession_label(id: Option<&str>) -> &str {
    id.unwrap_or("none")
}

const REPORT_STYLES: &str = r#"<style>
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; line-height: 1.6; color: #333; max-width: 900px; margin: 0 auto; padding: 20px; background: #f8f9fa; }
        .container { background: white; padding: 30px; border-radius: 8px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }
        .header { text-align: center; margin-bottom: 30px; border-bottom: 3px solid #007acc; padding-bottom: 20px; }
        .grade { display: inline-block; padding: 8px 16px; border-radius: 20px; font-weight: bold; color: white; margin-left: 10px; }
        .grade-a { background: #28a745; }
        .grade-b, .grade-c { background: #17a2b8; }
        .grade-d { background: #ffc107; color: #000; }
        .grade-f { background: #dc3545; }
        table { border-collapse: collapse; width: 100%; }
        th, td { text-align: left; padding: 8px; border-bottom: 1px solid #e9ecef; }
        .error { border-left: 4px solid #dc3545; }
        .warning { border-left: 4px solid #ffc107; }
        .suggestion { border-left: 4px solid #17a2b8; }
        .success { border-left: 4px solid #28a745; }
        li { padding-left: 8px; margin: 6px 0; }
        .metadata { margin-top: 30px; font-size: 0.9em; color: #6c757d; }
    </style>"#;

struct HtmlCategory {
    name: &'static str,
    score: u32,
    max: u32,
}

struct HtmlFeedback {
    kind: String,
    category: String,
    message: String,
}

struct HtmlSection {
    position: usize,
    label: String,
    weight: String,
    tip: String,
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Résumé Score Report</title>
    {% if include_styles %}{{ styles|safe }}{% endif %}
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>Résumé Score Report</h1>
            <p>Generated {{ generated_at }}</p>
            <h2>{{ total }}/{{ max }} ({{ percentage }}%) <span class="grade {{ grade_class }}">{{ grade }} · {{ grade_label }}</span></h2>
        </div>

        <h2>Category Scores</h2>
        <table>
            <tr><th>Category</th><th>Score</th></tr>
            {% for category in categories %}
            <tr><td>{{ category.name }}</td><td>{{ category.score }}/{{ category.max }}</td></tr>
            {% endfor %}
        </table>

        <h2>Feedback</h2>
        <ul>
            {% for item in feedback %}
            <li class="{{ item.kind }}"><strong>{{ item.category }}</strong>: {{ item.message }}</li>
            {% endfor %}
        </ul>

        <h2>Length</h2>
        <p>{{ word_count }} words. {{ length_feedback }}</p>

        {% if has_keywords %}
        <h2>Job Description Match</h2>
        <p><strong>Match rate:</strong> {{ match_rate }}%</p>
        <p><strong>Matched:</strong> {{ matched }}</p>
        <p><strong>Missing:</strong> {{ missing }}</p>
        {% endif %}

        <div class="metadata">
            <p>cv-engine v{{ version }} | Profession: {{ profession }}</p>
        </div>
    </div>
</body>
</html>"#, ext = "html")]
struct ScoreHtmlTemplate {
    include_styles: bool,
    styles: &'static str,
    generated_at: String,
    version: String,
    profession: String,
    total: u32,
    max: u32,
    percentage: u32,
    grade: String,
    grade_class: String,
    grade_label: &'static str,
    categories: Vec<HtmlCategory>,
    feedback: Vec<HtmlFeedback>,
    word_count: usize,
    length_feedback: String,
    has_keywords: bool,
    match_rate: u32,
    matched: String,
    missing: String,
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Section Arrangement</title>
    {% if include_styles %}{{ styles|safe }}{% endif %}
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>Section Arrangement</h1>
            <p>{{ profession }} | Generated {{ generated_at }}</p>
        </div>

        <table>
            <tr><th>#</th><th>Section</th><th>Weight</th><th>Tip</th></tr>
            {% for section in sections %}
            <tr><td>{{ section.position }}</td><td>{{ section.label }}</td><td>{{ section.weight }}</td><td>{{ section.tip }}</td></tr>
            {% endfor %}
        </table>

        <h2>Explanation</h2>
        <p><strong>{{ title_key }}</strong></p>
        <p>{{ reason_key }}</p>
        <ul>
            {% for tip in tip_keys %}
            <li>{{ tip }}</li>
            {% endfor %}
        </ul>

        <div class="metadata">
            <p>cv-engine v{{ version }}</p>
        </div>
    </div>
</body>
</html>"#, ext = "html")]
struct ArrangementHtmlTemplate {
    include_styles: bool,
    styles: &'static str,
    generated_at: String,
    version: String,
    profession: String,
    sections: Vec<HtmlSection>,
    title_key: String,
    reason_key: String,
    tip_keys: Vec<String>,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "░",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_grade_badge(&self, grade: Grade) -> String {
        let color = match grade {
            Grade::A => Color::Green,
            Grade::B => Color::BrightGreen,
            Grade::C => Color::Yellow,
            Grade::D => Color::BrightYellow,
            Grade::F => Color::Red,
        };
        let badge = format!("{} {}", grade, grade_label(grade).to_uppercase());

        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn format_feedback(&self, item: &Feedback) -> String {
        let (tag, color) = match item.kind {
            FeedbackType::Error => ("[!]", Color::Red),
            FeedbackType::Warning => ("[*]", Color::Yellow),
            FeedbackType::Suggestion => ("[-]", Color::Cyan),
            FeedbackType::Success => ("[+]", Color::Green),
        };
        format!("  {} {}: {}\n", self.colorize(tag, color), item.category, item.message)
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_score(&self, report: &ScoreReport) -> Result<String> {
        let mut output = String::new();
        let result = &report.score;

        output.push_str(&self.format_header("RÉSUMÉ SCORE", 1));
        output.push_str(&format!(
            "Generated: {} | Profession: {}\n",
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            profession_label(report.metadata.profession_id.as_deref())
        ));
        output.push_str(&format!(
            "Overall: {}/{} ({}%) {}\n",
            result.total_score,
            result.max_score,
            result.percentage,
            self.format_grade_badge(result.grade)
        ));

        output.push_str(&self.format_header("Category Scores", 2));
        for (name, points, max) in category_rows(report) {
            output.push_str(&format!("  {:<20} {:>2}/{}\n", name, points, max));
        }

        output.push_str(&self.format_header("Feedback", 2));
        let shown: Vec<&Feedback> = if self.detailed {
            result.feedback.iter().collect()
        } else {
            result
                .feedback
                .iter()
                .filter(|item| item.kind != FeedbackType::Success)
                .take(SUMMARY_FEEDBACK_LIMIT)
                .collect()
        };
        for item in &shown {
            output.push_str(&self.format_feedback(item));
        }
        let hidden = result.feedback.len() - shown.len();
        if !self.detailed && hidden > 0 {
            output.push_str(&format!("  ... {} more (use --detailed)\n", hidden));
        }

        output.push_str(&self.format_header("Length", 2));
        output.push_str(&format!("  {} words. {}\n", report.length.word_count, report.length.feedback));

        if let Some(keywords) = &report.keywords {
            output.push_str(&self.format_header("Job Description Match", 2));
            output.push_str(&format!("  Match rate: {}%\n", keywords.match_rate));
            if self.detailed {
                output.push_str(&format!("  Matched: {}\n", keywords.matched_keywords.join(", ")));
            }
            if !keywords.missing_keywords.is_empty() {
                output.push_str(&format!(
                    "  Missing: {}\n",
                    self.colorize(&keywords.missing_keywords.join(", "), Color::Yellow)
                ));
            }
        }

        Ok(output)
    }

    fn format_arrangement(&self, report: &ArrangementReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("SECTION ARRANGEMENT", 1));
        output.push_str(&format!(
            "Profession: {}\n",
            report
                .profession_name
                .as_deref()
                .unwrap_or("none (default order)")
        ));

        output.push_str(&self.format_header("Order", 2));
        for (index, row) in report.rows().iter().enumerate() {
            let weight = row.weight.map(|w| format!(" (weight {})", w)).unwrap_or_default();
            output.push_str(&format!("  {:>2}. {}{}\n", index + 1, self.colorize(&row.label, Color::Cyan), weight));
            if self.detailed {
                if let Some(tip) = &row.tip {
                    output.push_str(&format!("      {}\n", tip));
                }
            }
        }

        output.push_str(&self.format_header("Explanation", 2));
        output.push_str(&format!("  {}\n  {}\n", report.explanation.title_key, report.explanation.reason_key));
        if self.detailed {
            for tip in &report.explanation.tip_keys {
                output.push_str(&format!("  - {}\n", tip));
            }
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn to_json<T: serde::Serialize>(&self, value: &T) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(serde_json::to_string(value)?)
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_score(&self, report: &ScoreReport) -> Result<String> {
        self.to_json(report)
    }

    fn format_arrangement(&self, report: &ArrangementReport) -> Result<String> {
        self.to_json(report)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn markdown_feedback_icon(kind: FeedbackType) -> &'static str {
        match kind {
            FeedbackType::Error => "❌",
            FeedbackType::Warning => "⚠️",
            FeedbackType::Suggestion => "💡",
            FeedbackType::Success => "✅",
        }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_score(&self, report: &ScoreReport) -> Result<String> {
        let mut output = String::new();
        let result = &report.score;

        output.push_str("# Résumé Score Report\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Profession:** {}\n",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                profession_label(report.metadata.profession_id.as_deref())
            ));
            if let Some(file) = &report.metadata.resume_file {
                let name = Path::new(file)
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| file.clone());
                output.push_str(&format!("**Résumé:** `{}`\n", name));
            }
            output.push('\n');
        }

        output.push_str(&format!(
            "**Total:** {}/{} ({}%) | **Grade:** {} ({})\n\n",
            result.total_score,
            result.max_score,
            result.percentage,
            result.grade,
            grade_label(result.grade)
        ));

        output.push_str("## Category Scores\n\n");
        output.push_str("| Category | Score | Max |\n");
        output.push_str("|----------|-------|-----|\n");
        for (name, points, max) in category_rows(report) {
            output.push_str(&format!("| {} | {} | {} |\n", name, points, max));
        }
        output.push('\n');

        output.push_str("## Feedback\n\n");
        for item in &result.feedback {
            output.push_str(&format!(
                "- {} **{}**: {}\n",
                Self::markdown_feedback_icon(item.kind),
                item.category,
                item.message
            ));
        }
        output.push('\n');

        output.push_str("## Length\n\n");
        output.push_str(&format!("{} words. {}\n", report.length.word_count, report.length.feedback));

        if let Some(keywords) = &report.keywords {
            output.push_str("\n## Job Description Match\n\n");
            output.push_str(&format!("**Match rate:** {}%\n\n", keywords.match_rate));
            if !keywords.matched_keywords.is_empty() {
                output.push_str(&format!("**Matched:** {}\n\n", keywords.matched_keywords.join(", ")));
            }
            if !keywords.missing_keywords.is_empty() {
                output.push_str(&format!("**Missing:** {}\n", keywords.missing_keywords.join(", ")));
            }
        }

        Ok(output)
    }

    fn format_arrangement(&self, report: &ArrangementReport) -> Result<String> {
        let mut output = String::new();

        output.push_str("# Section Arrangement\n\n");
        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Profession:** {}\n\n",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.profession_name.as_deref().unwrap_or("none")
            ));
        }

        output.push_str("| # | Section | Weight | Tip |\n");
        output.push_str("|---|---------|--------|-----|\n");
        for (index, row) in report.rows().iter().enumerate() {
            output.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                index + 1,
                row.label,
                row.weight.map(|w| w.to_string()).unwrap_or_default(),
                row.tip.as_deref().unwrap_or("")
            ));
        }

        output.push_str("\n## Explanation\n\n");
        output.push_str(&format!("- Title: `{}`\n", report.explanation.title_key));
        output.push_str(&format!("- Reason: `{}`\n", report.explanation.reason_key));
        for tip in &report.explanation.tip_keys {
            output.push_str(&format!("- Tip: `{}`\n", tip));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool) -> Self {
        Self { include_styles }
    }

    fn render<T: Template>(template: &T) -> Result<String> {
        template
            .render()
            .map_err(|e| CvEngineError::OutputFormatting(e.to_string()))
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_score(&self, report: &ScoreReport) -> Result<String> {
        let result = &report.score;
        let (has_keywords, match_rate, matched, missing) = match &report.keywords {
            Some(k) => (true, k.match_rate, k.matched_keywords.join(", "), k.missing_keywords.join(", ")),
            None => (false, 0, String::new(), String::new()),
        };

        let template = ScoreHtmlTemplate {
            include_styles: self.include_styles,
            styles: REPORT_STYLES,
            generated_at: report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            version: report.metadata.engine_version.clone(),
            profession: profession_label(report.metadata.profession_id.as_deref()).to_string(),
            total: result.total_score,
            max: result.max_score,
            percentage: result.percentage,
            grade: result.grade.to_string(),
            grade_class: format!("grade-{}", result.grade.to_string().to_lowercase()),
            grade_label: grade_label(result.grade),
            categories: category_rows(report)
                .into_iter()
                .map(|(name, score, max)| HtmlCategory { name, score, max })
                .collect(),
            feedback: result
                .feedback
                .iter()
                .map(|item| HtmlFeedback {
                    kind: item.kind.to_string(),
                    category: item.category.to_string(),
                    message: item.message.clone(),
                })
                .collect(),
            word_count: report.length.word_count,
            length_feedback: report.length.feedback.clone(),
            has_keywords,
            match_rate,
            matched,
            missing,
        };

        Self::render(&template)
    }

    fn format_arrangement(&self, report: &ArrangementReport) -> Result<String> {
        let template = ArrangementHtmlTemplate {
            include_styles: self.include_styles,
            styles: REPORT_STYLES,
            generated_at: report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            version: report.metadata.engine_version.clone(),
            profession: report.profession_name.clone().unwrap_or_else(|| "Default order".to_string()),
            sections: report
                .rows()
                .into_iter()
                .enumerate()
                .map(|(index, row)| HtmlSection {
                    position: index + 1,
                    label: row.label,
                    weight: row.weight.map(|w| w.to_string()).unwrap_or_default(),
                    tip: row.tip.unwrap_or_default(),
                })
                .collect(),
            title_key: report.explanation.title_key.clone(),
            reason_key: report.explanation.reason_key.clone(),
            tip_keys: report.explanation.tip_keys.clone(),
        };

        Self::render(&template)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(true, false),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
            html_formatter: HtmlFormatter::new(true),
        }
    }

    pub fn with_options(
        use_colors: bool,
        detailed: bool,
        pretty_json: bool,
        include_metadata: bool,
        include_html_styles: bool,
    ) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
            html_formatter: HtmlFormatter::new(include_html_styles),
        }
    }

    fn formatter(&self, format: OutputFormat) -> &dyn OutputFormatter {
        match format {
            OutputFormat::Console => &self.console_formatter,
            OutputFormat::Json => &self.json_formatter,
            OutputFormat::Markdown => &self.markdown_formatter,
            OutputFormat::Html => &self.html_formatter,
        }
    }

    pub fn generate_score_report(&self, report: &ScoreReport, format: OutputFormat) -> Result<String> {
        self.formatter(format).format_score(report)
    }

    pub fn generate_arrangement_report(&self, report: &ArrangementReport, format: OutputFormat) -> Result<String> {
        self.formatter(format).format_arrangement(report)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: OutputFormat, source_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(source_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
        OutputFormat::Html => "html",
    };

    format!("{}_report{}.{}", base_name, timestamp_suffix, extension)
}
