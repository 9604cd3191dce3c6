//! CLI interface for the cv engine

use crate::config::OutputFormat;
use crate::model::{Profession, ProfessionTable};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "cv-engine")]
#[command(about = "Résumé section arrangement and scoring")]
#[command(long_about = "Order résumé sections for a profession and questionnaire profile, and score résumé content against a fixed rubric")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Arrange résumé sections for a profession
    Arrange {
        /// Profession id or free-text job title
        #[arg(short, long)]
        profession: String,

        /// Questionnaire answers (JSON or TOML)
        #[arg(long)]
        profile: Option<PathBuf>,

        /// Output format: console, json, markdown, html
        #[arg(short, long)]
        output: Option<String>,

        /// Show section tips and explanation tips
        #[arg(short, long)]
        detailed: bool,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Score a résumé
    Score {
        /// Path to résumé document (JSON or TOML)
        #[arg(short, long)]
        resume: PathBuf,

        /// Profession id or free-text job title for keyword scoring
        #[arg(short, long)]
        profession: Option<String>,

        /// Job description to match keywords against (TXT, MD)
        #[arg(short, long)]
        job: Option<PathBuf>,

        /// Show all feedback
        #[arg(short, long)]
        detailed: bool,

        /// Output format: console, json, markdown, html
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Check résumé word count
    Length {
        #[arg(short, long)]
        resume: PathBuf,
    },

    /// Match a job description's keywords against a résumé
    Keywords {
        #[arg(short, long)]
        resume: PathBuf,

        #[arg(short, long)]
        job: PathBuf,
    },

    /// Build the PDF service request body
    Export {
        #[arg(short, long)]
        resume: PathBuf,

        #[arg(short, long)]
        profession: String,

        #[arg(long)]
        profile: Option<PathBuf>,

        /// Template style id
        #[arg(short, long)]
        template: Option<String>,

        /// Language code
        #[arg(short, long)]
        language: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// List known professions
    Professions,

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file path
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        "html" => Ok(OutputFormat::Html),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown, html",
            format
        )),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

/// Whether the argument looks like a table id rather than a job title
fn is_plain_id(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
}

/// Look up the profession named on the command line.
///
/// Known ids and titles resolve through the table. An unknown plain id
/// yields `None` so the default section order applies. Anything else is
/// treated as a job title and may become a custom profession.
pub fn lookup_profession(table: &ProfessionTable, value: &str) -> Option<Profession> {
    if let Some(found) = table.find(value) {
        return Some(found.clone());
    }
    if is_plain_id(value.trim()) {
        log::warn!("Unknown profession id '{}'", value.trim());
        return None;
    }
    Some(table.resolve(value))
}
