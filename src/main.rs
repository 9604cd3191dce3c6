//! cv-engine: résumé section arrangement and scoring

use clap::Parser;
use cv_engine::cli::{self, Cli, Commands, ConfigAction};
use cv_engine::config::{Config, OutputFormat};
use cv_engine::engine::{check_ats_keywords, check_resume_length_with};
use cv_engine::error::{CvEngineError, Result};
use cv_engine::export::build_export_request;
use cv_engine::input::InputManager;
use cv_engine::model::{ProfessionTable, ResumeData, UserProfile};
use cv_engine::output::{save_report_to_file, suggest_filename, ArrangementReport, ReportGenerator, ScoreReport};
use log::{error, info};
use std::path::{Path, PathBuf};
use std::process;

const DOCUMENT_EXTENSIONS: [&str; 2] = ["json", "toml"];
const JOB_EXTENSIONS: [&str; 3] = ["txt", "md", "markdown"];

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, config_path).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: PathBuf) -> Result<()> {
    let mut input_manager = InputManager::new();

    match command {
        Commands::Arrange {
            profession,
            profile,
            output,
            detailed,
            save,
        } => {
            let format = output_format(output.as_deref(), &config)?;
            let table = profession_table(&mut input_manager, &config).await?;
            let profession = cli::lookup_profession(&table, &profession);
            let profile = load_profile(&mut input_manager, profile.as_deref()).await?;

            let report = ArrangementReport::build(profession.as_ref(), profile.as_ref());
            info!("Arranged {} sections", report.sections.len());
            let save = save_target(save, format, report.profession_id.as_deref().unwrap_or("arrangement"));

            let generator = report_generator(&config, detailed || config.output.detailed, save.is_some());
            let rendered = generator.generate_arrangement_report(&report, format)?;
            emit(&rendered, save.as_deref())?;
        }

        Commands::Score {
            resume,
            profession,
            job,
            detailed,
            output,
            save,
        } => {
            let format = output_format(output.as_deref(), &config)?;
            let cv = load_resume(&mut input_manager, &resume).await?;

            let profession = match profession {
                Some(value) => {
                    let table = profession_table(&mut input_manager, &config).await?;
                    cli::lookup_profession(&table, &value)
                }
                None => None,
            };

            let job_text = match &job {
                Some(path) => Some(read_job(&mut input_manager, path).await?),
                None => None,
            };

            let report = ScoreReport::build(
                &cv,
                profession.as_ref(),
                job_text.as_deref(),
                &config.length,
                Some(resume.as_path()),
            );
            info!(
                "Scored {}: {}/{} ({})",
                resume.display(),
                report.score.total_score,
                report.score.max_score,
                report.score.grade
            );

            let save = save_target(save, format, &resume.to_string_lossy());
            let generator = report_generator(&config, detailed || config.output.detailed, save.is_some());
            let rendered = generator.generate_score_report(&report, format)?;
            emit(&rendered, save.as_deref())?;
        }

        Commands::Length { resume } => {
            let cv = load_resume(&mut input_manager, &resume).await?;
            let result = check_resume_length_with(&cv, &config.length);
            println!("{} words ({})", result.word_count, if result.ideal { "ideal" } else { "outside ideal range" });
            println!("{}", result.feedback);
        }

        Commands::Keywords { resume, job } => {
            let cv = load_resume(&mut input_manager, &resume).await?;
            let job_text = read_job(&mut input_manager, &job).await?;
            let result = check_ats_keywords(&cv, &job_text);

            println!("Match rate: {}%", result.match_rate);
            println!("Matched: {}", result.matched_keywords.join(", "));
            println!("Missing: {}", result.missing_keywords.join(", "));
        }

        Commands::Export {
            resume,
            profession,
            profile,
            template,
            language,
            save,
        } => {
            let cv = load_resume(&mut input_manager, &resume).await?;
            let table = profession_table(&mut input_manager, &config).await?;
            let profession = cli::lookup_profession(&table, &profession);
            let profile = load_profile(&mut input_manager, profile.as_deref()).await?;

            let request = build_export_request(
                &cv,
                profession.as_ref(),
                profile.as_ref(),
                template.as_deref().unwrap_or(&config.export.template),
                language.as_deref().unwrap_or(&config.export.language),
            );
            emit(&request.to_json()?, save.as_deref())?;
        }

        Commands::Professions => {
            let table = profession_table(&mut input_manager, &config).await?;
            println!("{} professions\n", table.len());
            for profession in &table.professions {
                let sections = profession
                    .sections
                    .as_ref()
                    .map(|sections| sections.iter().map(|s| s.as_str()).collect::<Vec<_>>().join(", "))
                    .unwrap_or_else(|| "(default order)".to_string());
                println!("  • {} ({})", profession.name, profession.id);
                println!("    {}", sections);
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("{}", toml::to_string_pretty(&config).map_err(|e| {
                    CvEngineError::Configuration(format!("Failed to serialize config: {}", e))
                })?);
            }

            Some(ConfigAction::Reset) => {
                Config::default().save_to(&config_path)?;
                println!("Configuration reset: {}", config_path.display());
            }

            Some(ConfigAction::Path) => {
                println!("{}", config_path.display());
            }
        },
    }

    Ok(())
}

fn output_format(requested: Option<&str>, config: &Config) -> Result<OutputFormat> {
    match requested {
        Some(format) => cli::parse_output_format(format).map_err(CvEngineError::InvalidInput),
        None => Ok(config.output.format),
    }
}

/// Colors are dropped when the report goes to a file
fn report_generator(config: &Config, detailed: bool, saving: bool) -> ReportGenerator {
    ReportGenerator::with_options(config.output.color_output && !saving, detailed, true, true, true)
}

async fn profession_table(input_manager: &mut InputManager, config: &Config) -> Result<ProfessionTable> {
    match &config.professions.table_path {
        Some(path) => input_manager.load_profession_table(path).await,
        None => Ok(ProfessionTable::builtin()),
    }
}

async fn load_resume(input_manager: &mut InputManager, path: &Path) -> Result<ResumeData> {
    cli::validate_file_extension(path, &DOCUMENT_EXTENSIONS)
        .map_err(|e| CvEngineError::InvalidInput(format!("Résumé file: {}", e)))?;
    input_manager.load_resume(path).await
}

async fn load_profile(input_manager: &mut InputManager, path: Option<&Path>) -> Result<Option<UserProfile>> {
    match path {
        Some(path) => {
            cli::validate_file_extension(path, &DOCUMENT_EXTENSIONS)
                .map_err(|e| CvEngineError::InvalidInput(format!("Profile file: {}", e)))?;
            Ok(Some(input_manager.load_profile(path).await?))
        }
        None => Ok(None),
    }
}

async fn read_job(input_manager: &mut InputManager, path: &Path) -> Result<String> {
    cli::validate_file_extension(path, &JOB_EXTENSIONS)
        .map_err(|e| CvEngineError::InvalidInput(format!("Job description file: {}", e)))?;
    input_manager.read_text(path).await
}

/// A directory target gets a generated file name
fn save_target(save: Option<PathBuf>, format: OutputFormat, source_name: &str) -> Option<PathBuf> {
    save.map(|path| {
        if path.is_dir() {
            path.join(suggest_filename(format, source_name, true))
        } else {
            path
        }
    })
}

fn emit(content: &str, save: Option<&Path>) -> Result<()> {
    match save {
        Some(path) => {
            save_report_to_file(content, path)?;
            info!("Saved to {}", path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}
