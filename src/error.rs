//! Error handling for the cv engine
//!
//! The arrangement and scoring engines never fail. These errors come from
//! the shell around them: loading documents, reading configuration and
//! rendering reports.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CvEngineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, CvEngineError>;

impl From<toml::de::Error> for CvEngineError {
    fn from(err: toml::de::Error) -> Self {
        CvEngineError::TomlParse(err.to_string())
    }
}
