//! Input manager for loading résumés, profiles and profession tables

use crate::error::{CvEngineError, Result};
use crate::input::decoder::{DocumentDecoder, JsonDecoder, TomlDecoder};
use crate::input::file_detector::FileType;
use crate::model::{ProfessionTable, ResumeData, UserProfile};
use log::{debug, info};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::path::Path;
use tokio::fs;

pub struct InputManager {
    cache: HashMap<String, String>,
    enable_cache: bool,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    /// Raw contents of a JSON, TOML or plain-text file
    pub async fn read_text(&mut self, path: &Path) -> Result<String> {
        let path_str = path.to_string_lossy().to_string();

        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(&path_str) {
                debug!("Using cached text for: {}", path.display());
                return Ok(cached_text.clone());
            }
        }

        if !path.exists() {
            return Err(CvEngineError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        if self.detect_file_type(path)? == FileType::Unknown {
            return Err(CvEngineError::UnsupportedFormat(format!(
                "Unsupported file type for: {}",
                path.display()
            )));
        }

        info!("Reading {}", path.display());
        let text = fs::read_to_string(path).await?;

        if self.enable_cache {
            self.cache.insert(path_str, text.clone());
        }

        Ok(text)
    }

    /// Decode a JSON or TOML document by extension
    pub async fn load_document<T: DeserializeOwned>(&mut self, path: &Path) -> Result<T> {
        let file_type = self.detect_file_type(path)?;
        if !file_type.is_document() {
            return Err(CvEngineError::UnsupportedFormat(format!(
                "Expected a .json or .toml document: {}",
                path.display()
            )));
        }

        let text = self.read_text(path).await?;
        match file_type {
            FileType::Toml => TomlDecoder.decode(&text, path),
            _ => JsonDecoder.decode(&text, path),
        }
    }

    pub async fn load_resume(&mut self, path: &Path) -> Result<ResumeData> {
        self.load_document(path).await
    }

    pub async fn load_profile(&mut self, path: &Path) -> Result<UserProfile> {
        self.load_document(path).await
    }

    pub async fn load_profession_table(&mut self, path: &Path) -> Result<ProfessionTable> {
        let table: ProfessionTable = self.load_document(path).await?;
        if table.is_empty() {
            return Err(CvEngineError::InvalidInput(format!(
                "Profession table has no professions: {}",
                path.display()
            )));
        }
        info!("Loaded {} professions from {}", table.len(), path.display());
        Ok(table)
    }

    fn detect_file_type(&self, path: &Path) -> Result<FileType> {
        FileType::from_path(path).ok_or_else(|| {
            CvEngineError::InvalidInput(format!("File has no extension: {}", path.display()))
        })
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[tokio::test]
    async fn test_text_is_cached_per_path() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "job.txt", "Senior Rust engineer");
        let mut manager = InputManager::new();

        assert_eq!(manager.read_text(&path).await.unwrap(), "Senior Rust engineer");
        std::fs::write(&path, "changed").unwrap();
        assert_eq!(manager.read_text(&path).await.unwrap(), "Senior Rust engineer");
        assert_eq!(manager.cache_size(), 1);

        manager.clear_cache();
        assert_eq!(manager.read_text(&path).await.unwrap(), "changed");
    }

    #[tokio::test]
    async fn test_cache_can_be_disabled() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "job.md", "first");
        let mut manager = InputManager::new().with_cache(false);

        manager.read_text(&path).await.unwrap();
        std::fs::write(&path, "second").unwrap();
        assert_eq!(manager.read_text(&path).await.unwrap(), "second");
        assert_eq!(manager.cache_size(), 0);
    }

    #[tokio::test]
    async fn test_missing_file_is_invalid_input() {
        let mut manager = InputManager::new();
        let result = manager.load_resume(Path::new("/definitely/not/here.json")).await;
        assert!(matches!(result, Err(CvEngineError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_unsupported_extension() {
        let dir = TempDir::new().unwrap();
        let pdf = write(&dir, "cv.pdf", "%PDF-1.7");
        let txt = write(&dir, "cv.txt", "{}");
        let mut manager = InputManager::new();

        assert!(matches!(manager.read_text(&pdf).await, Err(CvEngineError::UnsupportedFormat(_))));
        assert!(matches!(manager.load_resume(&txt).await, Err(CvEngineError::UnsupportedFormat(_))));
    }

    #[tokio::test]
    async fn test_load_profile_from_toml() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "profile.toml", "experienceLevel = \"6-10\"\nfocusArea = \"skills\"\n");
        let mut manager = InputManager::new();

        let profile = manager.load_profile(&path).await.unwrap();
        assert!(profile.experience_level.is_some());
        assert!(profile.focus_area.is_some());
    }

    #[tokio::test]
    async fn test_empty_profession_table_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "professions.json", r#"{"professions": []}"#);
        let mut manager = InputManager::new();

        assert!(matches!(
            manager.load_profession_table(&path).await,
            Err(CvEngineError::InvalidInput(_))
        ));
    }
}
