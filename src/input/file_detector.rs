//! File type detection

use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Json,
    Toml,
    Text,
    Unknown,
}

impl FileType {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "json" => FileType::Json,
            "toml" => FileType::Toml,
            "txt" | "md" | "markdown" => FileType::Text,
            _ => FileType::Unknown,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
    }

    /// Structured documents the decoders understand
    pub fn is_document(self) -> bool {
        matches!(self, FileType::Json | FileType::Toml)
    }
}
