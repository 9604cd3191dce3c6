//! Decoding structured documents into model types

use crate::error::{CvEngineError, Result};
use serde::de::DeserializeOwned;
use std::path::Path;

pub trait DocumentDecoder {
    fn decode<T: DeserializeOwned>(&self, text: &str, path: &Path) -> Result<T>;
}

pub struct JsonDecoder;

impl DocumentDecoder for JsonDecoder {
    fn decode<T: DeserializeOwned>(&self, text: &str, path: &Path) -> Result<T> {
        serde_json::from_str(text).map_err(|e| {
            CvEngineError::InvalidInput(format!("Failed to parse JSON '{}': {}", path.display(), e))
        })
    }
}

pub struct TomlDecoder;

impl DocumentDecoder for TomlDecoder {
    fn decode<T: DeserializeOwned>(&self, text: &str, path: &Path) -> Result<T> {
        toml::from_str(text).map_err(|e| {
            CvEngineError::TomlParse(format!("'{}': {}", path.display(), e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::UserProfile;

    #[test]
    fn test_json_decoder() {
        let profile: UserProfile = JsonDecoder
            .decode(r#"{"experienceLevel": "0-2", "yearsInField": 1}"#, Path::new("p.json"))
            .unwrap();
        assert_eq!(profile.years_in_field.as_deref(), Some("1"));
    }

    #[test]
    fn test_toml_decoder() {
        let profile: UserProfile = TomlDecoder
            .decode("experienceLevel = \"10+\"\nhasPublications = true\n", Path::new("p.toml"))
            .unwrap();
        assert_eq!(profile.has_publications, Some(true));
    }

    #[test]
    fn test_decode_errors_name_the_file() {
        let err = JsonDecoder
            .decode::<UserProfile>("{not json", Path::new("broken.json"))
            .unwrap_err();
        assert!(matches!(err, CvEngineError::InvalidInput(ref msg) if msg.contains("broken.json")));

        let err = TomlDecoder
            .decode::<UserProfile>("= nope", Path::new("broken.toml"))
            .unwrap_err();
        assert!(matches!(err, CvEngineError::TomlParse(_)));
    }
}
