//! Forgiving field decoders for persisted documents
//!
//! Stored résumés come from a schemaless document store. A field that should
//! hold a list may hold an object, a string or null; a string field may hold
//! null. Both decode to their empty value instead of rejecting the document.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

/// Decode a sequence, treating any non-sequence value as empty
pub fn seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum MaybeSeq<T> {
        Seq(Vec<T>),
        Other(IgnoredAny),
    }

    Ok(match MaybeSeq::<T>::deserialize(deserializer)? {
        MaybeSeq::Seq(items) => items,
        MaybeSeq::Other(_) => {
            log::debug!("Expected a list, found another value; treating it as empty");
            Vec::new()
        }
    })
}

/// Decode a string, treating null or non-string values as empty
pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum MaybeString {
        Text(String),
        Other(IgnoredAny),
    }

    Ok(match MaybeString::deserialize(deserializer)? {
        MaybeString::Text(text) => text,
        MaybeString::Other(_) => String::new(),
    })
}
