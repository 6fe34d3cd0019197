//! Postman collection interchange codec.
//!
//! Loading is all-or-nothing: a document is decoded into a fresh
//! [`Collection`] and nothing is returned unless the whole document is
//! usable. Inside a usable document, malformed entries (items, headers,
//! variables, auth attributes, body fields) are skipped one by one and logged.
//!
//! Saving always writes the v2.1 layout.

mod emit;
mod parse;
mod schema;
mod url;

use std::fs;
use std::io::{Read, Write};
use std::path::Path;

use quire_domain::{Collection, Settings};
use serde_json::Value;
use tracing::debug;

use crate::serialization::{SerializationError, to_json};
use schema::WireCollection;

/// Limits and formatting used by the codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterchangeConfig {
    /// Largest accepted document, in bytes.
    pub max_file_size: usize,
    /// Deepest accepted folder nesting; deeper documents are rejected.
    pub max_depth: usize,
    /// Indent saved documents.
    pub pretty: bool,
}

impl Default for InterchangeConfig {
    fn default() -> Self {
        Self::from(&Settings::default())
    }
}

impl From<&Settings> for InterchangeConfig {
    fn from(settings: &Settings) -> Self {
        Self {
            max_file_size: settings.max_file_size,
            max_depth: settings.max_depth,
            pretty: settings.prettify_collections_json,
        }
    }
}

impl InterchangeConfig {
    /// Returns a copy with `pretty` replaced.
    #[must_use]
    pub const fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

/// Errors raised while loading or saving a collection document.
#[derive(Debug, thiserror::Error)]
pub enum InterchangeError {
    /// The document is not JSON.
    #[error("invalid JSON: {0}")]
    InvalidJson(String),

    /// The top-level `item` array is missing or not an array.
    #[error("collection has no top-level item array")]
    MissingItems,

    /// The document is JSON but its top level cannot be read as a collection.
    #[error("invalid collection format: {0}")]
    InvalidFormat(String),

    /// Folders nest deeper than the configured limit.
    #[error("collection nests deeper than {max} levels")]
    TooDeep {
        /// Configured limit
        max: usize,
    },

    /// The document is larger than the configured limit.
    #[error("collection is {size} bytes, limit is {max}")]
    FileTooLarge {
        /// Actual size (or a lower bound when streaming)
        size: u64,
        /// Configured limit
        max: u64,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error on save.
    #[error("serialization error: {0}")]
    Serialization(#[from] SerializationError),
}

fn too_large(size: usize, config: &InterchangeConfig) -> InterchangeError {
    InterchangeError::FileTooLarge {
        size: u64::try_from(size).unwrap_or(u64::MAX),
        max: u64::try_from(config.max_file_size).unwrap_or(u64::MAX),
    }
}

/// Decodes a collection document held in memory.
///
/// # Errors
///
/// Returns an error if the document exceeds the size or depth limit, is not
/// JSON, or lacks the top-level `item` array.
pub fn load_slice(
    bytes: &[u8],
    config: &InterchangeConfig,
) -> Result<Collection, InterchangeError> {
    if bytes.len() > config.max_file_size {
        return Err(too_large(bytes.len(), config));
    }

    let document: Value =
        serde_json::from_slice(bytes).map_err(|e| InterchangeError::InvalidJson(e.to_string()))?;
    if !document.get("item").is_some_and(Value::is_array) {
        return Err(InterchangeError::MissingItems);
    }
    let wire: WireCollection = serde_json::from_value(document)
        .map_err(|e| InterchangeError::InvalidFormat(e.to_string()))?;

    let collection = parse::collection(wire, config.max_depth)?;
    debug!(
        name = %collection.name,
        items = collection.item_count(),
        "Collection decoded"
    );
    Ok(collection)
}

/// Decodes a collection document from a string.
///
/// # Errors
///
/// See [`load_slice`].
pub fn load_str(json: &str, config: &InterchangeConfig) -> Result<Collection, InterchangeError> {
    load_slice(json.as_bytes(), config)
}

/// Decodes a collection document from a stream.
///
/// At most one byte past the size limit is read.
///
/// # Errors
///
/// See [`load_slice`]; read failures are returned as `Io`.
pub fn load_reader<R: Read>(
    reader: R,
    config: &InterchangeConfig,
) -> Result<Collection, InterchangeError> {
    let limit = u64::try_from(config.max_file_size)
        .unwrap_or(u64::MAX)
        .saturating_add(1);
    let mut bytes = Vec::new();
    reader.take(limit).read_to_end(&mut bytes)?;
    load_slice(&bytes, config)
}

/// Decodes a collection file.
///
/// # Errors
///
/// See [`load_slice`]; a missing or unreadable file is returned as `Io`.
pub fn load_file(path: &Path, config: &InterchangeConfig) -> Result<Collection, InterchangeError> {
    let size = fs::metadata(path)?.len();
    if !usize::try_from(size).is_ok_and(|size| size <= config.max_file_size) {
        return Err(InterchangeError::FileTooLarge {
            size,
            max: u64::try_from(config.max_file_size).unwrap_or(u64::MAX),
        });
    }
    load_reader(fs::File::open(path)?, config)
}

/// Encodes a collection as a v2.1 document.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn save_string(
    collection: &Collection,
    config: &InterchangeConfig,
) -> Result<String, InterchangeError> {
    Ok(to_json(&emit::collection(collection), config.pretty)?)
}

/// Encodes a collection into a stream.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn save_writer<W: Write>(
    mut writer: W,
    collection: &Collection,
    config: &InterchangeConfig,
) -> Result<(), InterchangeError> {
    let json = save_string(collection, config)?;
    writer.write_all(json.as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Encodes a collection into a file, replacing its contents.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn save_file(
    path: &Path,
    collection: &Collection,
    config: &InterchangeConfig,
) -> Result<(), InterchangeError> {
    let json = save_string(collection, config)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use quire_domain::{Item, Request};

    fn config() -> InterchangeConfig {
        InterchangeConfig::default()
    }

    #[test]
    fn test_config_follows_settings() {
        let settings = Settings {
            prettify_collections_json: false,
            max_file_size: 10,
            max_depth: 3,
        };
        assert_eq!(
            InterchangeConfig::from(&settings),
            InterchangeConfig {
                max_file_size: 10,
                max_depth: 3,
                pretty: false
            }
        );
    }

    #[test]
    fn test_invalid_json_is_rejected() {
        assert!(matches!(
            load_str("{\"item\": [", &config()),
            Err(InterchangeError::InvalidJson(_))
        ));
    }

    #[test]
    fn test_missing_or_non_array_item_is_rejected() {
        for doc in [r#"{"info": {"name": "x"}}"#, r#"{"item": {}}"#, "[]"] {
            assert!(matches!(
                load_str(doc, &config()),
                Err(InterchangeError::MissingItems)
            ));
        }
    }

    #[test]
    fn test_bad_info_is_invalid_format() {
        assert!(matches!(
            load_str(r#"{"info": "nope", "item": []}"#, &config()),
            Err(InterchangeError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_too_deep_document_is_rejected_whole() {
        let mut doc = r#"{"name": "leaf", "request": "http://h/deep"}"#.to_string();
        for level in 0..5 {
            doc = format!(r#"{{"name": "f{level}", "item": [{doc}]}}"#);
        }
        let doc = format!(r#"{{"info": {{"name": "deep"}}, "item": [{doc}]}}"#);

        let shallow = InterchangeConfig {
            max_depth: 4,
            ..config()
        };
        assert!(matches!(
            load_str(&doc, &shallow),
            Err(InterchangeError::TooDeep { max: 4 })
        ));

        let loaded = load_str(&doc, &config()).unwrap();
        let saved = save_string(&loaded, &config()).unwrap();
        assert!(saved.contains("http://h/deep"));
    }

    #[test]
    fn test_size_limit_applies_to_streams() {
        let limited = InterchangeConfig {
            max_file_size: 8,
            ..config()
        };
        let doc = br#"{"item": []}"#;
        assert!(matches!(
            load_reader(&doc[..], &limited),
            Err(InterchangeError::FileTooLarge { size: 9, max: 8 })
        ));
        assert!(load_reader(&doc[..], &config()).is_ok());
    }

    #[test]
    fn test_compact_save_is_single_line() {
        let mut collection = Collection::new("Demo");
        collection.add_item(Item::request("r", Request::get("http://h")));

        let compact = save_string(&collection, &config().with_pretty(false)).unwrap();
        assert_eq!(compact.lines().count(), 1);

        let pretty = save_string(&collection, &config()).unwrap();
        assert!(pretty.lines().count() > 1);
        assert_eq!(load_str(&compact, &config()).unwrap().items, collection.items);
    }

    #[test]
    fn test_save_writer_round_trip() {
        let mut collection = Collection::new("Stream");
        collection.postman_id = Some("fixed".to_string());
        let mut buffer = Vec::new();
        save_writer(&mut buffer, &collection, &config()).unwrap();

        let loaded = load_reader(buffer.as_slice(), &config()).unwrap();
        assert_eq!(loaded, collection);
    }
}
