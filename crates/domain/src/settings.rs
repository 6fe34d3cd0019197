//! Settings Domain Model
//!
//! Options that govern how collections are read and written.

use serde::{Deserialize, Serialize};

/// Settings that apply to every open collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Whether saved collection files are indented.
    #[serde(default = "default_prettify")]
    pub prettify_collections_json: bool,

    /// Largest collection file accepted on load, in bytes.
    #[serde(default = "default_max_file_size")]
    pub max_file_size: usize,

    /// Deepest folder nesting accepted on load.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

fn default_prettify() -> bool {
    true
}

fn default_max_file_size() -> usize {
    10 * 1024 * 1024
}

fn default_max_depth() -> usize {
    32
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            prettify_collections_json: default_prettify(),
            max_file_size: default_max_file_size(),
            max_depth: default_max_depth(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_settings() {
        let settings = Settings::default();
        assert!(settings.prettify_collections_json);
        assert_eq!(settings.max_file_size, 10_485_760);
        assert_eq!(settings.max_depth, 32);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"prettify_collections_json": false}"#).unwrap();
        assert!(!settings.prettify_collections_json);
        assert_eq!(settings.max_depth, 32);
    }
}
