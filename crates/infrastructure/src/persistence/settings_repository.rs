//! Settings persistence.
//!
//! By default settings live in the platform config directory:
//! - Linux/macOS: ~/.config/quire/settings.json
//! - Windows: %APPDATA%/quire/settings.json

use std::path::{Path, PathBuf};

use quire_domain::Settings;
use tokio::fs;
use tracing::debug;

use crate::serialization::{SerializationError, from_json_bytes, to_json_stable_bytes};

/// Error type for settings operations.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] SerializationError),

    /// Could not determine config directory.
    #[error("Could not determine config directory")]
    NoConfigDir,
}

/// Settings stored as a JSON file.
#[derive(Debug, Clone)]
pub struct FileSettingsRepository {
    path: PathBuf,
}

impl FileSettingsRepository {
    /// Uses the settings file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Uses `settings.json` in the platform config directory.
    ///
    /// # Errors
    ///
    /// Returns `NoConfigDir` if the platform has no config directory.
    pub fn in_config_dir() -> Result<Self, SettingsError> {
        dirs::config_dir()
            .map(|dir| Self::new(dir.join("quire").join("settings.json")))
            .ok_or(SettingsError::NoConfigDir)
    }

    /// Path of the settings file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads settings, falling back to defaults if the file doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load(&self) -> Result<Settings, SettingsError> {
        if !fs::try_exists(&self.path).await? {
            debug!(path = %self.path.display(), "No settings file, using defaults");
            return Ok(Settings::default());
        }

        let content = fs::read(&self.path).await?;
        Ok(from_json_bytes(&content)?)
    }

    /// Saves settings, creating the parent directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub async fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).await?;
        }

        let content = to_json_stable_bytes(settings)?;
        fs::write(&self.path, content).await?;
        Ok(())
    }
}
