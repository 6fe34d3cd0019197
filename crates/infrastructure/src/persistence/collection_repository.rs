//! File system based collection repository implementation.

use std::io::ErrorKind;
use std::path::Path;

use async_trait::async_trait;
use quire_application::ports::{CollectionError, CollectionRepository};
use quire_domain::Collection;
use tokio::fs;
use tracing::{debug, info};

use crate::interchange::{InterchangeConfig, InterchangeError, load_slice, save_string};

/// Reads and writes single-file collection documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSystemCollectionRepository {
    config: InterchangeConfig,
}

impl FileSystemCollectionRepository {
    /// Creates a repository using the given codec limits.
    #[must_use]
    pub const fn new(config: InterchangeConfig) -> Self {
        Self { config }
    }

    /// Codec limits in use.
    #[must_use]
    pub const fn config(&self) -> &InterchangeConfig {
        &self.config
    }
}

fn collection_error(err: InterchangeError) -> CollectionError {
    match err {
        InterchangeError::FileTooLarge { size, max } => {
            CollectionError::TooLarge { size, limit: max }
        }
        InterchangeError::Io(io) => CollectionError::Io(io),
        other => CollectionError::Invalid(other.to_string()),
    }
}

#[async_trait]
impl CollectionRepository for FileSystemCollectionRepository {
    async fn load(&self, path: &Path) -> Result<Collection, CollectionError> {
        let metadata = match fs::metadata(path).await {
            Ok(metadata) => metadata,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(CollectionError::NotFound(path.display().to_string()));
            }
            Err(err) => return Err(err.into()),
        };

        let limit = u64::try_from(self.config.max_file_size).unwrap_or(u64::MAX);
        if metadata.len() > limit {
            return Err(CollectionError::TooLarge {
                size: metadata.len(),
                limit,
            });
        }

        let bytes = fs::read(path).await?;
        let collection = load_slice(&bytes, &self.config).map_err(collection_error)?;
        info!(path = %path.display(), name = %collection.name, "Collection loaded");
        Ok(collection)
    }

    async fn save(
        &self,
        path: &Path,
        collection: &Collection,
        pretty: bool,
    ) -> Result<(), CollectionError> {
        let json = save_string(collection, &self.config.with_pretty(pretty))
            .map_err(collection_error)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        fs::write(path, json.as_bytes()).await?;
        debug!(path = %path.display(), bytes = json.len(), pretty, "Collection saved");
        Ok(())
    }
}
