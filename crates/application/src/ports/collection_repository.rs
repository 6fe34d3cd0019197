//! Collection repository port
//!
//! Defines the interface for reading and writing collection documents.

use async_trait::async_trait;
use std::path::Path;

use quire_domain::Collection;

/// Errors that can occur during collection persistence.
#[derive(Debug, thiserror::Error)]
pub enum CollectionError {
    /// No document at the given location.
    #[error("Collection not found: {0}")]
    NotFound(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not a valid collection.
    #[error("Invalid collection: {0}")]
    Invalid(String),

    /// The document exceeds the configured size limit.
    #[error("Collection is {size} bytes, limit is {limit}")]
    TooLarge {
        /// Actual size in bytes.
        size: u64,
        /// Configured limit in bytes.
        limit: u64,
    },
}

/// Repository trait for collection documents.
///
/// A failed `load` must not yield a partially decoded collection.
#[async_trait]
pub trait CollectionRepository: Send + Sync {
    /// Loads the collection stored at `path`.
    ///
    /// # Errors
    /// Returns `CollectionError::NotFound` if nothing exists at `path`, or
    /// `CollectionError::Invalid` if the document cannot be decoded.
    async fn load(&self, path: &Path) -> Result<Collection, CollectionError>;

    /// Writes `collection` to `path`, indented when `pretty` is set.
    ///
    /// # Errors
    /// Returns an error if the document cannot be written.
    async fn save(
        &self,
        path: &Path,
        collection: &Collection,
        pretty: bool,
    ) -> Result<(), CollectionError>;
}
