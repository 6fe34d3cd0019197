//! Save collection use case.

use std::path::Path;

use quire_domain::{CollectionDb, Settings, TreeId};
use tracing::info;

use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::CollectionRepository;

/// Writes an open tree back to a collection document.
pub struct SaveCollection<R> {
    repository: R,
    pretty: bool,
}

impl<R: CollectionRepository> SaveCollection<R> {
    /// Creates a new `SaveCollection` use case.
    pub const fn new(repository: R, settings: &Settings) -> Self {
        Self {
            repository,
            pretty: settings.prettify_collections_json,
        }
    }

    /// Saves tree `tree_id` to `path` and clears its dirty flags.
    ///
    /// Dirty flags are only cleared once the write succeeded.
    ///
    /// # Errors
    /// Returns `ApplicationError::TreeNotOpen` for an unknown tree, or the
    /// repository error if writing fails.
    pub async fn execute(
        &self,
        db: &mut CollectionDb,
        tree_id: TreeId,
        path: &Path,
    ) -> ApplicationResult<()> {
        let collection = db
            .to_collection(tree_id)
            .ok_or(ApplicationError::TreeNotOpen(tree_id))?;
        self.repository.save(path, &collection, self.pretty).await?;
        db.clear_dirty(tree_id);
        info!(path = %path.display(), tree = %tree_id, "Saved collection");
        Ok(())
    }
}
