//! Open collection use case.

use std::path::Path;

use quire_domain::{CollectionDb, TreeId};
use tracing::info;

use crate::error::ApplicationResult;
use crate::ports::CollectionRepository;

/// Loads a collection document and registers it as a new tree.
pub struct OpenCollection<R> {
    repository: R,
}

impl<R: CollectionRepository> OpenCollection<R> {
    /// Creates a new `OpenCollection` use case.
    pub const fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Executes the use case.
    ///
    /// The document is fully decoded before `db` is touched, so a failed load
    /// leaves every open tree as it was.
    ///
    /// # Errors
    /// Returns an error if the document cannot be loaded or flattened.
    pub async fn execute(&self, db: &mut CollectionDb, path: &Path) -> ApplicationResult<TreeId> {
        let collection = self.repository.load(path).await?;
        let tree_id = db.build_tree_from_collection(&collection)?;
        info!(path = %path.display(), tree = %tree_id, "Opened collection");
        Ok(tree_id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::ApplicationError;
    use crate::ports::CollectionError;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use quire_domain::{Collection, Item, Request};
    use std::collections::HashMap;
    use std::path::PathBuf;

    struct MockRepository {
        documents: HashMap<PathBuf, Collection>,
    }

    #[async_trait]
    impl CollectionRepository for MockRepository {
        async fn load(&self, path: &Path) -> Result<Collection, CollectionError> {
            self.documents
                .get(path)
                .cloned()
                .ok_or_else(|| CollectionError::NotFound(path.display().to_string()))
        }

        async fn save(
            &self,
            _path: &Path,
            _collection: &Collection,
            _pretty: bool,
        ) -> Result<(), CollectionError> {
            Ok(())
        }
    }

    fn repository() -> MockRepository {
        let mut collection = Collection::new("API");
        collection.add_item(Item::request("Ping", Request::get("http://h/ping")));
        MockRepository {
            documents: HashMap::from([(PathBuf::from("api.json"), collection)]),
        }
    }

    #[tokio::test]
    async fn test_open_registers_tree() {
        let use_case = OpenCollection::new(repository());
        let mut db = CollectionDb::new();

        let tree_id = use_case
            .execute(&mut db, Path::new("api.json"))
            .await
            .unwrap();

        assert_eq!(tree_id, TreeId::FIRST);
        assert_eq!(db.tree(tree_id).map(|t| t.len()), Some(2));
    }

    #[tokio::test]
    async fn test_failed_open_leaves_db_unchanged() {
        let use_case = OpenCollection::new(repository());
        let mut db = CollectionDb::new();
        use_case
            .execute(&mut db, Path::new("api.json"))
            .await
            .unwrap();

        let result = use_case.execute(&mut db, Path::new("missing.json")).await;

        assert!(matches!(
            result,
            Err(ApplicationError::Collection(CollectionError::NotFound(_)))
        ));
        assert_eq!(db.trees().len(), 1);
        assert_eq!(db.payloads().names().len(), 2);
    }
}
