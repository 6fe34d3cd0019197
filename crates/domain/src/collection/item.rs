//! Collection item types

use serde::{Deserialize, Serialize};

use crate::auth::Auth;
use crate::environment::Variable;
use crate::request::Request;

/// What an item holds: sub-items or a single request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ItemKind {
    /// A folder containing other items
    Folder(Vec<Item>),
    /// A request definition
    Request(Request),
}

/// A folder or request inside a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Display name
    pub name: String,
    /// Own authorization, `None` when the document had none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<Auth>,
    /// Item-level variables
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variables: Vec<Variable>,
    /// Folder children or request
    pub kind: ItemKind,
}

impl Item {
    /// Creates a folder.
    #[must_use]
    pub fn folder(name: impl Into<String>, children: Vec<Self>) -> Self {
        Self {
            name: name.into(),
            auth: None,
            variables: Vec::new(),
            kind: ItemKind::Folder(children),
        }
    }

    /// Creates a request item.
    #[must_use]
    pub fn request(name: impl Into<String>, request: Request) -> Self {
        Self {
            name: name.into(),
            auth: None,
            variables: Vec::new(),
            kind: ItemKind::Request(request),
        }
    }

    /// Attaches an auth.
    #[must_use]
    pub fn with_auth(mut self, auth: Auth) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Attaches a variable.
    #[must_use]
    pub fn with_variable(mut self, variable: Variable) -> Self {
        self.variables.push(variable);
        self
    }

    /// Returns the children of a folder, or an empty slice for a request.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        match &self.kind {
            ItemKind::Folder(children) => children,
            ItemKind::Request(_) => &[],
        }
    }

    /// Returns the request of a request item.
    #[must_use]
    pub const fn as_request(&self) -> Option<&Request> {
        match &self.kind {
            ItemKind::Request(request) => Some(request),
            ItemKind::Folder(_) => None,
        }
    }

    /// Returns true for folders.
    #[must_use]
    pub const fn is_folder(&self) -> bool {
        matches!(self.kind, ItemKind::Folder(_))
    }
}

/// Interchange schema version a collection was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SchemaVersion {
    /// v2.0.0
    #[serde(rename = "2.0")]
    V2_0,
    /// v2.1.0
    #[default]
    #[serde(rename = "2.1")]
    V2_1,
}

impl SchemaVersion {
    /// Schema URL written into `info.schema`.
    #[must_use]
    pub const fn url(self) -> &'static str {
        match self {
            Self::V2_0 => "https://schema.getpostman.com/json/collection/v2.0.0/collection.json",
            Self::V2_1 => "https://schema.getpostman.com/json/collection/v2.1.0/collection.json",
        }
    }

    /// Detects the version from an `info.schema` URL; unknown URLs are v2.1.
    #[must_use]
    pub fn from_url(url: &str) -> Self {
        if url.contains("v2.0") {
            Self::V2_0
        } else {
            Self::V2_1
        }
    }
}

/// A parsed collection before it is flattened into a tree.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Collection {
    /// Collection name
    pub name: String,
    /// `info._postman_id`, when the document carried one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postman_id: Option<String>,
    /// Version the document declared
    #[serde(default)]
    pub schema: SchemaVersion,
    /// Top-level authorization; `inherit` when the document had none
    #[serde(default)]
    pub auth: Auth,
    /// Collection-level variables
    #[serde(default)]
    pub variables: Vec<Variable>,
    /// Root items
    #[serde(default)]
    pub items: Vec<Item>,
}

impl Collection {
    /// Creates an empty collection.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Adds an item to the collection root.
    pub fn add_item(&mut self, item: Item) {
        self.items.push(item);
    }

    /// Returns the total number of requests in the collection (recursive).
    #[must_use]
    pub fn request_count(&self) -> usize {
        fn count_in_items(items: &[Item]) -> usize {
            items.iter().fold(0, |acc, item| {
                acc + match &item.kind {
                    ItemKind::Request(_) => 1,
                    ItemKind::Folder(children) => count_in_items(children),
                }
            })
        }
        count_in_items(&self.items)
    }

    /// Returns the number of items at every level, folders included.
    #[must_use]
    pub fn item_count(&self) -> usize {
        fn count_in_items(items: &[Item]) -> usize {
            items
                .iter()
                .map(|item| 1 + count_in_items(item.children()))
                .sum()
        }
        count_in_items(&self.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthType;
    use pretty_assertions::assert_eq;

    fn sample() -> Collection {
        let mut collection = Collection::new("Test");
        collection.add_item(Item::request("Health", Request::get("http://h/health")));
        collection.add_item(Item::folder(
            "Users",
            vec![
                Item::request("List", Request::get("http://h/users")),
                Item::folder(
                    "Admin",
                    vec![Item::request("Create", Request::post("http://h/users"))],
                ),
            ],
        ));
        collection
    }

    #[test]
    fn test_counts() {
        let collection = sample();
        assert_eq!(collection.request_count(), 3);
        assert_eq!(collection.item_count(), 5);
    }

    #[test]
    fn test_new_collection_inherits_auth() {
        let collection = Collection::new("API");
        assert_eq!(collection.auth.auth_type, AuthType::Inherit);
        assert_eq!(collection.schema, SchemaVersion::V2_1);
    }

    #[test]
    fn test_item_accessors() {
        let collection = sample();
        let folder = &collection.items[1];
        assert!(folder.is_folder());
        assert_eq!(folder.children().len(), 2);
        assert!(folder.as_request().is_none());
        assert!(collection.items[0].children().is_empty());
    }

    #[test]
    fn test_schema_from_url() {
        assert_eq!(
            SchemaVersion::from_url(SchemaVersion::V2_0.url()),
            SchemaVersion::V2_0
        );
        assert_eq!(SchemaVersion::from_url(""), SchemaVersion::V2_1);
    }
}
