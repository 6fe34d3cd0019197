//! Registry of collection trees sharing one set of payload arenas.

use tracing::{debug, info};

use crate::auth::Auth;
use crate::collection::Collection;
use crate::error::TreeError;
use crate::id::{NodeId, TreeId};
use crate::request::Request;
use crate::tree::{AddedNode, CollectionNode, CollectionTree, NewNode, Payloads, RequestSnapshot};

/// Owns every open collection tree and their payloads.
///
/// Tree ids start at 1 and are never reused, so the owning tree of any
/// [`NodeId`] is recoverable from the id alone.
#[derive(Debug, Clone)]
pub struct CollectionDb {
    next_tree_id: Option<TreeId>,
    payloads: Payloads,
    trees: Vec<CollectionTree>,
}

impl Default for CollectionDb {
    fn default() -> Self {
        Self::new()
    }
}

impl CollectionDb {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            next_tree_id: Some(TreeId::FIRST),
            payloads: Payloads::new(),
            trees: Vec::new(),
        }
    }

    /// Shared payload arenas.
    #[must_use]
    pub const fn payloads(&self) -> &Payloads {
        &self.payloads
    }

    /// Mutable payload arenas, for editing a request or auth in place.
    pub const fn payloads_mut(&mut self) -> &mut Payloads {
        &mut self.payloads
    }

    /// Stores a name and returns its slot.
    pub fn add_name(&mut self, name: impl Into<String>) -> usize {
        self.payloads.add_name(name)
    }

    /// Stores an auth and returns its slot.
    pub fn add_auth(&mut self, auth: Auth) -> usize {
        self.payloads.add_auth(auth)
    }

    /// Stores a request and returns its slot.
    pub fn add_request(&mut self, request: Request) -> usize {
        self.payloads.add_request(request)
    }

    /// Name in `slot`.
    #[must_use]
    pub fn name(&self, slot: usize) -> Option<&str> {
        self.payloads.name(slot)
    }

    /// Request in `slot`.
    #[must_use]
    pub fn request(&self, slot: usize) -> Option<&Request> {
        self.payloads.request(slot)
    }

    /// Auth in `slot`.
    #[must_use]
    pub fn auth(&self, slot: usize) -> Option<&Auth> {
        self.payloads.auth(slot)
    }

    /// Registered trees, in registration order.
    #[must_use]
    pub fn trees(&self) -> &[CollectionTree] {
        &self.trees
    }

    /// Tree with id `tree_id`.
    #[must_use]
    pub fn tree(&self, tree_id: TreeId) -> Option<&CollectionTree> {
        self.trees.iter().find(|t| t.tree_id() == tree_id)
    }

    fn tree_mut(&mut self, tree_id: TreeId) -> Option<&mut CollectionTree> {
        self.trees.iter_mut().find(|t| t.tree_id() == tree_id)
    }

    /// Tree that owns node `id`.
    #[must_use]
    pub fn tree_by_node_id(&self, id: NodeId) -> Option<&CollectionTree> {
        self.tree(id.tree())
    }

    /// Current position of node `id` inside its tree.
    #[must_use]
    pub fn node_index_by_id(&self, id: NodeId) -> Option<usize> {
        self.tree_by_node_id(id)?.node_index_by_id(id)
    }

    /// Node `id`.
    #[must_use]
    pub fn node_by_id(&self, id: NodeId) -> Option<&CollectionNode> {
        self.tree_by_node_id(id)?.node_by_id(id)
    }

    /// Sets the dirty flag of `id`; unknown ids are ignored.
    pub fn set_dirty(&mut self, id: NodeId, dirty: bool) {
        if let Some(tree) = self.tree_mut(id.tree()) {
            tree.set_dirty(id, dirty);
        }
    }

    /// Dirty flag of `id`; `false` for unknown ids.
    #[must_use]
    pub fn is_dirty(&self, id: NodeId) -> bool {
        self.tree_by_node_id(id).is_some_and(|t| t.is_dirty(id))
    }

    /// Clears every dirty flag of tree `tree_id`.
    pub fn clear_dirty(&mut self, tree_id: TreeId) {
        if let Some(tree) = self.tree_mut(tree_id) {
            tree.clear_dirty();
        }
    }

    /// Flattens `collection` into a new registered tree.
    ///
    /// # Errors
    ///
    /// [`TreeError::TreeIdsExhausted`] when no tree id is left, or the error
    /// of the first failing `add`. The registry is unchanged on error.
    pub fn build_tree_from_collection(
        &mut self,
        collection: &Collection,
    ) -> Result<TreeId, TreeError> {
        let tree_id = self.next_tree_id.ok_or(TreeError::TreeIdsExhausted)?;
        let tree =
            CollectionTree::build_from_collection(tree_id, &mut self.payloads, collection)?;
        info!(
            tree = %tree_id,
            name = %collection.name,
            nodes = tree.len(),
            "Built collection tree"
        );
        self.next_tree_id = tree_id.next();
        self.trees.push(tree);
        Ok(tree_id)
    }

    /// Adds `node` as the last child of the node `parent`.
    ///
    /// # Errors
    ///
    /// [`TreeError::UnknownNode`] if no tree owns `parent` or the node is
    /// gone, otherwise whatever [`CollectionTree::add`] reports.
    pub fn add_node(&mut self, parent: NodeId, node: NewNode) -> Result<AddedNode, TreeError> {
        let Self {
            payloads, trees, ..
        } = self;
        let tree = trees
            .iter_mut()
            .find(|t| t.tree_id() == parent.tree())
            .ok_or(TreeError::UnknownNode(parent))?;
        let index = tree
            .node_index_by_id(parent)
            .ok_or(TreeError::UnknownNode(parent))?;
        tree.add(payloads, index, node)
    }

    /// Removes node `id` and its subtree, returning how many nodes went away.
    pub fn remove_node(&mut self, id: NodeId) -> Option<usize> {
        let Self {
            payloads, trees, ..
        } = self;
        let tree = trees.iter_mut().find(|t| t.tree_id() == id.tree())?;
        let index = tree.node_index_by_id(id)?;
        let removed = tree.remove(payloads, index)?;
        debug!(node = %id, removed, "Removed subtree");
        Some(removed)
    }

    /// Unregisters tree `tree_id` and releases all of its payload slots.
    ///
    /// # Errors
    ///
    /// [`TreeError::UnknownTree`] if no such tree is registered.
    pub fn remove_tree(&mut self, tree_id: TreeId) -> Result<(), TreeError> {
        let position = self
            .trees
            .iter()
            .position(|t| t.tree_id() == tree_id)
            .ok_or(TreeError::UnknownTree(tree_id))?;
        let mut tree = self.trees.remove(position);
        tree.remove(&mut self.payloads, 0);
        info!(tree = %tree_id, "Removed collection tree");
        Ok(())
    }

    /// Rebuilds the plain structure of tree `tree_id`.
    #[must_use]
    pub fn to_collection(&self, tree_id: TreeId) -> Option<Collection> {
        self.tree(tree_id)
            .map(|tree| tree.to_collection(&self.payloads))
    }

    /// Owned copy of request `id` with its effective auth.
    #[must_use]
    pub fn request_snapshot(&self, id: NodeId) -> Option<RequestSnapshot> {
        self.tree_by_node_id(id)?
            .request_snapshot(&self.payloads, id)
    }
}
