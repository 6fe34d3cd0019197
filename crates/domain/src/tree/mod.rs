//! Flattened, array-backed collection tree.
//!
//! Nodes are stored in pre-order. The subtree of the node at position `p`
//! occupies exactly `p..=p + num_descendants(p)`, which lets traversal skip
//! whole subtrees in O(1) and lets removal drain one contiguous range.
//!
//! Payloads live in [`Payloads`] arenas outside the tree; a node only holds
//! slot numbers. Nodes are also addressable by a [`NodeId`] that survives
//! every structural edit, resolved through an [`IdIndex`] that is rebuilt
//! lazily after each add or remove.

mod index;
mod node;
mod payload;

pub use index::IdIndex;
pub use node::{CollectionNode, NewNode};
pub use payload::Payloads;

use std::cell::RefCell;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::auth::Auth;
use crate::collection::{Collection, Item, ItemKind, SchemaVersion};
use crate::error::TreeError;
use crate::id::{NodeId, TreeId};
use crate::request::Request;

/// Position and id of a freshly added node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddedNode {
    /// Array position right after the add
    pub index: usize,
    /// Stable id
    pub id: NodeId,
}

/// Document metadata carried along so a tree can be written back losslessly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeInfo {
    /// `info._postman_id`
    pub postman_id: Option<String>,
    /// Version the source document declared
    pub schema: SchemaVersion,
}

/// Owned copy of a request and the auth it resolves to.
///
/// Handed to the network collaborator so edits to the tree while the request
/// is in flight cannot race with it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RequestSnapshot {
    /// The request
    pub request: Request,
    /// Effective auth after walking up `inherit` links
    pub auth: Auth,
}

/// A collection flattened into a pre-order node array.
#[derive(Debug, Clone)]
pub struct CollectionTree {
    tree_id: TreeId,
    next_local: u32,
    nodes: Vec<CollectionNode>,
    index: RefCell<IdIndex>,
    info: TreeInfo,
}

impl CollectionTree {
    /// Creates a tree holding only its root node.
    ///
    /// The root gets local id 1; the next node gets 2.
    pub fn new(tree_id: TreeId, payloads: &mut Payloads, root: NewNode) -> Self {
        let slots = payloads.store(root);
        let root = CollectionNode {
            id: NodeId::root(tree_id),
            parent: None,
            num_children: 0,
            num_descendants: 0,
            name: slots.name,
            request: slots.request,
            auth: slots.auth,
            variables: slots.variables,
            dirty: false,
        };
        Self {
            tree_id,
            next_local: 2,
            nodes: vec![root],
            index: RefCell::new(IdIndex::new()),
            info: TreeInfo::default(),
        }
    }

    /// Creates a tree that is not registered in a [`CollectionDb`](crate::CollectionDb).
    pub fn standalone(payloads: &mut Payloads, root: NewNode) -> Self {
        Self::new(TreeId::STANDALONE, payloads, root)
    }

    /// Flattens `collection` into a new tree.
    ///
    /// Items are added depth-first, each folder before its children. On
    /// failure every slot allocated so far is released again.
    pub fn build_from_collection(
        tree_id: TreeId,
        payloads: &mut Payloads,
        collection: &Collection,
    ) -> Result<Self, TreeError> {
        let root = NewNode {
            name: (!collection.name.is_empty()).then(|| collection.name.clone()),
            request: None,
            auth: Some(collection.auth.clone()),
            variables: collection.variables.clone(),
        };
        let mut tree = Self::new(tree_id, payloads, root);
        tree.info = TreeInfo {
            postman_id: collection.postman_id.clone(),
            schema: collection.schema,
        };

        for item in &collection.items {
            if let Err(err) = tree.add_item(payloads, 0, item) {
                tree.remove(payloads, 0);
                return Err(err);
            }
        }
        Ok(tree)
    }

    fn add_item(
        &mut self,
        payloads: &mut Payloads,
        parent: usize,
        item: &Item,
    ) -> Result<(), TreeError> {
        let node = NewNode {
            name: (!item.name.is_empty()).then(|| item.name.clone()),
            request: item.as_request().cloned(),
            auth: item.auth.clone(),
            variables: item.variables.clone(),
        };
        let added = self.add(payloads, parent, node)?;
        for child in item.children() {
            self.add_item(payloads, added.index, child)?;
        }
        Ok(())
    }

    /// Id of the tree inside its registry.
    #[must_use]
    pub const fn tree_id(&self) -> TreeId {
        self.tree_id
    }

    /// Document metadata.
    #[must_use]
    pub const fn info(&self) -> &TreeInfo {
        &self.info
    }

    /// Replaces the document metadata.
    pub fn set_info(&mut self, info: TreeInfo) {
        self.info = info;
    }

    /// Number of nodes, root included.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True once the root itself has been removed.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in pre-order.
    #[must_use]
    pub fn nodes(&self) -> &[CollectionNode] {
        &self.nodes
    }

    /// Node at array position `index`.
    #[must_use]
    pub fn node(&self, index: usize) -> Option<&CollectionNode> {
        self.nodes.get(index)
    }

    /// Adds `node` as the last child of the node at `parent`.
    ///
    /// # Errors
    ///
    /// [`TreeError::ParentOutOfBounds`] if `parent` is not a valid position,
    /// [`TreeError::IdSpaceExhausted`] once 0xFFFF ids have been handed out.
    /// Nothing is allocated when an error is returned.
    pub fn add(
        &mut self,
        payloads: &mut Payloads,
        parent: usize,
        node: NewNode,
    ) -> Result<AddedNode, TreeError> {
        let Some(parent_node) = self.nodes.get(parent) else {
            return Err(TreeError::ParentOutOfBounds {
                index: parent,
                len: self.nodes.len(),
            });
        };
        let id = NodeId::compose(self.tree_id, self.next_local)
            .ok_or(TreeError::IdSpaceExhausted(self.tree_id))?;
        let index = parent + parent_node.num_descendants + 1;

        let slots = payloads.store(node);
        self.nodes.insert(
            index,
            CollectionNode {
                id,
                parent: Some(parent),
                num_children: 0,
                num_descendants: 0,
                name: slots.name,
                request: slots.request,
                auth: slots.auth,
                variables: slots.variables,
                dirty: false,
            },
        );
        for node in &mut self.nodes[index + 1..] {
            if let Some(p) = node.parent.as_mut().filter(|p| **p >= index) {
                *p += 1;
            }
        }

        self.nodes[parent].num_children += 1;
        let mut cursor = Some(parent);
        while let Some(i) = cursor {
            self.nodes[i].num_descendants += 1;
            cursor = self.nodes[i].parent;
        }

        self.next_local += 1;
        self.index.get_mut().invalidate();
        Ok(AddedNode { index, id })
    }

    /// Removes the node at `index` together with its whole subtree and
    /// releases their payload slots.
    ///
    /// Returns the number of nodes removed, or `None` (and does nothing) if
    /// `index` is out of bounds.
    pub fn remove(&mut self, payloads: &mut Payloads, index: usize) -> Option<usize> {
        let range = self.subtree_range(index)?;
        let removed = range.end() - range.start() + 1;
        let parent = self.nodes[index].parent;

        for node in self.nodes.drain(range) {
            payloads.release(&node);
        }
        for node in &mut self.nodes[index..] {
            if let Some(p) = node.parent.as_mut().filter(|p| **p > index) {
                *p -= removed;
            }
        }

        if let Some(parent) = parent {
            self.nodes[parent].num_children -= 1;
            let mut cursor = Some(parent);
            while let Some(i) = cursor {
                self.nodes[i].num_descendants -= removed;
                cursor = self.nodes[i].parent;
            }
        }

        self.index.get_mut().invalidate();
        Some(removed)
    }

    /// Positions covered by the subtree rooted at `index`, inclusive.
    #[must_use]
    pub fn subtree_range(&self, index: usize) -> Option<RangeInclusive<usize>> {
        self.nodes
            .get(index)
            .map(|node| index..=index + node.num_descendants)
    }

    /// Positions of the direct children of `index`, in order.
    #[must_use]
    pub fn children(&self, index: usize) -> Children<'_> {
        let remaining = self.nodes.get(index).map_or(0, |n| n.num_children);
        Children {
            nodes: &self.nodes,
            next: index + 1,
            remaining,
        }
    }

    /// Parent position of `index`.
    #[must_use]
    pub fn parent(&self, index: usize) -> Option<usize> {
        self.nodes.get(index).and_then(|n| n.parent)
    }

    /// Number of ancestors of `index`; the root has depth 0.
    #[must_use]
    pub fn depth(&self, index: usize) -> Option<usize> {
        let mut cursor = self.nodes.get(index)?.parent;
        let mut depth = 0;
        while let Some(i) = cursor {
            depth += 1;
            cursor = self.nodes[i].parent;
        }
        Some(depth)
    }

    /// Current position of the node with stable id `id`.
    #[must_use]
    pub fn node_index_by_id(&self, id: NodeId) -> Option<usize> {
        let mut index = self.index.borrow_mut();
        index.refresh(&self.nodes);
        index.get(id)
    }

    /// Node with stable id `id`.
    #[must_use]
    pub fn node_by_id(&self, id: NodeId) -> Option<&CollectionNode> {
        self.node_index_by_id(id).and_then(|i| self.nodes.get(i))
    }

    fn node_by_id_mut(&mut self, id: NodeId) -> Option<&mut CollectionNode> {
        let index = self.node_index_by_id(id)?;
        self.nodes.get_mut(index)
    }

    /// Sets the dirty flag of `id`; unknown ids are ignored.
    pub fn set_dirty(&mut self, id: NodeId, dirty: bool) {
        if let Some(node) = self.node_by_id_mut(id) {
            node.dirty = dirty;
        }
    }

    /// Dirty flag of `id`; `false` for unknown ids.
    #[must_use]
    pub fn is_dirty(&self, id: NodeId) -> bool {
        self.node_by_id(id).is_some_and(CollectionNode::is_dirty)
    }

    /// True if any node is dirty.
    #[must_use]
    pub fn has_dirty(&self) -> bool {
        self.nodes.iter().any(CollectionNode::is_dirty)
    }

    /// Clears every dirty flag.
    pub fn clear_dirty(&mut self) {
        for node in &mut self.nodes {
            node.dirty = false;
        }
    }

    /// Name of the node at `index`.
    #[must_use]
    pub fn name<'p>(&self, payloads: &'p Payloads, index: usize) -> Option<&'p str> {
        self.nodes
            .get(index)
            .and_then(|n| n.name)
            .and_then(|slot| payloads.name(slot))
    }

    /// Request of the node at `index`.
    #[must_use]
    pub fn request<'p>(&self, payloads: &'p Payloads, index: usize) -> Option<&'p Request> {
        self.nodes
            .get(index)
            .and_then(|n| n.request)
            .and_then(|slot| payloads.request(slot))
    }

    /// Auth that applies to the node at `index`.
    ///
    /// Walks towards the root while the auth is missing or `inherit`.
    /// Returns `None` when no ancestor defines one.
    #[must_use]
    pub fn effective_auth<'p>(&self, payloads: &'p Payloads, index: usize) -> Option<&'p Auth> {
        let mut cursor = Some(index);
        while let Some(i) = cursor {
            let node = self.nodes.get(i)?;
            if let Some(auth) = node.auth.and_then(|slot| payloads.auth(slot))
                && !auth.is_inherit()
            {
                return Some(auth);
            }
            cursor = node.parent;
        }
        None
    }

    /// Owned copy of the request `id` and its effective auth.
    #[must_use]
    pub fn request_snapshot(&self, payloads: &Payloads, id: NodeId) -> Option<RequestSnapshot> {
        let index = self.node_index_by_id(id)?;
        let request = self.request(payloads, index)?.clone();
        let auth = self
            .effective_auth(payloads, index)
            .cloned()
            .unwrap_or_else(Auth::none);
        Some(RequestSnapshot { request, auth })
    }

    /// Rebuilds the plain recursive structure from the tree.
    #[must_use]
    pub fn to_collection(&self, payloads: &Payloads) -> Collection {
        let Some(root) = self.nodes.first() else {
            return Collection {
                postman_id: self.info.postman_id.clone(),
                schema: self.info.schema,
                ..Collection::default()
            };
        };
        Collection {
            name: self.name(payloads, 0).unwrap_or_default().to_string(),
            postman_id: self.info.postman_id.clone(),
            schema: self.info.schema,
            auth: root
                .auth
                .and_then(|slot| payloads.auth(slot))
                .cloned()
                .unwrap_or_default(),
            variables: root
                .variables
                .and_then(|slot| payloads.variables(slot))
                .map(<[_]>::to_vec)
                .unwrap_or_default(),
            items: self
                .children(0)
                .map(|i| self.item_at(payloads, i))
                .collect(),
        }
    }

    fn item_at(&self, payloads: &Payloads, index: usize) -> Item {
        let node = &self.nodes[index];
        let kind = match self.request(payloads, index) {
            Some(request) => ItemKind::Request(request.clone()),
            None => ItemKind::Folder(
                self.children(index)
                    .map(|i| self.item_at(payloads, i))
                    .collect(),
            ),
        };
        Item {
            name: self.name(payloads, index).unwrap_or_default().to_string(),
            auth: node.auth.and_then(|slot| payloads.auth(slot)).cloned(),
            variables: node
                .variables
                .and_then(|slot| payloads.variables(slot))
                .map(<[_]>::to_vec)
                .unwrap_or_default(),
            kind,
        }
    }
}

/// Iterator over the direct children of a node.
///
/// Each step jumps over the previous child's whole subtree.
#[derive(Debug, Clone)]
pub struct Children<'a> {
    nodes: &'a [CollectionNode],
    next: usize,
    remaining: usize,
}

impl Iterator for Children<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        let index = self.next;
        let node = self.nodes.get(index)?;
        self.next = index + node.num_descendants + 1;
        self.remaining -= 1;
        Some(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::auth::AuthType;
    use crate::environment::Variable;
    use crate::request::{HttpMethod, RequestBody};
    use pretty_assertions::assert_eq;

    fn new_tree() -> (CollectionTree, Payloads) {
        let mut payloads = Payloads::new();
        let tree = CollectionTree::standalone(&mut payloads, NewNode::folder("Root"));
        (tree, payloads)
    }

    fn is_ancestor(tree: &CollectionTree, ancestor: usize, mut index: usize) -> bool {
        loop {
            if index == ancestor {
                return true;
            }
            match tree.parent(index) {
                Some(p) => index = p,
                None => return false,
            }
        }
    }

    fn assert_invariants(tree: &CollectionTree) {
        let nodes = tree.nodes();
        for p in 0..nodes.len() {
            let range = tree.subtree_range(p).unwrap();
            assert!(*range.end() < nodes.len());
            for q in 0..nodes.len() {
                assert_eq!(
                    range.contains(&q),
                    is_ancestor(tree, p, q),
                    "node {q} vs subtree of {p}"
                );
            }
            let children = nodes.iter().filter(|n| n.parent == Some(p)).count();
            assert_eq!(nodes[p].num_children, children);
            assert_eq!(tree.children(p).count(), children);
            for c in tree.children(p) {
                assert_eq!(nodes[c].parent, Some(p));
            }
        }
    }

    fn three_levels(tree: &mut CollectionTree, payloads: &mut Payloads) -> [AddedNode; 5] {
        let users = tree.add(payloads, 0, NewNode::folder("Users")).unwrap();
        let admin = tree
            .add(payloads, users.index, NewNode::folder("Admin"))
            .unwrap();
        let create = tree
            .add(
                payloads,
                admin.index,
                NewNode::request("Create", Request::post("http://h/users"))
                    .with_auth(Auth::bearer("t")),
            )
            .unwrap();
        let list = tree
            .add(
                payloads,
                users.index,
                NewNode::request("List", Request::get("http://h/users")),
            )
            .unwrap();
        let health = tree
            .add(
                payloads,
                0,
                NewNode::request("Health", Request::get("http://h/health")),
            )
            .unwrap();
        [users, admin, create, list, health]
    }

    #[test]
    fn test_root_gets_first_id() {
        let (tree, _) = new_tree();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.nodes()[0].id(), NodeId::from_raw(1));
        assert_eq!(tree.node_index_by_id(NodeId::from_raw(1)), Some(0));
    }

    #[test]
    fn test_add_places_last_child_in_pre_order() {
        let (mut tree, mut payloads) = new_tree();
        let [users, admin, create, list, health] = three_levels(&mut tree, &mut payloads);

        let names: Vec<_> = (0..tree.len())
            .map(|i| tree.name(&payloads, i).unwrap())
            .collect();
        assert_eq!(
            names,
            vec!["Root", "Users", "Admin", "Create", "List", "Health"]
        );
        assert_eq!(users.id, NodeId::from_raw(2));
        assert_eq!(health.id, NodeId::from_raw(6));
        assert_eq!(tree.node_index_by_id(admin.id), Some(2));
        assert_eq!(tree.node_index_by_id(create.id), Some(3));
        assert_eq!(tree.node_index_by_id(list.id), Some(4));
        assert_invariants(&tree);
    }

    #[test]
    fn test_add_updates_counts_along_ancestor_chain() {
        let (mut tree, mut payloads) = new_tree();
        let [users, admin, ..] = three_levels(&mut tree, &mut payloads);
        let before: Vec<_> = tree.nodes().iter().map(|n| n.num_descendants).collect();
        let admin_children = tree.node(admin.index).unwrap().num_children();

        let added = tree
            .add(&mut payloads, admin.index, NewNode::folder("Audit"))
            .unwrap();

        assert_eq!(tree.node(0).unwrap().num_descendants(), before[0] + 1);
        assert_eq!(
            tree.node(users.index).unwrap().num_descendants(),
            before[users.index] + 1
        );
        assert_eq!(
            tree.node(admin.index).unwrap().num_descendants(),
            before[admin.index] + 1
        );
        assert_eq!(
            tree.node(admin.index).unwrap().num_children(),
            admin_children + 1
        );
        assert_eq!(tree.depth(added.index), Some(3));
        assert_invariants(&tree);
    }

    #[test]
    fn test_add_rejects_bad_parent_without_side_effects() {
        let (mut tree, mut payloads) = new_tree();
        let err = tree
            .add(&mut payloads, 5, NewNode::folder("Nope"))
            .unwrap_err();
        assert_eq!(err, TreeError::ParentOutOfBounds { index: 5, len: 1 });
        assert_eq!(payloads.names().len(), 1);
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_add_fails_when_local_ids_run_out() {
        let (mut tree, mut payloads) = new_tree();
        tree.next_local = crate::id::MAX_LOCAL_ID;
        let last = tree.add(&mut payloads, 0, NewNode::default()).unwrap();
        assert_eq!(last.id.local(), crate::id::MAX_LOCAL_ID);
        assert_eq!(
            tree.add(&mut payloads, 0, NewNode::default()),
            Err(TreeError::IdSpaceExhausted(TreeId::STANDALONE))
        );
    }

    #[test]
    fn test_remove_subtree_frees_every_slot() {
        let (mut tree, mut payloads) = new_tree();
        let [users, admin, create, list, health] = three_levels(&mut tree, &mut payloads);
        let root_before = tree.node(0).unwrap().num_descendants();
        let expected = tree.node(users.index).unwrap().num_descendants() + 1;
        let create_slots = tree.node_by_id(create.id).cloned().unwrap();

        assert_eq!(tree.remove(&mut payloads, users.index), Some(expected));

        assert_eq!(tree.len(), 2);
        assert_eq!(tree.node(0).unwrap().num_descendants(), root_before - expected);
        assert_eq!(tree.node(0).unwrap().num_children(), 1);
        for id in [users.id, admin.id, create.id, list.id] {
            assert_eq!(tree.node_by_id(id), None);
        }
        assert_eq!(tree.node_index_by_id(health.id), Some(1));
        assert!(!payloads.requests().is_alive(create_slots.request_slot().unwrap()));
        assert!(!payloads.auths().is_alive(create_slots.auth_slot().unwrap()));
        assert_eq!(payloads.names().len(), 2);
        assert_eq!(payloads.requests().len(), 1);
        assert_invariants(&tree);
    }

    #[test]
    fn test_remove_out_of_bounds_is_noop() {
        let (mut tree, mut payloads) = new_tree();
        three_levels(&mut tree, &mut payloads);
        assert_eq!(tree.remove(&mut payloads, 99), None);
        assert_eq!(tree.len(), 6);
    }

    #[test]
    fn test_remove_fixes_parent_links_after_range() {
        let (mut tree, mut payloads) = new_tree();
        let a = tree.add(&mut payloads, 0, NewNode::folder("A")).unwrap();
        tree.add(&mut payloads, a.index, NewNode::folder("A1")).unwrap();
        let b = tree.add(&mut payloads, 0, NewNode::folder("B")).unwrap();
        let b1 = tree
            .add(&mut payloads, b.index, NewNode::folder("B1"))
            .unwrap();

        tree.remove(&mut payloads, a.index);
        let b_index = tree.node_index_by_id(b.id).unwrap();
        let b1_index = tree.node_index_by_id(b1.id).unwrap();
        assert_eq!(tree.parent(b1_index), Some(b_index));
        assert_invariants(&tree);
    }

    #[test]
    fn test_stable_ids_survive_unrelated_edits() {
        let (mut tree, mut payloads) = new_tree();
        let keep = tree.add(&mut payloads, 0, NewNode::folder("Keep")).unwrap();
        let mut seed: u32 = 7;
        let mut next = || {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            (seed >> 16) as usize
        };

        for round in 0..200 {
            let len = tree.len();
            if round % 3 == 2 && len > 2 {
                let victim = 1 + next() % (len - 1);
                if tree.node(victim).map(CollectionNode::id) != Some(keep.id)
                    && !is_ancestor(&tree, victim, tree.node_index_by_id(keep.id).unwrap())
                {
                    tree.remove(&mut payloads, victim);
                }
            } else {
                let parent = next() % len;
                tree.add(&mut payloads, parent, NewNode::folder(format!("n{round}")))
                    .unwrap();
            }
            assert_invariants(&tree);
            let index = tree.node_index_by_id(keep.id).unwrap();
            assert_eq!(tree.name(&payloads, index), Some("Keep"));
        }

        assert_eq!(payloads.names().len(), tree.len());
    }

    #[test]
    fn test_dirty_flags() {
        let (mut tree, mut payloads) = new_tree();
        let [users, ..] = three_levels(&mut tree, &mut payloads);
        tree.set_dirty(users.id, true);
        assert!(tree.is_dirty(users.id));
        assert!(tree.has_dirty());

        tree.set_dirty(NodeId::from_raw(999), true);
        assert!(!tree.is_dirty(NodeId::from_raw(999)));

        tree.clear_dirty();
        assert!(!tree.has_dirty());
    }

    #[test]
    fn test_children_skip_subtrees() {
        let (mut tree, mut payloads) = new_tree();
        let [users, _, _, list, health] = three_levels(&mut tree, &mut payloads);
        let root_children: Vec<_> = tree.children(0).collect();
        assert_eq!(root_children, vec![users.index, tree.node_index_by_id(health.id).unwrap()]);
        let user_children: Vec<_> = tree.children(users.index).collect();
        assert_eq!(user_children.last(), Some(&tree.node_index_by_id(list.id).unwrap()));
        assert_eq!(tree.children(42).count(), 0);
    }

    #[test]
    fn test_effective_auth_walks_inherit_links() {
        let mut payloads = Payloads::new();
        let mut tree = CollectionTree::standalone(
            &mut payloads,
            NewNode::folder("Root").with_auth(Auth::basic("u", "p")),
        );
        let folder = tree
            .add(
                &mut payloads,
                0,
                NewNode::folder("F").with_auth(Auth::inherit()),
            )
            .unwrap();
        let req = tree
            .add(
                &mut payloads,
                folder.index,
                NewNode::request("R", Request::get("http://h/")),
            )
            .unwrap();
        let own = tree
            .add(
                &mut payloads,
                folder.index,
                NewNode::request("Own", Request::get("http://h/")).with_auth(Auth::none()),
            )
            .unwrap();

        let snapshot = tree.request_snapshot(&payloads, req.id).unwrap();
        assert_eq!(snapshot.auth.auth_type, AuthType::Basic);
        assert_eq!(snapshot.request.url, "http://h/");

        let snapshot = tree.request_snapshot(&payloads, own.id).unwrap();
        assert_eq!(snapshot.auth.auth_type, AuthType::NoAuth);

        assert_eq!(tree.request_snapshot(&payloads, folder.id), None);
    }

    #[test]
    fn test_snapshot_is_independent_of_later_edits() {
        let (mut tree, mut payloads) = new_tree();
        let req = tree
            .add(
                &mut payloads,
                0,
                NewNode::request("R", Request::get("http://h/a")),
            )
            .unwrap();
        let snapshot = tree.request_snapshot(&payloads, req.id).unwrap();

        let slot = tree.node_by_id(req.id).unwrap().request_slot().unwrap();
        payloads.request_mut(slot).unwrap().set_url("http://h/b");

        assert_eq!(snapshot.request.url, "http://h/a");
        assert_eq!(snapshot.auth.auth_type, AuthType::NoAuth);
    }

    #[test]
    fn test_collection_round_trip_through_tree() {
        let mut collection = Collection::new("API");
        collection.postman_id = Some("abc".to_string());
        collection.variables.push(Variable::new("base", "http://h"));
        collection.add_item(
            Item::folder(
                "Users",
                vec![
                    Item::request("List", Request::get("{{base}}/users?page=1")),
                    Item::request(
                        "Create",
                        Request::new(HttpMethod::Post, "{{base}}/users")
                            .with_header("Content-Type", "application/json")
                            .with_body(RequestBody::json(r#"{"k":1}"#)),
                    )
                    .with_auth(Auth::bearer("{{token}}")),
                    Item::folder("Empty", Vec::new()),
                ],
            )
            .with_variable(Variable::new("scope", "users")),
        );

        let mut payloads = Payloads::new();
        let tree =
            CollectionTree::build_from_collection(TreeId::FIRST, &mut payloads, &collection)
                .unwrap();
        assert_eq!(tree.len(), 1 + collection.item_count());
        assert_eq!(tree.nodes()[1].id(), NodeId::compose(TreeId::FIRST, 2).unwrap());
        assert_invariants(&tree);

        assert_eq!(tree.to_collection(&payloads), collection);
    }

    #[test]
    fn test_to_collection_of_emptied_tree() {
        let (mut tree, mut payloads) = new_tree();
        tree.remove(&mut payloads, 0);
        assert!(tree.is_empty());
        assert!(payloads.names().is_empty());
        assert!(tree.to_collection(&payloads).items.is_empty());
    }
}
