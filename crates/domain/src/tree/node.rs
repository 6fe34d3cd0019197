//! Flattened tree node

use crate::auth::Auth;
use crate::environment::Variable;
use crate::id::NodeId;
use crate::request::Request;

/// One folder or request inside a [`CollectionTree`](super::CollectionTree).
///
/// Payload fields are slots in the owning [`Payloads`](super::Payloads)
/// arenas; `None` means the node carries no payload of that kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionNode {
    pub(crate) id: NodeId,
    pub(crate) parent: Option<usize>,
    pub(crate) num_children: usize,
    pub(crate) num_descendants: usize,
    pub(crate) name: Option<usize>,
    pub(crate) request: Option<usize>,
    pub(crate) auth: Option<usize>,
    pub(crate) variables: Option<usize>,
    pub(crate) dirty: bool,
}

impl CollectionNode {
    /// Stable id.
    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// Array position of the parent, `None` for the root.
    #[must_use]
    pub const fn parent(&self) -> Option<usize> {
        self.parent
    }

    /// Number of direct children.
    #[must_use]
    pub const fn num_children(&self) -> usize {
        self.num_children
    }

    /// Number of nodes in the subtree, excluding this one.
    #[must_use]
    pub const fn num_descendants(&self) -> usize {
        self.num_descendants
    }

    /// Name slot.
    #[must_use]
    pub const fn name_slot(&self) -> Option<usize> {
        self.name
    }

    /// Request slot.
    #[must_use]
    pub const fn request_slot(&self) -> Option<usize> {
        self.request
    }

    /// Auth slot.
    #[must_use]
    pub const fn auth_slot(&self) -> Option<usize> {
        self.auth
    }

    /// Variables slot.
    #[must_use]
    pub const fn variables_slot(&self) -> Option<usize> {
        self.variables
    }

    /// Whether an editor marked this node as modified.
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// True when the node holds a request.
    #[must_use]
    pub const fn is_request(&self) -> bool {
        self.request.is_some()
    }

    /// True when the node is a folder (or the collection root).
    #[must_use]
    pub const fn is_folder(&self) -> bool {
        self.request.is_none()
    }
}

/// Payload for a node about to be added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewNode {
    /// Display name
    pub name: Option<String>,
    /// Request, for request nodes
    pub request: Option<Request>,
    /// Own authorization
    pub auth: Option<Auth>,
    /// Node-level variables; an empty list allocates no slot
    pub variables: Vec<Variable>,
}

impl NewNode {
    /// A folder with the given name.
    #[must_use]
    pub fn folder(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// A request node with the given name.
    #[must_use]
    pub fn request(name: impl Into<String>, request: Request) -> Self {
        Self {
            name: Some(name.into()),
            request: Some(request),
            ..Self::default()
        }
    }

    /// Attaches an auth.
    #[must_use]
    pub fn with_auth(mut self, auth: Auth) -> Self {
        self.auth = Some(auth);
        self
    }
}
