//! Stable identifiers for collection trees and their nodes.
//!
//! A [`NodeId`] packs the owning tree into its high bits:
//!
//! ```text
//!  31               16 15                0
//! +-------------------+-------------------+
//! |      tree id      |     local id      |
//! +-------------------+-------------------+
//! ```
//!
//! Local ids start at 1 in every tree; 0 is never handed out, so the all-zero
//! id is reserved as "invalid". A tree that is not registered anywhere uses
//! [`TreeId::STANDALONE`], which makes its node ids equal to the local counter.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of bits the tree id is shifted left by inside a [`NodeId`].
pub const TREE_ID_SHIFT: u32 = 16;

/// Mask selecting the per-tree counter inside a [`NodeId`].
pub const LOCAL_ID_MASK: u32 = (1 << TREE_ID_SHIFT) - 1;

/// Largest local id a tree can hand out.
pub const MAX_LOCAL_ID: u32 = LOCAL_ID_MASK;

/// Identifier of one tree inside a registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TreeId(u16);

impl TreeId {
    /// Tree id used by trees living outside a registry.
    pub const STANDALONE: Self = Self(0);

    /// First id a registry hands out.
    pub const FIRST: Self = Self(1);

    /// Wraps a raw tree id.
    #[must_use]
    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn get(self) -> u16 {
        self.0
    }

    /// Returns the id following this one, if any.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(raw) => Some(Self(raw)),
            None => None,
        }
    }
}

impl fmt::Display for TreeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Globally stable identifier of a collection node.
///
/// Unlike an array position, a `NodeId` survives every insertion and removal
/// elsewhere in the tree, so UI code may hold on to it across frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// The reserved "no node" id.
    pub const INVALID: Self = Self(0);

    /// Composes an id from its owning tree and local counter.
    ///
    /// Returns `None` when `local` is 0 or does not fit in the local bits.
    #[must_use]
    pub const fn compose(tree: TreeId, local: u32) -> Option<Self> {
        if local == 0 || local > MAX_LOCAL_ID {
            return None;
        }
        Some(Self(((tree.0 as u32) << TREE_ID_SHIFT) | local))
    }

    /// Id of the root node of `tree`, the first id every tree hands out.
    #[must_use]
    pub const fn root(tree: TreeId) -> Self {
        Self(((tree.0 as u32) << TREE_ID_SHIFT) | 1)
    }

    /// Wraps a raw id, e.g. one handed back by UI code.
    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw packed value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Returns the id of the tree that owns this node.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn tree(self) -> TreeId {
        TreeId((self.0 >> TREE_ID_SHIFT) as u16)
    }

    /// Returns the per-tree counter part.
    #[must_use]
    pub const fn local(self) -> u32 {
        self.0 & LOCAL_ID_MASK
    }

    /// Returns true unless this is [`NodeId::INVALID`].
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.tree(), self.local())
    }
}
