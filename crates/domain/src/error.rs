//! Domain error types

use thiserror::Error;

use crate::id::{NodeId, TreeId};

/// Domain-level errors that can occur during validation or processing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The HTTP method is not supported.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// The authorization scheme name is not recognized.
    #[error("unknown auth type: {0}")]
    UnknownAuthType(String),

    /// The variable type name is not recognized.
    #[error("unknown variable type: {0}")]
    UnknownVariableType(String),

    /// The body mode name is not recognized.
    #[error("unknown body mode: {0}")]
    UnknownBodyMode(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

/// Structural misuse of a collection tree or registry.
///
/// These never leave a tree half-modified: an operation that returns one of
/// these errors has had no side effects.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    /// The parent index passed to `add` is outside the node array.
    #[error("parent index {index} out of bounds (tree has {len} nodes)")]
    ParentOutOfBounds {
        /// Offending index.
        index: usize,
        /// Node count at the time of the call.
        len: usize,
    },

    /// The tree has handed out every local id its 16-bit space allows.
    #[error("tree {0} has no local ids left")]
    IdSpaceExhausted(TreeId),

    /// The registry has handed out every tree id.
    #[error("no tree ids left in the registry")]
    TreeIdsExhausted,

    /// No tree in the registry owns the given id.
    #[error("no tree owns node {0}")]
    UnknownNode(NodeId),

    /// No tree in the registry has the given id.
    #[error("tree {0} not found")]
    UnknownTree(TreeId),
}
