//! Application error types

use quire_domain::{DomainError, TreeError, TreeId};
use thiserror::Error;

use crate::ports::{CollectionError, HttpClientError};

/// Application-level errors.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A domain validation error occurred.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// A tree operation was rejected.
    #[error("tree error: {0}")]
    Tree(#[from] TreeError),

    /// Reading or writing a collection failed.
    #[error("collection error: {0}")]
    Collection(#[from] CollectionError),

    /// An HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] HttpClientError),

    /// No tree with this id is open.
    #[error("collection tree {0} is not open")]
    TreeNotOpen(TreeId),

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
