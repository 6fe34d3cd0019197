//! Quire Domain - Core collection types
//!
//! This crate defines the collection model: requests, authorization and
//! variables, the plain recursive [`Collection`] read from disk, and the
//! flattened [`CollectionTree`] the editor works on, together with the
//! arenas that hold node payloads.
//! All types here are pure Rust with no I/O dependencies.

pub mod auth;
pub mod collection;
pub mod db;
pub mod environment;
pub mod error;
pub mod id;
pub mod request;
pub mod settings;
pub mod store;
pub mod tree;

pub use auth::{Auth, AuthAttribute, AuthType};
pub use collection::{Collection, Item, ItemKind, SchemaVersion};
pub use db::CollectionDb;
pub use environment::{Variable, VariableType};
pub use error::{DomainError, DomainResult, TreeError};
pub use id::{NodeId, TreeId};
pub use request::{
    FormDataField, FormParam, Header, Headers, HttpMethod, QueryArg, RawLanguage, Request,
    RequestBody,
};
pub use settings::Settings;
pub use store::{Arena, BitSet};
pub use tree::{
    AddedNode, CollectionNode, CollectionTree, IdIndex, NewNode, Payloads, RequestSnapshot,
    TreeInfo,
};
