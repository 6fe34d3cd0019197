//! Quire Application - Use cases and ports
//!
//! This crate orchestrates the collection domain: it opens and saves
//! collections through a repository port and runs requests through an HTTP
//! client port. Adapters for both live in the infrastructure crate.

pub mod error;
pub mod ports;
pub mod use_cases;

pub use error::{ApplicationError, ApplicationResult};
pub use ports::{
    CollectionError, CollectionRepository, HttpClient, HttpClientError, HttpResponse,
};
pub use use_cases::{InFlightRequest, OpenCollection, RequestStatus, SaveCollection};
