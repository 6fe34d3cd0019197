//! Authorization domain types

mod types;

pub use types::{Auth, AuthAttribute, AuthType};
