//! Quire Infrastructure - Adapters and implementations
//!
//! This crate provides the Postman collection codec and the file-backed
//! implementations of the ports defined in the application layer.

pub mod interchange;
pub mod persistence;
pub mod serialization;

pub use interchange::{
    InterchangeConfig, InterchangeError, load_file, load_reader, load_slice, load_str, save_file,
    save_string, save_writer,
};
pub use persistence::{FileSettingsRepository, FileSystemCollectionRepository, SettingsError};
pub use serialization::{
    SerializationError, from_json_bytes, to_json, to_json_compact, to_json_stable,
    to_json_stable_bytes,
};
