//! File-backed repositories.

mod collection_repository;
mod settings_repository;

pub use collection_repository::FileSystemCollectionRepository;
pub use settings_repository::{FileSettingsRepository, SettingsError};
