//! Plain recursive collection structure, as read from and written to disk.

mod item;

pub use item::{Collection, Item, ItemKind, SchemaVersion};
