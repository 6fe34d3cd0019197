//! JSON serialization for files written by Quire.
//!
//! Keeps diffs of saved files clean by:
//! - Using 2-space indentation (or a single line when prettifying is off)
//! - Adding a trailing newline
//! - UTF-8 encoding without BOM

mod json;

pub use json::*;
