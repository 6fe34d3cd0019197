//! Variable domain types

mod variable;

pub use variable::{Variable, VariableType};
