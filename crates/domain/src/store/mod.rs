//! Index-stable storage primitives.

mod arena;
mod bitset;

pub use arena::Arena;
pub use bitset::BitSet;
