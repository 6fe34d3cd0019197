//! Reusable-slot arena

use super::BitSet;

/// A vector whose indices stay valid across removals.
///
/// `erase` only marks a slot dead; the next `insert` reuses the lowest dead
/// slot before appending. Dead slots keep their old value until reused but
/// are never handed out by [`Arena::get`].
#[derive(Debug, Clone)]
pub struct Arena<T> {
    slots: Vec<T>,
    alive: BitSet,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Arena<T> {
    /// Creates an empty arena.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            alive: BitSet::new(),
        }
    }

    /// Stores `value` and returns its slot.
    pub fn insert(&mut self, value: T) -> usize {
        match self.alive.find_first(false) {
            Some(index) if index < self.slots.len() => {
                self.slots[index] = value;
                self.alive.set(index, true);
                index
            }
            _ => {
                let index = self.slots.len();
                self.slots.push(value);
                self.alive.set(index, true);
                index
            }
        }
    }

    /// Marks `index` dead. Out-of-range or already dead slots are ignored.
    pub fn erase(&mut self, index: usize) {
        if index < self.slots.len() {
            self.alive.set(index, false);
        }
    }

    /// Returns the value in `index` if the slot is alive.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        if self.is_alive(index) {
            self.slots.get(index)
        } else {
            None
        }
    }

    /// Mutable variant of [`Arena::get`].
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if self.is_alive(index) {
            self.slots.get_mut(index)
        } else {
            None
        }
    }

    /// Returns whether `index` holds a live value.
    #[must_use]
    pub fn is_alive(&self, index: usize) -> bool {
        self.alive.get(index)
    }

    /// Number of live values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.alive.count_ones()
    }

    /// Returns true when no slot is alive.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of slots ever allocated, dead ones included.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Iterates over live `(index, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(i, _)| self.alive.get(*i))
    }
}
