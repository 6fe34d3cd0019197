//! Open-addressing map from stable id to array position

use crate::id::NodeId;

use super::node::CollectionNode;

const HASH_MULTIPLIER: u32 = 0x9E37_79B9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Slot {
    id: NodeId,
    index: usize,
}

/// Maps [`NodeId`]s to positions in a node array.
///
/// The table is rebuilt from scratch after every structural change, so
/// linear probing can stop at the first empty slot without tombstones.
#[derive(Debug, Clone, Default)]
pub struct IdIndex {
    slots: Vec<Option<Slot>>,
    stale: bool,
}

impl IdIndex {
    /// Creates an empty index that will build itself on first use.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            stale: true,
        }
    }

    /// Flags the index for a rebuild before the next lookup.
    pub const fn invalidate(&mut self) {
        self.stale = true;
    }

    /// Whether the next lookup will rebuild.
    #[must_use]
    pub const fn is_stale(&self) -> bool {
        self.stale
    }

    /// Number of table slots.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Rebuilds the table from `nodes` if it is stale.
    pub fn refresh(&mut self, nodes: &[CollectionNode]) {
        if self.stale {
            self.rebuild(nodes);
        }
    }

    /// Clears the table and re-inserts every node.
    pub fn rebuild(&mut self, nodes: &[CollectionNode]) {
        let wanted = nodes.len() + nodes.len() / 2 + 1;
        if self.slots.len() < wanted {
            self.slots.resize(wanted, None);
        }
        self.slots.fill(None);

        let capacity = self.slots.len();
        for (index, node) in nodes.iter().enumerate() {
            let mut pos = hash(node.id, capacity);
            while self.slots[pos].is_some() {
                pos = (pos + 1) % capacity;
            }
            self.slots[pos] = Some(Slot { id: node.id, index });
        }
        self.stale = false;
    }

    /// Returns the array position of `id`, without rebuilding.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<usize> {
        let capacity = self.slots.len();
        if capacity == 0 || !id.is_valid() {
            return None;
        }
        let mut pos = hash(id, capacity);
        for _ in 0..capacity {
            let slot = self.slots[pos]?;
            if slot.id == id {
                return Some(slot.index);
            }
            pos = (pos + 1) % capacity;
        }
        None
    }
}

fn hash(id: NodeId, capacity: usize) -> usize {
    id.raw().wrapping_mul(HASH_MULTIPLIER) as usize % capacity
}
