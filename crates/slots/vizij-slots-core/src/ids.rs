//! Identifiers and a simple allocator for slots and reconciliation passes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identity of one digit slot. Survives every pass in which the slot is
/// kept; never derived from the slot's position.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotId(pub u32);

/// Identity of one reconciliation pass. Completion reports carry it so stale
/// callbacks can be told apart from current ones.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PassId(pub u32);

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for PassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonic allocator for SlotId and PassId.
#[derive(Default, Debug, Clone)]
pub struct IdAllocator {
    next_slot: u32,
    next_pass: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc_slot(&mut self) -> SlotId {
        let id = SlotId(self.next_slot);
        self.next_slot = self.next_slot.wrapping_add(1);
        id
    }

    #[inline]
    pub fn alloc_pass(&mut self) -> PassId {
        let id = PassId(self.next_pass);
        self.next_pass = self.next_pass.wrapping_add(1);
        id
    }

    #[inline]
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
