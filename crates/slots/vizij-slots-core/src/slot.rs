//! Digit slot records.
//!
//! A slot pairs a stable [`SlotId`] with the value tuple the Render Adapter
//! animates. The lifecycle state is derived from the tuple, never stored.

use serde::{Deserialize, Serialize};

use crate::ids::SlotId;

/// Value tuple of one slot for the current pass.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SlotValue {
    /// Shown digit, unchanged this pass.
    Static { digit: u8 },
    /// New position; nothing shown yet.
    Entering { digit: u8 },
    /// Position being removed; `digit` is still shown.
    Exiting { digit: u8 },
    /// Shown digit `from` is replaced by `to`.
    Transitioning { from: u8, to: u8 },
}

/// Derived lifecycle state.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotState {
    Static,
    Entering,
    Exiting,
    Transitioning,
}

/// What a slot is moving toward this pass.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Incoming {
    /// No incoming value; the slot is static.
    Unchanged,
    /// The slot is being removed.
    Removed,
    Digit(u8),
}

impl SlotValue {
    #[inline]
    pub fn state(&self) -> SlotState {
        match self {
            SlotValue::Static { .. } => SlotState::Static,
            SlotValue::Entering { .. } => SlotState::Entering,
            SlotValue::Exiting { .. } => SlotState::Exiting,
            SlotValue::Transitioning { .. } => SlotState::Transitioning,
        }
    }

    /// Digit currently on screen, absent for an entering slot.
    #[inline]
    pub fn displayed(&self) -> Option<u8> {
        match *self {
            SlotValue::Static { digit } | SlotValue::Exiting { digit } => Some(digit),
            SlotValue::Transitioning { from, .. } => Some(from),
            SlotValue::Entering { .. } => None,
        }
    }

    #[inline]
    pub fn incoming(&self) -> Incoming {
        match *self {
            SlotValue::Static { .. } => Incoming::Unchanged,
            SlotValue::Exiting { .. } => Incoming::Removed,
            SlotValue::Entering { digit } => Incoming::Digit(digit),
            SlotValue::Transitioning { to, .. } => Incoming::Digit(to),
        }
    }

    /// Digit the slot shows once its animation has completed; `None` if the
    /// slot is removed on completion.
    #[inline]
    pub fn resting(&self) -> Option<u8> {
        match *self {
            SlotValue::Static { digit } | SlotValue::Entering { digit } => Some(digit),
            SlotValue::Transitioning { to, .. } => Some(to),
            SlotValue::Exiting { .. } => None,
        }
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        !matches!(self, SlotValue::Static { .. })
    }
}

/// One digit position with a stable identity.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slot {
    pub id: SlotId,
    pub value: SlotValue,
}

impl Slot {
    #[inline]
    pub fn new(id: SlotId, value: SlotValue) -> Self {
        Self { id, value }
    }

    #[inline]
    pub fn fixed(id: SlotId, digit: u8) -> Self {
        Self::new(id, SlotValue::Static { digit })
    }

    #[inline]
    pub fn state(&self) -> SlotState {
        self.value.state()
    }

    #[inline]
    pub fn displayed(&self) -> Option<u8> {
        self.value.displayed()
    }

    #[inline]
    pub fn incoming(&self) -> Incoming {
        self.value.incoming()
    }

    #[inline]
    pub fn resting(&self) -> Option<u8> {
        self.value.resting()
    }

    /// Collapse to a static record, or `None` when the slot exits.
    #[inline]
    pub fn settled(&self) -> Option<Slot> {
        self.resting().map(|digit| Slot::fixed(self.id, digit))
    }
}

/// Apply completion to a whole sequence: every record becomes static and
/// exiting slots are dropped.
pub fn settle(slots: &[Slot]) -> Vec<Slot> {
    slots.iter().filter_map(Slot::settled).collect()
}

/// Number of leading exiting slots, pruned from the left on completion.
pub fn exiting_prefix(slots: &[Slot]) -> usize {
    slots
        .iter()
        .take_while(|s| matches!(s.value, SlotValue::Exiting { .. }))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_states() {
        let id = SlotId(0);
        let s = Slot::new(id, SlotValue::Transitioning { from: 3, to: 1 });
        assert_eq!(s.state(), SlotState::Transitioning);
        assert_eq!(s.displayed(), Some(3));
        assert_eq!(s.incoming(), Incoming::Digit(1));
        assert_eq!(s.settled(), Some(Slot::fixed(id, 1)));

        let e = Slot::new(id, SlotValue::Exiting { digit: 9 });
        assert_eq!(e.incoming(), Incoming::Removed);
        assert_eq!(e.settled(), None);

        let n = Slot::new(id, SlotValue::Entering { digit: 4 });
        assert_eq!(n.displayed(), None);
        assert_eq!(n.settled(), Some(Slot::fixed(id, 4)));
    }

    #[test]
    fn exiting_prefix_stops_at_first_kept_slot() {
        let row = [
            Slot::new(SlotId(0), SlotValue::Exiting { digit: 1 }),
            Slot::new(SlotId(1), SlotValue::Exiting { digit: 2 }),
            Slot::fixed(SlotId(2), 3),
            Slot::new(SlotId(3), SlotValue::Exiting { digit: 4 }),
        ];
        assert_eq!(exiting_prefix(&row), 2);
        assert_eq!(exiting_prefix(&row[2..]), 0);
        assert_eq!(settle(&row).len(), 1);
    }
}
