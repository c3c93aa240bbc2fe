//! Slot reconciler: align the previous slot row with a new digit sequence.
//!
//! Alignment is decided once per pass:
//!
//! ```text
//! left  (leading digit kept)      right (leading digit changed)
//! _ _ _ _ _ _   new               _ _ _ _ _ _   new
//! _ _ _         old                     _ _ _   old
//! ```
//!
//! Every unified index is then classified as entering, exiting, transitioning
//! or static. Identities of kept positions are carried over; only entering
//! positions get fresh ones.

use log::trace;
use serde::{Deserialize, Serialize};

use crate::ids::IdAllocator;
use crate::slot::{exiting_prefix, settle, Slot, SlotValue};

/// Result of one reconciliation pass.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reconciliation {
    pub slots: Vec<Slot>,
    pub parse_from_left: bool,
}

impl Reconciliation {
    /// Number of leading exiting slots (pruned from the left on completion).
    #[inline]
    pub fn exiting_prefix(&self) -> usize {
        exiting_prefix(&self.slots)
    }

    pub fn exiting_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| matches!(s.value, SlotValue::Exiting { .. }))
            .count()
    }

    pub fn is_static(&self) -> bool {
        self.slots.iter().all(|s| !s.value.is_animating())
    }
}

/// Alignment direction: left iff the leading digit is unchanged.
pub fn parse_from_left(new_digits: &[u8], previous: &[Slot]) -> bool {
    match (previous.first().and_then(Slot::displayed), new_digits.first()) {
        (Some(shown), Some(&lead)) => shown == lead,
        _ => false,
    }
}

/// Reconcile `previous` with `new_digits`.
///
/// `previous` is read at its resting values, so an unsettled row behaves as if
/// its completions had already been applied. `forced_direction` overrides the
/// leading-digit rule.
pub fn reconcile(
    new_digits: &[u8],
    previous: &[Slot],
    forced_direction: Option<bool>,
    ids: &mut IdAllocator,
) -> Reconciliation {
    let previous = settle(previous);

    if previous.is_empty() {
        let slots = new_digits
            .iter()
            .map(|&digit| Slot::new(ids.alloc_slot(), SlotValue::Entering { digit }))
            .collect();
        return Reconciliation {
            slots,
            parse_from_left: true,
        };
    }

    let from_left = forced_direction.unwrap_or_else(|| parse_from_left(new_digits, &previous));
    let n = new_digits.len().max(previous.len());
    let shift_prev = if from_left { 0 } else { n - previous.len() };
    let shift_new = if from_left { 0 } else { n - new_digits.len() };

    let slots: Vec<Slot> = (0..n)
        .filter_map(|i| {
            let current = i.checked_sub(shift_prev).and_then(|j| previous.get(j));
            let incoming = i
                .checked_sub(shift_new)
                .and_then(|j| new_digits.get(j))
                .copied();
            classify(current, incoming, ids)
        })
        .collect();

    trace!(
        "reconcile: {} -> {} slots (from_left={})",
        previous.len(),
        slots.len(),
        from_left
    );

    Reconciliation {
        slots,
        parse_from_left: from_left,
    }
}

fn classify(current: Option<&Slot>, incoming: Option<u8>, ids: &mut IdAllocator) -> Option<Slot> {
    let slot = match (current.and_then(|s| s.displayed().map(|d| (s.id, d))), incoming) {
        (None, Some(digit)) => Slot::new(ids.alloc_slot(), SlotValue::Entering { digit }),
        (Some((id, digit)), None) => Slot::new(id, SlotValue::Exiting { digit }),
        (Some((id, from)), Some(to)) if from != to => {
            Slot::new(id, SlotValue::Transitioning { from, to })
        }
        (Some((id, digit)), Some(_)) => Slot::fixed(id, digit),
        // n = max(len) keeps at least one side present
        (None, None) => return None,
    };
    Some(slot)
}
