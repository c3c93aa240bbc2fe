//! Separator positioner: thousands-separator phases per slot position.
//!
//! Phase `i` is the separator drawn after slot `i`. Only the integer portion of
//! the row can carry a separator; the trailing `precision` positions are
//! always [`SeparatorPhase::Absent`].
//!
//! The decimal point shares the phase lifecycle but follows slot identity:
//! see [`position_point`].

use serde::{Deserialize, Serialize};

use crate::format::GROUP_SIZE;
use crate::ids::SlotId;
use crate::slot::Slot;

/// Lifecycle of one separator marker.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeparatorPhase {
    Entering,
    Steady,
    Exiting,
    #[default]
    Absent,
}

impl SeparatorPhase {
    /// Numeric encoding: 1 entering, 0 steady, -1 exiting, none absent.
    #[inline]
    pub fn code(self) -> Option<i8> {
        match self {
            SeparatorPhase::Entering => Some(1),
            SeparatorPhase::Steady => Some(0),
            SeparatorPhase::Exiting => Some(-1),
            SeparatorPhase::Absent => None,
        }
    }

    #[inline]
    pub fn from_code(code: Option<i8>) -> Option<Self> {
        match code {
            Some(1) => Some(SeparatorPhase::Entering),
            Some(0) => Some(SeparatorPhase::Steady),
            Some(-1) => Some(SeparatorPhase::Exiting),
            None => Some(SeparatorPhase::Absent),
            Some(_) => None,
        }
    }

    /// A marker exists at this position (in any phase).
    #[inline]
    pub fn is_present(self) -> bool {
        self != SeparatorPhase::Absent
    }

    /// Phase once the running transition has completed.
    #[inline]
    pub fn settled(self) -> Self {
        match self {
            SeparatorPhase::Entering | SeparatorPhase::Steady => SeparatorPhase::Steady,
            SeparatorPhase::Exiting | SeparatorPhase::Absent => SeparatorPhase::Absent,
        }
    }
}

#[inline]
fn is_boundary(distance: usize) -> bool {
    distance != 0 && distance % GROUP_SIZE == 0
}

/// Compute separator phases for a new row of `new_digit_count` digits.
///
/// `previous` is the phase row of the previous pass (empty on first paint),
/// aligned 1:1 with its slots. The result is aligned 1:1 with the slots of the
/// new pass: `max(new integer digits, previous integer digits) + precision`.
pub fn position_separators(
    new_digit_count: usize,
    previous: &[SeparatorPhase],
    parse_from_left: bool,
    precision: usize,
) -> Vec<SeparatorPhase> {
    let first_paint = previous.is_empty();
    let window = new_digit_count.saturating_sub(precision);
    let prev_int = &previous[..previous.len().saturating_sub(precision)];
    let parse_len = window.max(prev_int.len());

    let mut phases = vec![SeparatorPhase::Absent; parse_len];
    // Right-aligned growth pushes the old markers toward the end of the row.
    let offset = if parse_from_left || first_paint {
        0
    } else {
        window.saturating_sub(prev_int.len())
    };
    for (i, phase) in prev_int.iter().enumerate() {
        phases[i + offset] = *phase;
    }

    for i in 0..parse_len {
        let index = if parse_from_left { i } else { parse_len - i - 1 };
        let outside = if parse_from_left {
            index >= window
        } else {
            index < parse_len - window
        };
        let had_marker = phases[index].is_present();

        phases[index] = if outside && !first_paint {
            if had_marker {
                SeparatorPhase::Exiting
            } else {
                SeparatorPhase::Absent
            }
        } else {
            // Distance from the least-significant integer digit of the window.
            let distance = if parse_from_left { window - i - 1 } else { i };
            if is_boundary(distance) {
                if had_marker || first_paint {
                    SeparatorPhase::Steady
                } else {
                    SeparatorPhase::Entering
                }
            } else if had_marker {
                SeparatorPhase::Exiting
            } else {
                SeparatorPhase::Absent
            }
        };
    }

    phases.resize(parse_len + precision, SeparatorPhase::Absent);
    phases
}

/// Resolve a phase row after the pass completed.
///
/// `removed_from_left` slots were pruned from the front of the row and the
/// settled row holds `settled_len` slots.
pub fn settle_separators(
    phases: &[SeparatorPhase],
    removed_from_left: usize,
    settled_len: usize,
) -> Vec<SeparatorPhase> {
    let mut out: Vec<SeparatorPhase> = phases
        .iter()
        .skip(removed_from_left)
        .take(settled_len)
        .map(|p| p.settled())
        .collect();
    if !out.is_empty() {
        out.resize(settled_len, SeparatorPhase::Absent);
    }
    out
}

/// Slot that carries the decimal point in a settled phase row.
pub fn point_holder(slots: &[Slot], points: &[SeparatorPhase]) -> Option<SlotId> {
    slots
        .iter()
        .zip(points)
        .find(|(_, phase)| phase.is_present())
        .map(|(slot, _)| slot.id)
}

/// Decimal point phases for a reconciled row, aligned 1:1 with `row`.
///
/// `point` is the index of the slot that carries the point once the pass
/// settles and `holder` the slot that carried it before (`None` on first
/// paint). When the point changes slots the old holder exits and the new one
/// enters; otherwise it stays steady.
pub fn position_point(
    row: &[Slot],
    point: Option<usize>,
    holder: Option<SlotId>,
) -> Vec<SeparatorPhase> {
    row.iter()
        .enumerate()
        .map(|(i, slot)| {
            let held = holder == Some(slot.id);
            if point == Some(i) {
                if held || holder.is_none() {
                    SeparatorPhase::Steady
                } else {
                    SeparatorPhase::Entering
                }
            } else if held {
                SeparatorPhase::Exiting
            } else {
                SeparatorPhase::Absent
            }
        })
        .collect()
}

/// Settled separator row for `integer_digits` integer digits followed by
/// `precision` fractional ones.
pub fn steady_separators(integer_digits: usize, precision: usize) -> Vec<SeparatorPhase> {
    (0..integer_digits)
        .map(|i| {
            if is_boundary(integer_digits - i - 1) {
                SeparatorPhase::Steady
            } else {
                SeparatorPhase::Absent
            }
        })
        .chain(std::iter::repeat(SeparatorPhase::Absent).take(precision))
        .collect()
}

/// Positions (counted from the least-significant integer digit) that carry a
/// separator once settled.
pub fn boundary_positions(integer_digits: usize) -> Vec<usize> {
    (0..integer_digits).filter(|&p| is_boundary(p)).collect()
}
