//! Continuous-mode digit strips.
//!
//! A slot shows one cell of a 0-9 strip. Two strip instances sit end to end on
//! an endless tape so a roll can cross from 9 to 0 (or back) without a seam.
//! Instead of tracking two free offsets, the slot keeps one tape position on a
//! ring of `STRIP_COUNT * STRIP_LEN` cells:
//!
//! ```text
//! position:  0 1 2 ... 9 | 10 11 ... 19 | (wraps to 0)
//! strip:     ---- 0 ---- | ----- 1 ---- |
//! digit:     0 1 2 ... 9 |  0  1 ...  9 |
//! ```
//!
//! Strip offsets are in cells; the visible cell is at offset 0. A strip with
//! offset `o` shows digit `d` at `o + d`.

use serde::{Deserialize, Serialize};

/// Digits per strip.
pub const STRIP_LEN: i32 = 10;
/// Strip instances per slot.
pub const STRIP_COUNT: i32 = 2;
/// Rolls longer than this take the short way around.
pub const WRAP_THRESHOLD: i32 = 5;

const RING_LEN: i32 = STRIP_LEN * STRIP_COUNT;

/// Signed number of cells to travel from `current` to `target`.
///
/// Positive rolls forward (increasing digits, 9 → 0 when wrapping). A delta
/// above [`WRAP_THRESHOLD`] wraps; exactly the threshold travels directly.
#[inline]
pub fn signed_step(current: u8, target: u8) -> i32 {
    let delta = target as i32 - current as i32;
    if delta > WRAP_THRESHOLD {
        delta - STRIP_LEN
    } else if delta < -WRAP_THRESHOLD {
        delta + STRIP_LEN
    } else {
        delta
    }
}

/// Whether a roll from `current` to `target` wraps around the strip.
#[inline]
pub fn wraps(current: u8, target: u8) -> bool {
    (target as i32 - current as i32).abs() > WRAP_THRESHOLD
}

/// Slide direction of a roll: +1 forward, -1 backward.
#[inline]
pub fn roll_direction(current: u8, target: u8) -> i8 {
    if wraps(current, target) {
        // Short way around: a target in the lower half is reached by going past 9.
        if (target as i32) < WRAP_THRESHOLD {
            1
        } else {
            -1
        }
    } else if target > current {
        1
    } else {
        -1
    }
}

/// Roll planned for one slot.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RollIntent {
    pub from: u8,
    pub to: u8,
    pub wraps: bool,
    pub direction: i8,
    /// Cells travelled (always positive).
    pub distance: u8,
    /// Strip in view before the roll.
    pub visible: usize,
    /// Strip outside the window, repositioned before the roll.
    pub wrapped: usize,
    /// Offset the target digit sits at on the visible strip before the roll.
    pub target_offset: f32,
    /// Zero-duration placement of the wrapped strip, one strip length beyond
    /// (forward) or before (backward) the visible one.
    pub reposition: f32,
    /// Final offsets, indexed by strip.
    pub offsets: [f32; 2],
}

impl RollIntent {
    /// Strip in view once the roll has finished.
    #[inline]
    pub fn visible_after(&self) -> usize {
        if self.wraps {
            self.wrapped
        } else {
            self.visible
        }
    }
}

/// Per-slot strip state for continuous mode.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DigitStrip {
    position: i32,
}

impl DigitStrip {
    /// Strip at rest on `digit`, first instance in view.
    #[inline]
    pub fn new(digit: u8) -> Self {
        Self {
            position: digit as i32 % STRIP_LEN,
        }
    }

    #[inline]
    pub fn digit(&self) -> u8 {
        (self.position % STRIP_LEN) as u8
    }

    /// Strip instance currently in view.
    #[inline]
    pub fn visible(&self) -> usize {
        (self.position / STRIP_LEN) as usize
    }

    /// Offset of the visible strip at rest.
    #[inline]
    pub fn rest_offset(&self) -> f32 {
        -(self.digit() as f32)
    }

    /// Roll to `target`, returning the motion the adapter should play.
    /// `None` when the strip already rests on `target`.
    pub fn roll_to(&mut self, target: u8) -> Option<RollIntent> {
        let target = target % STRIP_LEN as u8;
        let current = self.digit();
        if current == target {
            return None;
        }

        let step = signed_step(current, target);
        let direction = roll_direction(current, target);
        let block = self.position.div_euclid(STRIP_LEN);
        let spare_block = block + direction as i32;
        let next = self.position + step;

        let visible = block.rem_euclid(STRIP_COUNT) as usize;
        let wrapped = spare_block.rem_euclid(STRIP_COUNT) as usize;

        let mut offsets = [0.0; 2];
        offsets[visible] = (block * STRIP_LEN - next) as f32;
        offsets[wrapped] = (spare_block * STRIP_LEN - next) as f32;

        let intent = RollIntent {
            from: current,
            to: target,
            wraps: wraps(current, target),
            direction,
            distance: step.unsigned_abs() as u8,
            visible,
            wrapped,
            target_offset: -(target as f32),
            reposition: (spare_block * STRIP_LEN - self.position) as f32,
            offsets,
        };

        self.position = next.rem_euclid(RING_LEN);
        Some(intent)
    }
}
