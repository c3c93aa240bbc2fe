//! Continuous-mode slot state machine.
//!
//! Slots keep a [`DigitStrip`] each, keyed by identity. A pass rolls kept
//! strips to their new digits, creates strips for entering slots and drops the
//! strips of exiting ones straight away; nothing waits for a collapse step.

use hashbrown::HashMap;
use log::trace;

use crate::config::GlyphMetrics;
use crate::discrete::separator_tweens;
use crate::frame::{GlyphTransition, SeparatorDescriptor, SeparatorKind};
use crate::ids::SlotId;
use crate::motion::{Timing, Tween};
use crate::separators::SeparatorPhase;
use crate::slot::{Slot, SlotValue};
use crate::strip::DigitStrip;

/// Entering and exiting glyphs move faster than rolls.
const FADE_FACTOR: f32 = 1.0 / 1.5;

/// Strip state for every live slot of a continuous controller.
#[derive(Clone, Debug, Default)]
pub struct ContinuousRow {
    strips: HashMap<SlotId, DigitStrip>,
}

impl ContinuousRow {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.strips.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.strips.is_empty()
    }

    #[inline]
    pub fn strip(&self, id: SlotId) -> Option<&DigitStrip> {
        self.strips.get(&id)
    }

    pub fn clear(&mut self) {
        self.strips.clear();
    }

    /// Plan one slot and commit its strip to the target position.
    pub fn plan_slot(
        &mut self,
        slot: &Slot,
        metrics: &GlyphMetrics,
        timing: &Timing,
    ) -> (GlyphTransition, Tween) {
        match slot.value {
            SlotValue::Static { digit } => {
                self.strips.entry(slot.id).or_insert_with(|| DigitStrip::new(digit));
                (GlyphTransition::Hold, Tween::set(metrics.digit_width(digit)))
            }
            SlotValue::Entering { digit } => {
                self.strips.insert(slot.id, DigitStrip::new(digit));
                (
                    GlyphTransition::Enter {
                        offset: Tween::new(1.0, 0.0, timing.scaled(FADE_FACTOR)),
                    },
                    Tween::set(metrics.digit_width(digit)),
                )
            }
            SlotValue::Exiting { digit } => {
                self.strips.remove(&slot.id);
                (
                    GlyphTransition::Exit {
                        offset: Tween::new(0.0, 1.0, timing.scaled(FADE_FACTOR)),
                    },
                    Tween::new(metrics.digit_width(digit), 0.0, timing.motion()),
                )
            }
            SlotValue::Transitioning { from, to } => {
                let strip = self
                    .strips
                    .entry(slot.id)
                    .or_insert_with(|| DigitStrip::new(from));
                let transition = match strip.roll_to(to) {
                    Some(roll) => {
                        trace!(
                            "roll: slot {} {} -> {} (wraps={}, step={})",
                            slot.id,
                            roll.from,
                            roll.to,
                            roll.wraps,
                            roll.direction as i32 * roll.distance as i32
                        );
                        GlyphTransition::Roll {
                            roll,
                            motion: timing.motion(),
                        }
                    }
                    None => GlyphTransition::Hold,
                };
                let (w_from, w_to) = (metrics.digit_width(from), metrics.digit_width(to));
                let width = if w_to >= w_from {
                    Tween::set(w_to)
                } else {
                    Tween::new(w_from, w_to, timing.motion())
                };
                (transition, width)
            }
        }
    }

    /// Keep only the strips of `slots`.
    pub fn retain(&mut self, slots: &[Slot]) {
        self.strips
            .retain(|id, _| slots.iter().any(|s| s.id == *id));
    }
}

/// Separator descriptor for a continuous pass: scale and width both use the
/// extra-damped motion.
pub fn describe_separator(
    phase: SeparatorPhase,
    metrics: &GlyphMetrics,
    timing: &Timing,
) -> Option<SeparatorDescriptor> {
    let motion = timing.damped();
    separator_tweens(SeparatorKind::Comma, phase, metrics.comma_width, motion, motion)
}

/// Decimal point descriptor for a continuous pass, on the same damped motion.
pub fn describe_point(
    phase: SeparatorPhase,
    metrics: &GlyphMetrics,
    timing: &Timing,
) -> Option<SeparatorDescriptor> {
    let motion = timing.damped();
    separator_tweens(SeparatorKind::Period, phase, metrics.period_width, motion, motion)
}
