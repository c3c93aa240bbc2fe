//! Output contracts handed to the Render Adapter.
//!
//! A `Frame` is re-emitted on every pass and describes each slot: its value
//! tuple, the glyph motion to play, the width to ease toward and the separator
//! drawn after it. Adapters paint it and report completions back by
//! `(PassId, SlotId)`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ids::{PassId, SlotId};
use crate::motion::{Motion, Tween};
use crate::separators::SeparatorPhase;
use crate::slot::SlotValue;
use crate::strip::RollIntent;

/// Vertical direction a glyph leaves in. Offsets are in slot heights:
/// negative is above the slot, positive below.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitDirection {
    Up,
    Down,
}

impl ExitDirection {
    /// Offset the outgoing glyph ends at.
    #[inline]
    pub fn exit_offset(self) -> f32 {
        match self {
            ExitDirection::Up => -1.0,
            ExitDirection::Down => 1.0,
        }
    }

    /// Offset the incoming glyph starts from (the opposite edge).
    #[inline]
    pub fn enter_offset(self) -> f32 {
        -self.exit_offset()
    }
}

/// Glyph-level transition for one slot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GlyphTransition {
    /// Nothing moves.
    Hold,
    /// Glyph slides into view.
    Enter { offset: Tween },
    /// Glyph slides out of view.
    Exit { offset: Tween },
    /// Two overlaid glyphs: `outgoing` leaves toward `direction`, `incoming`
    /// arrives from the opposite edge.
    Swap {
        direction: ExitDirection,
        outgoing: Tween,
        incoming: Tween,
    },
    /// Continuous mode: both strip instances move together with `motion`.
    Roll { roll: RollIntent, motion: Motion },
}

impl GlyphTransition {
    #[inline]
    pub fn is_hold(&self) -> bool {
        matches!(self, GlyphTransition::Hold)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeparatorKind {
    Comma,
    Period,
}

/// Separator drawn after a slot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeparatorDescriptor {
    pub kind: SeparatorKind,
    pub phase: SeparatorPhase,
    pub scale: Tween,
    pub width: Tween,
}

/// One slot as the Render Adapter should paint it this pass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SlotDescriptor {
    /// Render key, unique across controller instances.
    pub key: String,
    pub id: SlotId,
    pub value: SlotValue,
    pub transition: GlyphTransition,
    pub width: Tween,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub separator: Option<SeparatorDescriptor>,
    /// Decimal point drawn after this slot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decimal_point: Option<SeparatorDescriptor>,
}

/// Full descriptor row for one pass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub instance: Uuid,
    pub pass: PassId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    pub text: String,
    pub parse_from_left: bool,
    pub slots: Vec<SlotDescriptor>,
}

impl Frame {
    /// Slots whose glyphs move this pass.
    pub fn animating(&self) -> impl Iterator<Item = &SlotDescriptor> {
        self.slots.iter().filter(|s| !s.transition.is_hold())
    }

    pub fn slot(&self, id: SlotId) -> Option<&SlotDescriptor> {
        self.slots.iter().find(|s| s.id == id)
    }
}

/// Render key for a slot: `<instance>-<slot>`.
#[inline]
pub fn slot_key(instance: &Uuid, id: SlotId) -> String {
    format!("{instance}-{id}")
}

/// Discrete signals emitted by the controller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[non_exhaustive]
pub enum SlotEvent {
    PassStarted {
        pass: PassId,
        text: String,
        animating: usize,
    },
    PassSettled {
        pass: PassId,
        text: String,
    },
    /// A value arrived while a pass was in flight and will start once it settles.
    ValueQueued {
        pass: PassId,
        text: String,
    },
    /// A completion referenced a pass or slot that is no longer current.
    StaleCompletion {
        pass: PassId,
        #[serde(skip_serializing_if = "Option::is_none")]
        slot: Option<SlotId>,
    },
}

/// Outputs returned by every controller call.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Outputs {
    /// New descriptor row, present when a pass started or settled.
    #[serde(default)]
    pub frame: Option<Frame>,
    #[serde(default)]
    pub events: Vec<SlotEvent>,
}

impl Outputs {
    #[inline]
    pub fn clear(&mut self) {
        self.frame = None;
        self.events.clear();
    }

    #[inline]
    pub fn push_event(&mut self, event: SlotEvent) {
        self.events.push(event);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frame.is_none() && self.events.is_empty()
    }
}

