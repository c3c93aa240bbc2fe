//! Vizij Slots Core (renderer-agnostic)
//!
//! Animated numeric display: every digit of a number lives in its own slot,
//! and a value change animates only the slots that changed. This crate holds
//! the formatter, the slot reconciler, the thousands-separator positioner and
//! the two slot state machines (discrete overlap and continuous rolling
//! strips). It emits descriptors and motion intents; drawing and tweening are
//! left to a Render Adapter (see `vizij-slots-wasm`).

pub mod config;
pub mod continuous;
pub mod discrete;
pub mod engine;
pub mod error;
pub mod format;
pub mod frame;
pub mod ids;
pub mod motion;
pub mod reconcile;
pub mod separators;
pub mod slot;
pub mod strip;

// Re-exports for consumers (adapters)
pub use config::{GlyphMetrics, Mode, Settings, SlotsConfig, SpringSpec};
pub use continuous::ContinuousRow;
pub use engine::SlotNumbers;
pub use error::{SlotsError, SlotsResult};
pub use format::{format_number, FormattedNumber};
pub use frame::{
    ExitDirection, Frame, GlyphTransition, Outputs, SeparatorDescriptor, SeparatorKind,
    SlotDescriptor, SlotEvent,
};
pub use ids::{IdAllocator, PassId, SlotId};
pub use motion::{Easing, Motion, SpringConfig, Timing, Tween};
pub use reconcile::{parse_from_left, reconcile, Reconciliation};
pub use separators::{position_point, position_separators, settle_separators, SeparatorPhase};
pub use slot::{settle, Incoming, Slot, SlotState, SlotValue};
pub use strip::{signed_step, DigitStrip, RollIntent, WRAP_THRESHOLD};
