//! Discrete-mode slot state machine.
//!
//! Each animating slot overlays two glyphs. The outgoing glyph leaves up when
//! the incoming digit is greater and down when it is smaller; the incoming
//! glyph arrives from the opposite edge. Widths follow the glyphs at half
//! duration (or with an extra-damped spring) so the row reflows smoothly.
//!
//! Completion collapses the pass: see [`crate::slot::settle`] and
//! [`crate::separators::settle_separators`].

use crate::config::GlyphMetrics;
use crate::frame::{ExitDirection, GlyphTransition, SeparatorDescriptor, SeparatorKind};
use crate::motion::{Motion, Timing, Tween};
use crate::separators::SeparatorPhase;
use crate::slot::SlotValue;

/// Direction the outgoing glyph leaves in when `from` is replaced by `to`.
#[inline]
pub fn exit_direction(from: u8, to: u8) -> ExitDirection {
    if to > from {
        ExitDirection::Up
    } else {
        ExitDirection::Down
    }
}

/// Glyph transition and width tween for one slot.
pub fn plan_slot(
    value: &SlotValue,
    metrics: &GlyphMetrics,
    timing: &Timing,
) -> (GlyphTransition, Tween) {
    let motion = timing.motion();
    match *value {
        SlotValue::Static { digit } => (GlyphTransition::Hold, Tween::set(metrics.digit_width(digit))),
        SlotValue::Entering { digit } => (
            GlyphTransition::Enter {
                offset: Tween::new(-1.0, 0.0, motion),
            },
            Tween::new(0.0, metrics.digit_width(digit), timing.half()),
        ),
        SlotValue::Exiting { digit } => (
            GlyphTransition::Exit {
                offset: Tween::new(0.0, -1.0, motion),
            },
            Tween::new(metrics.digit_width(digit), 0.0, timing.half_damped()),
        ),
        SlotValue::Transitioning { from, to } => {
            let direction = exit_direction(from, to);
            (
                GlyphTransition::Swap {
                    direction,
                    outgoing: Tween::new(0.0, direction.exit_offset(), motion),
                    incoming: Tween::new(direction.enter_offset(), 0.0, motion),
                },
                Tween::new(
                    metrics.digit_width(from),
                    metrics.digit_width(to),
                    timing.half_damped(),
                ),
            )
        }
    }
}

/// Separator descriptor for a discrete pass.
pub fn describe_separator(
    phase: SeparatorPhase,
    metrics: &GlyphMetrics,
    timing: &Timing,
) -> Option<SeparatorDescriptor> {
    separator_tweens(
        SeparatorKind::Comma,
        phase,
        metrics.comma_width,
        timing.motion(),
        timing.damped(),
    )
}

/// Decimal point descriptor for a discrete pass.
pub fn describe_point(
    phase: SeparatorPhase,
    metrics: &GlyphMetrics,
    timing: &Timing,
) -> Option<SeparatorDescriptor> {
    separator_tweens(
        SeparatorKind::Period,
        phase,
        metrics.period_width,
        timing.motion(),
        timing.damped(),
    )
}

/// Scale and width tweens for a marker of `kind` in `phase`.
///
/// `motion` drives the scale and the entering width; `exit_width` drives the
/// width of an exiting marker.
pub(crate) fn separator_tweens(
    kind: SeparatorKind,
    phase: SeparatorPhase,
    width: f32,
    motion: Motion,
    exit_width: Motion,
) -> Option<SeparatorDescriptor> {
    let (scale, w) = match phase {
        SeparatorPhase::Absent => return None,
        SeparatorPhase::Steady => (Tween::set(1.0), Tween::set(width)),
        SeparatorPhase::Entering => (
            Tween::new(0.0, 1.0, motion),
            Tween::new(0.0, width, motion),
        ),
        SeparatorPhase::Exiting => (
            Tween::new(1.0, 0.0, motion),
            Tween::new(width, 0.0, exit_width),
        ),
    };
    Some(SeparatorDescriptor {
        kind,
        phase,
        scale,
        width: w,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::Easing;

    fn timing() -> Timing {
        Timing::Duration {
            duration_ms: 400,
            easing: Easing::Linear,
        }
    }

    #[test]
    fn greater_incoming_exits_up() {
        let metrics = GlyphMetrics::default();
        let (t, width) = plan_slot(&SlotValue::Transitioning { from: 2, to: 7 }, &metrics, &timing());
        match t {
            GlyphTransition::Swap {
                direction,
                outgoing,
                incoming,
            } => {
                assert_eq!(direction, ExitDirection::Up);
                assert_eq!(outgoing.to, -1.0);
                assert_eq!(incoming.from, 1.0);
            }
            other => panic!("expected swap, got {other:?}"),
        }
        assert_eq!(width.motion, Motion::timed(200, Easing::Linear));

        let (t, _) = plan_slot(&SlotValue::Transitioning { from: 7, to: 2 }, &metrics, &timing());
        assert!(matches!(
            t,
            GlyphTransition::Swap {
                direction: ExitDirection::Down,
                ..
            }
        ));
    }

    #[test]
    fn absent_separator_is_not_described() {
        let metrics = GlyphMetrics::default();
        assert!(describe_separator(SeparatorPhase::Absent, &metrics, &timing()).is_none());
        let steady = describe_separator(SeparatorPhase::Steady, &metrics, &timing()).unwrap();
        assert_eq!(steady.width.to, metrics.comma_width);
        assert!(steady.scale.motion.is_instant());
    }

    #[test]
    fn point_uses_period_width() {
        let mut metrics = GlyphMetrics::monospace(10.0, 20.0);
        metrics.period_width = 3.0;
        let entering = describe_point(SeparatorPhase::Entering, &metrics, &timing()).unwrap();
        assert_eq!(entering.kind, SeparatorKind::Period);
        assert_eq!((entering.width.from, entering.width.to), (0.0, 3.0));
        assert_eq!(entering.width.motion, timing().motion());

        let exiting = describe_point(SeparatorPhase::Exiting, &metrics, &timing()).unwrap();
        assert_eq!((exiting.width.from, exiting.width.to), (3.0, 0.0));
        assert_eq!(exiting.width.motion, timing().damped());
    }
}
