//! Motion intents handed to the Render Adapter.
//!
//! The core never samples curves over time; it only says which curve to play,
//! for how long, or with which spring. Bezier control points are (x1, y1, x2, y2).

use serde::{Deserialize, Serialize};

use crate::error::{SlotsError, SlotsResult};

pub const DEFAULT_DURATION_MS: u32 = 500;
pub const DEFAULT_CONTINUOUS_DURATION_MS: u32 = 700;

/// Damping added for width and separator motions so they settle without
/// overshooting the glyph motion they accompany.
pub const EXTRA_DAMPING: f32 = 12.0;

/// Easing curve selector.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Easing {
    #[default]
    #[serde(rename = "linear")]
    Linear,
    #[serde(rename = "in-out", alias = "in_out")]
    InOut,
    #[serde(rename = "out")]
    Out,
}

impl Easing {
    #[inline]
    pub fn control_points(self) -> [f32; 4] {
        match self {
            Easing::Linear => [0.0, 0.0, 1.0, 1.0],
            Easing::InOut => [0.23, 0.0, 0.23, 0.99],
            Easing::Out => [0.0, 0.4, 0.4, 0.9],
        }
    }
}

/// Spring parameters.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpringConfig {
    pub mass: f32,
    pub damping: f32,
    pub stiffness: f32,
}

impl SpringConfig {
    /// Default spring for discrete slots.
    pub const DISCRETE: SpringConfig = SpringConfig {
        mass: 1.0,
        damping: 20.0,
        stiffness: 170.0,
    };

    /// Default spring for continuous strips.
    pub const CONTINUOUS: SpringConfig = SpringConfig {
        mass: 1.0,
        damping: 27.0,
        stiffness: 315.0,
    };

    pub fn validate(&self) -> SlotsResult<()> {
        let fields = [
            ("mass", self.mass),
            ("damping", self.damping),
            ("stiffness", self.stiffness),
        ];
        for (name, v) in fields {
            if !v.is_finite() || v <= 0.0 {
                return Err(SlotsError::InvalidSpring {
                    reason: format!("{name} must be a positive finite number, got {v}"),
                });
            }
        }
        Ok(())
    }

    #[inline]
    pub fn with_extra_damping(self, extra: f32) -> Self {
        Self {
            damping: self.damping + extra,
            ..self
        }
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::DISCRETE
    }
}

/// Resolved timing for one controller: a fixed-duration curve or a spring.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Timing {
    Duration { duration_ms: u32, easing: Easing },
    Spring { spring: SpringConfig },
}

impl Default for Timing {
    fn default() -> Self {
        Timing::Duration {
            duration_ms: DEFAULT_DURATION_MS,
            easing: Easing::Linear,
        }
    }
}

impl Timing {
    /// Full-length motion (glyph offsets, separator scale).
    pub fn motion(&self) -> Motion {
        match *self {
            Timing::Duration {
                duration_ms,
                easing,
            } => Motion::timed(duration_ms, easing),
            Timing::Spring { spring } => Motion::Spring { spring },
        }
    }

    /// Timed motion with its duration multiplied by `factor`; springs are
    /// unchanged.
    pub fn scaled(&self, factor: f32) -> Motion {
        match *self {
            Timing::Duration {
                duration_ms,
                easing,
            } => Motion::timed((duration_ms as f32 * factor) as u32, easing),
            Timing::Spring { spring } => Motion::Spring { spring },
        }
    }

    /// Half-length timed motion; springs are unchanged.
    #[inline]
    pub fn half(&self) -> Motion {
        self.scaled(0.5)
    }

    /// Half-length timed motion or an extra-damped spring (slot widths).
    pub fn half_damped(&self) -> Motion {
        match *self {
            Timing::Spring { spring } => Motion::Spring {
                spring: spring.with_extra_damping(EXTRA_DAMPING),
            },
            _ => self.half(),
        }
    }

    /// Full-length timed motion or an extra-damped spring (separators).
    pub fn damped(&self) -> Motion {
        match *self {
            Timing::Spring { spring } => Motion::Spring {
                spring: spring.with_extra_damping(EXTRA_DAMPING),
            },
            _ => self.motion(),
        }
    }
}

/// One animation intent.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Motion {
    /// Apply immediately (zero duration).
    Instant,
    Timed {
        duration_ms: u32,
        bezier: [f32; 4],
    },
    Spring {
        spring: SpringConfig,
    },
}

impl Motion {
    #[inline]
    pub fn timed(duration_ms: u32, easing: Easing) -> Self {
        Motion::Timed {
            duration_ms,
            bezier: easing.control_points(),
        }
    }

    #[inline]
    pub fn is_instant(&self) -> bool {
        matches!(self, Motion::Instant)
    }
}

/// A scalar property moving from `from` to `to` with `motion`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tween {
    pub from: f32,
    pub to: f32,
    pub motion: Motion,
}

impl Tween {
    #[inline]
    pub fn new(from: f32, to: f32, motion: Motion) -> Self {
        Self { from, to, motion }
    }

    /// Snap to `value` without animating.
    #[inline]
    pub fn set(value: f32) -> Self {
        Self::new(value, value, Motion::Instant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_and_damped_variants() {
        let timed = Timing::Duration {
            duration_ms: 500,
            easing: Easing::Out,
        };
        assert_eq!(timed.half(), Motion::timed(250, Easing::Out));
        assert_eq!(timed.damped(), Motion::timed(500, Easing::Out));

        let spring = Timing::Spring {
            spring: SpringConfig::DISCRETE,
        };
        match spring.half_damped() {
            Motion::Spring { spring } => assert_eq!(spring.damping, 32.0),
            other => panic!("unexpected motion {other:?}"),
        }
        assert_eq!(
            spring.half(),
            Motion::Spring {
                spring: SpringConfig::DISCRETE
            }
        );
    }

    #[test]
    fn easing_parses_from_json_names() {
        let e: Easing = serde_json::from_str("\"in-out\"").unwrap();
        assert_eq!(e, Easing::InOut);
        let e: Easing = serde_json::from_str("\"out\"").unwrap();
        assert_eq!(e.control_points(), [0.0, 0.4, 0.4, 0.9]);
    }
}
