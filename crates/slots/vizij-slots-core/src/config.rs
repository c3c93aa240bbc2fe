//! Configuration surface for a slot-number controller.
//!
//! `SlotsConfig` is the raw, serde-friendly input (JSON from hosts); `validate`
//! turns it into `Settings`, which the controller keeps for its lifetime.

use serde::{Deserialize, Serialize};

use crate::error::{SlotsError, SlotsResult};
use crate::format::checked_precision;
use crate::motion::{
    Easing, SpringConfig, Timing, DEFAULT_CONTINUOUS_DURATION_MS, DEFAULT_DURATION_MS,
};

/// Measured glyph sizes, in whatever unit the host lays out with.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GlyphMetrics {
    pub digit_widths: [f32; 10],
    pub comma_width: f32,
    pub period_width: f32,
    /// Height of one slot; glyph offsets are expressed in multiples of it.
    pub height: f32,
}

impl GlyphMetrics {
    /// Monospace metrics: every digit `width` wide, separators half of that.
    pub fn monospace(width: f32, height: f32) -> Self {
        Self {
            digit_widths: [width; 10],
            comma_width: width * 0.5,
            period_width: width * 0.5,
            height,
        }
    }

    #[inline]
    pub fn digit_width(&self, digit: u8) -> f32 {
        self.digit_widths
            .get(digit as usize)
            .copied()
            .unwrap_or_default()
    }

    pub fn validate(&self) -> SlotsResult<()> {
        let widths = self
            .digit_widths
            .iter()
            .chain([&self.comma_width, &self.period_width]);
        for w in widths {
            if !w.is_finite() || *w < 0.0 {
                return Err(SlotsError::InvalidMetrics {
                    reason: format!("glyph width must be finite and >= 0, got {w}"),
                });
            }
        }
        if !self.height.is_finite() || self.height <= 0.0 {
            return Err(SlotsError::InvalidMetrics {
                reason: format!("slot height must be finite and > 0, got {}", self.height),
            });
        }
        Ok(())
    }
}

impl Default for GlyphMetrics {
    fn default() -> Self {
        Self::monospace(1.0, 1.0)
    }
}

/// `spring: true` selects the default spring; an object overrides it.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpringSpec {
    Enabled(bool),
    Custom(SpringConfig),
}

/// Animation style.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Jump-cut between two digits with an overlap transition.
    #[default]
    Discrete,
    /// Roll through every intermediate digit.
    Continuous,
}

/// Raw configuration as supplied by the host.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotsConfig {
    /// Text drawn before the first slot (currency symbol and the like).
    pub prefix: Option<String>,
    /// Thousands grouping.
    #[serde(alias = "includeComma")]
    pub include_comma: bool,
    /// Fixed decimal places.
    pub precision: Option<i32>,
    /// Duration in milliseconds; excludes `spring`.
    #[serde(alias = "animationDuration")]
    pub animation_duration: Option<u32>,
    /// Easing curve; excludes `spring`.
    pub easing: Option<Easing>,
    pub spring: Option<SpringSpec>,
    /// Continuous (rolling) mode.
    #[serde(alias = "animateIntermediateValues")]
    pub animate_intermediate_values: bool,
    pub metrics: GlyphMetrics,
}

impl SlotsConfig {
    /// Parse a JSON configuration object.
    pub fn from_json(s: &str) -> SlotsResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        if self.animate_intermediate_values {
            Mode::Continuous
        } else {
            Mode::Discrete
        }
    }

    /// Check the configuration and resolve defaults.
    pub fn validate(&self) -> SlotsResult<Settings> {
        let precision = checked_precision(self.precision)?;
        self.metrics.validate()?;
        let mode = self.mode();

        let spring = match self.spring {
            None | Some(SpringSpec::Enabled(false)) => None,
            Some(SpringSpec::Enabled(true)) => Some(match mode {
                Mode::Discrete => SpringConfig::DISCRETE,
                Mode::Continuous => SpringConfig::CONTINUOUS,
            }),
            Some(SpringSpec::Custom(cfg)) => {
                cfg.validate()?;
                Some(cfg)
            }
        };

        let timing = match spring {
            Some(spring) => {
                if self.animation_duration.is_some() || self.easing.is_some() {
                    return Err(SlotsError::ConflictingTiming);
                }
                Timing::Spring { spring }
            }
            None => Timing::Duration {
                duration_ms: self.animation_duration.unwrap_or(match mode {
                    Mode::Discrete => DEFAULT_DURATION_MS,
                    Mode::Continuous => DEFAULT_CONTINUOUS_DURATION_MS,
                }),
                easing: self.easing.unwrap_or_default(),
            },
        };

        Ok(Settings {
            prefix: self.prefix.clone(),
            grouping: self.include_comma,
            precision,
            timing,
            mode,
            metrics: self.metrics.clone(),
        })
    }
}

/// Validated configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub prefix: Option<String>,
    pub grouping: bool,
    pub precision: usize,
    pub timing: Timing,
    pub mode: Mode,
    pub metrics: GlyphMetrics,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            prefix: None,
            grouping: false,
            precision: 0,
            timing: Timing::default(),
            mode: Mode::Discrete,
            metrics: GlyphMetrics::default(),
        }
    }
}
