//! Error types for slot-number formatting and configuration.

use serde::{Deserialize, Serialize};

/// Errors raised while validating configuration or formatting a value.
///
/// Reconciliation itself never fails; everything here is a caller error that
/// is reported before any slot state is touched.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum SlotsError {
    /// NaN or infinite input value
    #[error("value must be finite, got {value}")]
    NonFiniteValue { value: f64 },

    /// Negative input value
    #[error("value must not be negative, got {value}")]
    NegativeValue { value: f64 },

    /// Negative decimal precision
    #[error("precision must not be negative, got {precision}")]
    NegativePrecision { precision: i32 },

    /// More decimals than the formatter can render
    #[error("precision must be at most {max}, got {precision}")]
    PrecisionTooLarge { precision: usize, max: usize },

    /// Both a timed animation and a spring were configured
    #[error("animation_duration/easing and spring are mutually exclusive")]
    ConflictingTiming,

    /// Spring parameters that cannot describe a damped spring
    #[error("invalid spring: {reason}")]
    InvalidSpring { reason: String },

    /// Glyph metrics that cannot be laid out
    #[error("invalid glyph metrics: {reason}")]
    InvalidMetrics { reason: String },

    /// Configuration JSON could not be parsed
    #[error("config parse error: {reason}")]
    Config { reason: String },
}

impl From<serde_json::Error> for SlotsError {
    fn from(err: serde_json::Error) -> Self {
        SlotsError::Config {
            reason: err.to_string(),
        }
    }
}

pub type SlotsResult<T> = Result<T, SlotsError>;
