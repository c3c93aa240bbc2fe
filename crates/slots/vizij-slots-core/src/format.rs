//! Digit formatter: numeric value → canonical digit sequence.
//!
//! The digit sequence is the "new" side of every reconciliation, so it has to be
//! a pure function of `(value, precision, grouping)`. Grouping only affects the
//! display text; the digit sequence never contains separators.

use serde::{Deserialize, Serialize};

use crate::error::{SlotsError, SlotsResult};

pub const GROUP_SEPARATOR: char = ',';
pub const DECIMAL_SEPARATOR: char = '.';
pub const GROUP_SIZE: usize = 3;
/// Largest accepted decimal count.
pub const MAX_PRECISION: usize = 100;

/// A value rendered into fixed-precision digits.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedNumber {
    /// Digits 0-9, most significant first, integer and fractional parts joined.
    pub digits: Vec<u8>,
    /// Number of trailing digits that belong to the fractional part.
    pub precision: usize,
    /// Display text (`1,234.50`).
    pub text: String,
}

impl FormattedNumber {
    /// Number of digits before the decimal point.
    #[inline]
    pub fn integer_len(&self) -> usize {
        self.digits.len() - self.precision
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.digits.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// Leading digit, used to pick the alignment direction.
    #[inline]
    pub fn leading_digit(&self) -> Option<u8> {
        self.digits.first().copied()
    }
}

/// Validate a raw precision and convert it to a decimal count.
pub fn checked_precision(precision: Option<i32>) -> SlotsResult<usize> {
    match precision {
        None => Ok(0),
        Some(p) if p < 0 => Err(SlotsError::NegativePrecision { precision: p }),
        Some(p) => check_max(p as usize),
    }
}

fn check_max(precision: usize) -> SlotsResult<usize> {
    if precision > MAX_PRECISION {
        return Err(SlotsError::PrecisionTooLarge {
            precision,
            max: MAX_PRECISION,
        });
    }
    Ok(precision)
}

/// Format `value` with `precision` fixed decimals.
///
/// Fails for NaN/infinite or negative values and for a precision that is
/// negative or above [`MAX_PRECISION`].
pub fn format_number(
    value: f64,
    precision: Option<i32>,
    grouping: bool,
) -> SlotsResult<FormattedNumber> {
    format_fixed(value, checked_precision(precision)?, grouping)
}

/// Format `value` with an already validated decimal count.
pub fn format_fixed(value: f64, precision: usize, grouping: bool) -> SlotsResult<FormattedNumber> {
    let precision = check_max(precision)?;
    if !value.is_finite() {
        return Err(SlotsError::NonFiniteValue { value });
    }
    if value < 0.0 {
        return Err(SlotsError::NegativeValue { value });
    }
    // -0.0 compares equal to 0.0 but would print a sign.
    let value = if value == 0.0 { 0.0 } else { value };

    let fixed = format!("{value:.precision$}");
    let (int_part, frac_part) = match fixed.split_once(DECIMAL_SEPARATOR) {
        Some((i, f)) => (i, f),
        None => (fixed.as_str(), ""),
    };

    let digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes())
        .map(|b| b - b'0')
        .collect();

    let mut text = if grouping {
        group_digits(int_part)
    } else {
        int_part.to_string()
    };
    if precision > 0 {
        text.push(DECIMAL_SEPARATOR);
        text.push_str(frac_part);
    }

    Ok(FormattedNumber {
        digits,
        precision,
        text,
    })
}

/// Insert a group separator every three digits counting from the right.
pub fn group_digits(int_part: &str) -> String {
    let len = int_part.len();
    let mut out = String::with_capacity(len + len / GROUP_SIZE);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % GROUP_SIZE == 0 {
            out.push(GROUP_SEPARATOR);
        }
        out.push(ch);
    }
    out
}

/// Slot index after which the decimal point is drawn, for a row of
/// `slot_count` slots carrying `precision` fractional digits.
#[inline]
pub fn decimal_point_after(slot_count: usize, precision: usize) -> Option<usize> {
    if precision == 0 || slot_count <= precision {
        return None;
    }
    Some(slot_count - precision - 1)
}
