//! Duration string formatting and parsing.
//!
//! `to_duration` and `from_duration` are exact inverses for any value that
//! fits in whole nanoseconds:
//!
//! ```text
//! 0     → "0s"    → 0
//! 90    → "90s"   → 90
//! 3600  → "1h"    → 3600
//! 0.25  → "250ms" → 0.25
//! ```

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::model::{DurationText, Seconds};

/// Errors from formatting or parsing durations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DurationError {
    #[error("duration is empty")]
    Empty,

    #[error("duration must not be negative, got {0}")]
    Negative(f64),

    #[error("duration must be a finite number")]
    NotFinite,

    #[error("duration {0} seconds is out of range")]
    OutOfRange(f64),

    #[error("malformed duration {input:?}: {reason}")]
    Malformed { input: String, reason: String },

    #[error("unknown duration unit {0:?}")]
    UnknownUnit(String),
}

/// Unit applied to bare numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Unit {
    Nanoseconds,
    Microseconds,
    Milliseconds,
    #[default]
    Seconds,
    Minutes,
    Hours,
}

impl Unit {
    /// Length of one unit in nanoseconds.
    pub const fn nanos(self) -> u128 {
        match self {
            Unit::Nanoseconds => 1,
            Unit::Microseconds => 1_000,
            Unit::Milliseconds => 1_000_000,
            Unit::Seconds => 1_000_000_000,
            Unit::Minutes => 60_000_000_000,
            Unit::Hours => 3_600_000_000_000,
        }
    }

    pub const fn suffix(self) -> &'static str {
        match self {
            Unit::Nanoseconds => "ns",
            Unit::Microseconds => "us",
            Unit::Milliseconds => "ms",
            Unit::Seconds => "s",
            Unit::Minutes => "m",
            Unit::Hours => "h",
        }
    }
}

impl FromStr for Unit {
    type Err = DurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ns" => Ok(Unit::Nanoseconds),
            "us" | "µs" => Ok(Unit::Microseconds),
            "ms" => Ok(Unit::Milliseconds),
            "s" => Ok(Unit::Seconds),
            "m" => Ok(Unit::Minutes),
            "h" => Ok(Unit::Hours),
            other => Err(DurationError::UnknownUnit(other.to_string())),
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

// Largest first; the first unit that divides the value evenly wins.
const FORMAT_UNITS: [Unit; 6] = [
    Unit::Hours,
    Unit::Minutes,
    Unit::Seconds,
    Unit::Milliseconds,
    Unit::Microseconds,
    Unit::Nanoseconds,
];

/// Format seconds as `<integer><unit>` using the largest exact unit.
pub fn to_duration(secs: f64) -> Result<DurationText, DurationError> {
    let secs = Seconds::new(secs)?;
    let duration = Duration::try_from_secs_f64(secs.as_secs_f64())
        .map_err(|_| DurationError::OutOfRange(secs.as_secs_f64()))?;
    Ok(format_duration(duration))
}

/// Format a `Duration` as `<integer><unit>`.
pub fn format_duration(duration: Duration) -> DurationText {
    let nanos = duration.as_nanos();
    if nanos == 0 {
        return DurationText::new_unchecked("0s".to_string());
    }

    let unit = FORMAT_UNITS
        .into_iter()
        .find(|unit| nanos % unit.nanos() == 0)
        .unwrap_or(Unit::Nanoseconds);

    DurationText::new_unchecked(format!("{}{}", nanos / unit.nanos(), unit.suffix()))
}

/// Parse a duration string into seconds.
///
/// Bare numbers (`"90"`, `"1.5"`) are read in `default_unit`; anything else
/// goes through `humantime`, which accepts `"3s"`, `"250ms"`, `"1h 30m"`.
pub fn from_duration(input: &str, default_unit: Unit) -> Result<Seconds, DurationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(DurationError::Empty);
    }

    if let Ok(number) = trimmed.parse::<f64>() {
        return from_number(number, default_unit);
    }

    humantime::parse_duration(trimmed)
        .map(Seconds::from)
        .map_err(|e| DurationError::Malformed {
            input: input.to_string(),
            reason: e.to_string(),
        })
}

/// Interpret a bare number in `unit`.
pub fn from_number(value: f64, unit: Unit) -> Result<Seconds, DurationError> {
    if !value.is_finite() {
        return Err(DurationError::NotFinite);
    }
    if value < 0.0 {
        return Err(DurationError::Negative(value));
    }
    let secs = value * unit.nanos() as f64 / 1e9;
    if !secs.is_finite() {
        return Err(DurationError::OutOfRange(value));
    }
    Seconds::new(secs)
}

/// `<integer><unit>` with a unit the gateway reads.
fn is_wire_text(input: &str) -> bool {
    let digits = input.bytes().take_while(u8::is_ascii_digit).count();
    digits > 0 && input[digits..].parse::<Unit>().is_ok()
}

/// Check a duration string before it is stored.
///
/// Text already in `<integer><unit>` form is kept as written (`"3600s"`
/// stays `"3600s"`). Anything else `from_duration` accepts is re-formatted,
/// so `"2 days"` becomes `"48h"` and `"1h 30m"` becomes `"90m"`.
pub fn validate_text(input: &str) -> Result<DurationText, DurationError> {
    let secs = from_duration(input, Unit::Seconds)?;
    if is_wire_text(input) {
        return Ok(DurationText::new_unchecked(input.to_string()));
    }
    to_duration(secs.as_secs_f64())
}
