//! Representation forms for duration-bearing fields.
//!
//! Every entity with a duration is generic over a [`Form`]. The form decides
//! what a duration field holds:
//!
//! ```text
//! Raw     string or number, exactly as found in the input JSON
//! Wire    formatted string ("3s", "1m") for storage and transmission
//! Editor  numeric seconds for the admin UI
//! ```
//!
//! The adjustment passes change the form parameter, so a wire-form value has
//! no send pass and an editor-form value has no receive pass.

use std::fmt;
use std::time::Duration;

use serde::{Serialize, Serializer};

use crate::convert::duration::DurationError;

/// Selects the representation of duration fields.
pub trait Form:
    fmt::Debug + Clone + Copy + PartialEq + Default + Send + Sync + 'static
{
    /// Type stored in every duration field.
    type Duration: fmt::Debug + Clone + PartialEq + Serialize + Send + Sync;

    /// Canonical default for a duration field in this form.
    fn default_duration(default: DefaultDuration) -> Self::Duration;
}

/// Hydrated straight from JSON; no conversion applied yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Raw;

/// Storage/transmission form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Wire;

/// Editing form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Editor;

impl Form for Raw {
    type Duration = RawDuration;

    fn default_duration(default: DefaultDuration) -> RawDuration {
        RawDuration::Text(default.text.to_string())
    }
}

impl Form for Wire {
    type Duration = DurationText;

    fn default_duration(default: DefaultDuration) -> DurationText {
        DurationText(default.text.to_string())
    }
}

impl Form for Editor {
    type Duration = Seconds;

    fn default_duration(default: DefaultDuration) -> Seconds {
        Seconds::from_secs(default.secs)
    }
}

/// Default value of a duration field, in both representations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultDuration {
    pub text: &'static str,
    pub secs: u64,
}

pub const HEALTH_CHECK_TIMEOUT: DefaultDuration = DefaultDuration { text: "1s", secs: 1 };
pub const BACKEND_TIMEOUT: DefaultDuration = DefaultDuration { text: "3s", secs: 3 };
pub const DEFINITION_TIMEOUT: DefaultDuration = DefaultDuration { text: "1m", secs: 60 };
pub const DEFINITION_CACHE_TTL: DefaultDuration = DefaultDuration { text: "3600s", secs: 3600 };

/// A duration field as it appeared in untyped input.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RawDuration {
    Text(String),
    Number(f64),
}

/// Formatted duration string, e.g. `"3s"` or `"1h"`.
///
/// Always `<integer><unit>`: produced by formatting seconds, or by keeping
/// an existing string that is already in that form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DurationText(String);

impl DurationText {
    pub(crate) fn new_unchecked(text: String) -> Self {
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for DurationText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Non-negative, finite number of seconds.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Seconds(f64);

impl Seconds {
    pub const ZERO: Seconds = Seconds(0.0);

    pub fn new(secs: f64) -> Result<Self, DurationError> {
        if !secs.is_finite() {
            return Err(DurationError::NotFinite);
        }
        if secs < 0.0 {
            return Err(DurationError::Negative(secs));
        }
        Ok(Self(secs))
    }

    pub fn from_secs(secs: u64) -> Self {
        Self(secs as f64)
    }

    pub fn as_secs_f64(self) -> f64 {
        self.0
    }

    pub fn as_duration(self) -> Duration {
        Duration::from_secs_f64(self.0)
    }
}

impl From<Duration> for Seconds {
    fn from(duration: Duration) -> Self {
        Self(duration.as_secs_f64())
    }
}

// Largest integer an f64 holds exactly.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

impl Serialize for Seconds {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // Whole seconds print as integers so the editor sees `3`, not `3.0`.
        if self.0.fract() == 0.0 && self.0 <= MAX_EXACT_INTEGER {
            serializer.serialize_u64(self.0 as u64)
        } else {
            serializer.serialize_f64(self.0)
        }
    }
}
