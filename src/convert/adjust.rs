//! Send and receive adjustment passes.
//!
//! Both passes walk the graph depth-first (group → definitions → backends)
//! and convert every duration field once. Which pass exists for a value is
//! decided by its form:
//!
//! ```text
//! receive_adjust: Raw | Wire   → Editor
//! send_adjust:    Raw | Editor → Wire
//! ```

use crate::convert::duration::{from_duration, from_number, to_duration, validate_text, DurationError, Unit};
use crate::error::{ModelError, ModelResult};
use crate::model::{
    ApiDefinition, ApiGroup, BackendConfig, DurationText, Editor, FieldPath, Form,
    HealthCheckConfig, Raw, RawDuration, Seconds, Wire,
};

/// Unit for durations given as bare numbers.
pub const DEFAULT_UNIT: Unit = Unit::Seconds;

/// Forms whose durations can be turned into editor seconds.
pub trait ReceiveForm: Form {
    fn receive(duration: Self::Duration) -> Result<Seconds, DurationError>;
}

/// Forms whose durations can be turned into wire strings.
pub trait SendForm: Form {
    fn send(duration: Self::Duration) -> Result<DurationText, DurationError>;
}

impl ReceiveForm for Raw {
    fn receive(duration: RawDuration) -> Result<Seconds, DurationError> {
        match duration {
            RawDuration::Text(text) => from_duration(&text, DEFAULT_UNIT),
            RawDuration::Number(value) => from_number(value, DEFAULT_UNIT),
        }
    }
}

impl ReceiveForm for Wire {
    fn receive(duration: DurationText) -> Result<Seconds, DurationError> {
        from_duration(duration.as_str(), DEFAULT_UNIT)
    }
}

impl SendForm for Raw {
    fn send(duration: RawDuration) -> Result<DurationText, DurationError> {
        match duration {
            // Wire-shaped text is kept; other accepted spellings are re-formatted.
            RawDuration::Text(text) => validate_text(&text),
            RawDuration::Number(value) => to_duration(value),
        }
    }
}

impl SendForm for Editor {
    fn send(duration: Seconds) -> Result<DurationText, DurationError> {
        to_duration(duration.as_secs_f64())
    }
}

fn receive_field<F: ReceiveForm>(path: &FieldPath, duration: F::Duration) -> ModelResult<Seconds> {
    let seconds = F::receive(duration).map_err(|source| ModelError::InvalidDurationFormat {
        path: path.clone(),
        source,
    })?;
    tracing::trace!(field = %path, seconds = seconds.as_secs_f64(), "duration received");
    Ok(seconds)
}

fn send_field<F: SendForm>(path: &FieldPath, duration: F::Duration) -> ModelResult<DurationText> {
    let text = F::send(duration).map_err(|source| ModelError::InvalidDurationFormat {
        path: path.clone(),
        source,
    })?;
    tracing::trace!(field = %path, duration = %text, "duration sent");
    Ok(text)
}

macro_rules! adjust_passes {
    ($($entity:ident),+ $(,)?) => {$(
        impl<F: ReceiveForm> $entity<F> {
            /// Convert every duration to editor seconds.
            pub fn receive_adjust(self) -> ModelResult<$entity<Editor>> {
                self.try_map_durations(&FieldPath::root(), &mut receive_field::<F>)
            }
        }

        impl<F: SendForm> $entity<F> {
            /// Convert every duration to its wire string.
            pub fn send_adjust(self) -> ModelResult<$entity<Wire>> {
                self.try_map_durations(&FieldPath::root(), &mut send_field::<F>)
            }
        }
    )+};
}

adjust_passes!(ApiGroup, ApiDefinition, BackendConfig, HealthCheckConfig);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editor_to_wire() {
        let mut def = ApiDefinition::<Editor>::default();
        def.timeout = Seconds::from_secs(90);
        def.backend[0].timeout = Seconds::new(0.5).unwrap();

        let wire = def.send_adjust().unwrap();
        assert_eq!(wire.timeout.as_str(), "90s");
        assert_eq!(wire.cache_ttl.as_str(), "1h");
        assert_eq!(wire.backend[0].timeout.as_str(), "500ms");
    }

    #[test]
    fn test_wire_to_editor() {
        let wire = ApiDefinition::<Wire>::default();
        let editor = wire.receive_adjust().unwrap();
        assert_eq!(editor.timeout, Seconds::from_secs(60));
        assert_eq!(editor.cache_ttl, Seconds::from_secs(3600));
        assert_eq!(editor.backend[0].timeout, Seconds::from_secs(3));
    }

    #[test]
    fn test_raw_passes() {
        let mut backend = BackendConfig::<Raw>::default();
        backend.timeout = RawDuration::Number(5.0);
        assert_eq!(backend.clone().receive_adjust().unwrap().timeout, Seconds::from_secs(5));
        assert_eq!(backend.send_adjust().unwrap().timeout.as_str(), "5s");

        let mut backend = BackendConfig::<Raw>::default();
        backend.timeout = RawDuration::Text("3600s".into());
        assert_eq!(backend.send_adjust().unwrap().timeout.as_str(), "3600s");
    }

    #[test]
    fn test_error_carries_path() {
        let mut group = ApiGroup::<Raw>::new("g");
        let mut def = ApiDefinition::<Raw>::default();
        def.backend.push(BackendConfig::default());
        def.backend[1].timeout = RawDuration::Text("abc".into());
        group.definitions.push(def);

        let err = group.receive_adjust().unwrap_err();
        assert!(err.is_duration());
        assert_eq!(err.path().as_str(), "definitions[0].backend[1].timeout");
    }

    #[test]
    fn test_health_check_passes() {
        let check = HealthCheckConfig::<Wire>::default();
        let editor = check.receive_adjust().unwrap();
        assert_eq!(editor.timeout, Seconds::from_secs(1));
        assert_eq!(editor.send_adjust().unwrap().timeout.as_str(), "1s");
    }
}
