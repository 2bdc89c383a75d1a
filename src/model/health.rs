//! Health check settings.
//!
//! Not a field of [`ApiDefinition`](super::ApiDefinition). Callers holding a
//! stand-alone health check object hydrate and convert it directly.

use serde::Serialize;

use super::form::{Form, HEALTH_CHECK_TIMEOUT};
use super::path::FieldPath;

/// Probe URL and timeout for a backend health check.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(bound = "")]
pub struct HealthCheckConfig<F: Form> {
    pub url: String,
    pub timeout: F::Duration,
}

impl<F: Form> Default for HealthCheckConfig<F> {
    fn default() -> Self {
        Self {
            url: String::new(),
            timeout: F::default_duration(HEALTH_CHECK_TIMEOUT),
        }
    }
}

impl<F: Form> HealthCheckConfig<F> {
    pub(crate) fn try_map_durations<G, E, M>(
        self,
        path: &FieldPath,
        map: &mut M,
    ) -> Result<HealthCheckConfig<G>, E>
    where
        G: Form,
        M: FnMut(&FieldPath, F::Duration) -> Result<G::Duration, E>,
    {
        Ok(HealthCheckConfig {
            url: self.url,
            timeout: map(&path.field("timeout"), self.timeout)?,
        })
    }
}
