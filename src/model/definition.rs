//! Public endpoint definitions.

use serde::Serialize;
use serde_json::{Map, Value};

use super::backend::BackendConfig;
use super::form::{Form, DEFINITION_CACHE_TTL, DEFINITION_TIMEOUT};
use super::host::{default_hosts, HostConfig};
use super::path::FieldPath;

/// One endpoint exposed by the gateway.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(bound = "")]
pub struct ApiDefinition<F: Form> {
    /// Identifier, unique within its group.
    pub name: String,

    pub active: bool,

    /// Listen path, unique across all groups.
    pub endpoint: String,

    /// Hosts used by backends that do not list their own.
    pub hosts: Vec<HostConfig>,

    pub method: String,

    pub timeout: F::Duration,

    pub cache_ttl: F::Duration,

    pub output_encoding: String,

    /// Query string names not forwarded to backends.
    pub except_querystrings: Vec<String>,

    /// Header names not forwarded to backends.
    pub except_headers: Vec<String>,

    pub middleware: Map<String, Value>,

    pub backend: Vec<BackendConfig<F>>,
}

impl<F: Form> Default for ApiDefinition<F> {
    fn default() -> Self {
        Self {
            name: String::new(),
            active: false,
            endpoint: String::new(),
            hosts: default_hosts(),
            method: "GET".to_string(),
            timeout: F::default_duration(DEFINITION_TIMEOUT),
            cache_ttl: F::default_duration(DEFINITION_CACHE_TTL),
            output_encoding: "json".to_string(),
            except_querystrings: Vec::new(),
            except_headers: Vec::new(),
            middleware: Map::new(),
            backend: vec![BackendConfig::default()],
        }
    }
}

impl<F: Form> ApiDefinition<F> {
    /// Convert every duration field, own fields first and then each backend
    /// in order.
    pub(crate) fn try_map_durations<G, E, M>(
        self,
        path: &FieldPath,
        map: &mut M,
    ) -> Result<ApiDefinition<G>, E>
    where
        G: Form,
        M: FnMut(&FieldPath, F::Duration) -> Result<G::Duration, E>,
    {
        let timeout = map(&path.field("timeout"), self.timeout)?;
        let cache_ttl = map(&path.field("cache_ttl"), self.cache_ttl)?;

        let backend_path = path.field("backend");
        let backend = self
            .backend
            .into_iter()
            .enumerate()
            .map(|(i, b)| b.try_map_durations(&backend_path.index(i), &mut *map))
            .collect::<Result<Vec<_>, E>>()?;

        Ok(ApiDefinition {
            name: self.name,
            active: self.active,
            endpoint: self.endpoint,
            hosts: self.hosts,
            method: self.method,
            timeout,
            cache_ttl,
            output_encoding: self.output_encoding,
            except_querystrings: self.except_querystrings,
            except_headers: self.except_headers,
            middleware: self.middleware,
            backend,
        })
    }
}
