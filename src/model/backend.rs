//! Backend call configuration.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use super::form::{Form, BACKEND_TIMEOUT};
use super::host::{default_hosts, HostConfig};
use super::path::FieldPath;

/// One backend call made on behalf of an endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(bound = "")]
pub struct BackendConfig<F: Form> {
    /// Hosts to balance over. Blank rows fall back to the definition's hosts.
    pub hosts: Vec<HostConfig>,

    pub timeout: F::Duration,

    /// HTTP method used against the backend.
    pub method: String,

    /// Path template appended to the chosen host.
    pub url_pattern: String,

    /// Response body format (`json` or `xml`).
    pub encoding: String,

    /// Key to nest this backend's result under in the merged response.
    pub group: String,

    /// Dotted field paths removed from the response.
    pub blacklist: Vec<String>,

    /// Dotted field paths kept in the response.
    pub whitelist: Vec<String>,

    /// Field renames applied to the response.
    pub mapping: BTreeMap<String, String>,

    pub is_collection: bool,

    /// Wrap an array result as `{"collection": [...]}`.
    pub wrap_collection_to_json: bool,

    /// Dotted path of the sub-object to keep.
    pub target: String,

    pub middleware: Map<String, Value>,

    pub disable_host_sanitize: bool,

    /// Load-balancing mode: `""`, `"rr"` or `"wrr"`.
    pub lb_mode: String,
}

impl<F: Form> Default for BackendConfig<F> {
    fn default() -> Self {
        Self {
            hosts: default_hosts(),
            timeout: F::default_duration(BACKEND_TIMEOUT),
            method: "GET".to_string(),
            url_pattern: String::new(),
            encoding: "json".to_string(),
            group: String::new(),
            blacklist: Vec::new(),
            whitelist: Vec::new(),
            mapping: BTreeMap::new(),
            is_collection: false,
            wrap_collection_to_json: false,
            target: String::new(),
            middleware: Map::new(),
            disable_host_sanitize: false,
            lb_mode: String::new(),
        }
    }
}

impl<F: Form> BackendConfig<F> {
    /// Hosts this backend calls: its own non-blank hosts, or the
    /// definition-level hosts when it has none.
    pub fn resolved_hosts<'a>(&'a self, inherited: &'a [HostConfig]) -> Vec<&'a HostConfig> {
        let own: Vec<&HostConfig> = self.hosts.iter().filter(|h| !h.is_blank()).collect();
        if !own.is_empty() {
            return own;
        }
        inherited.iter().filter(|h| !h.is_blank()).collect()
    }

    pub(crate) fn try_map_durations<G, E, M>(
        self,
        path: &FieldPath,
        map: &mut M,
    ) -> Result<BackendConfig<G>, E>
    where
        G: Form,
        M: FnMut(&FieldPath, F::Duration) -> Result<G::Duration, E>,
    {
        Ok(BackendConfig {
            timeout: map(&path.field("timeout"), self.timeout)?,
            hosts: self.hosts,
            method: self.method,
            url_pattern: self.url_pattern,
            encoding: self.encoding,
            group: self.group,
            blacklist: self.blacklist,
            whitelist: self.whitelist,
            mapping: self.mapping,
            is_collection: self.is_collection,
            wrap_collection_to_json: self.wrap_collection_to_json,
            target: self.target,
            middleware: self.middleware,
            disable_host_sanitize: self.disable_host_sanitize,
            lb_mode: self.lb_mode,
        })
    }
}
