//! Field-by-field hydration of untyped JSON into `Raw` entities.
//!
//! Missing keys and `null` take the entity default. Present keys must have
//! the right JSON type; anything else is an `InvalidShape` error naming the
//! field. Durations are accepted as strings or numbers and left unconverted.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::error::{ModelError, ModelResult};
use crate::model::{
    ApiDefinition, ApiGroup, BackendConfig, FieldPath, HealthCheckConfig, HostConfig, Raw,
    RawDuration,
};

/// Build a typed value from untyped JSON.
pub trait Hydrate: Sized {
    fn hydrate(value: &Value, path: &FieldPath) -> ModelResult<Self>;
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn shape_error(path: FieldPath, expected: &'static str, found: &Value) -> ModelError {
    ModelError::InvalidShape {
        path,
        expected,
        found: json_type(found),
    }
}

/// Typed accessors over one JSON object.
pub(crate) struct Fields<'a> {
    map: &'a Map<String, Value>,
    path: &'a FieldPath,
}

impl<'a> Fields<'a> {
    pub(crate) fn new(value: &'a Value, path: &'a FieldPath) -> ModelResult<Self> {
        match value {
            Value::Object(map) => Ok(Self { map, path }),
            other => Err(shape_error(path.clone(), "object", other)),
        }
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        self.map.get(key).filter(|v| !v.is_null())
    }

    pub(crate) fn string(&self, key: &str, default: &str) -> ModelResult<String> {
        match self.get(key) {
            None => Ok(default.to_string()),
            Some(Value::String(s)) => Ok(s.clone()),
            Some(other) => Err(shape_error(self.path.field(key), "string", other)),
        }
    }

    pub(crate) fn boolean(&self, key: &str, default: bool) -> ModelResult<bool> {
        match self.get(key) {
            None => Ok(default),
            Some(Value::Bool(b)) => Ok(*b),
            Some(other) => Err(shape_error(self.path.field(key), "boolean", other)),
        }
    }

    pub(crate) fn unsigned(&self, key: &str, default: u32) -> ModelResult<u32> {
        match self.get(key) {
            None => Ok(default),
            Some(value) => value
                .as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .ok_or_else(|| shape_error(self.path.field(key), "non-negative integer", value)),
        }
    }

    pub(crate) fn string_list(&self, key: &str) -> ModelResult<Vec<String>> {
        let path = self.path.field(key);
        let Some(items) = self.array(key)? else {
            return Ok(Vec::new());
        };
        items
            .iter()
            .enumerate()
            .map(|(i, item)| match item {
                Value::String(s) => Ok(s.clone()),
                other => Err(shape_error(path.index(i), "string", other)),
            })
            .collect()
    }

    pub(crate) fn string_map(&self, key: &str) -> ModelResult<BTreeMap<String, String>> {
        let path = self.path.field(key);
        let Some(entries) = self.object(key)? else {
            return Ok(BTreeMap::new());
        };
        entries
            .iter()
            .map(|(k, v)| match v {
                Value::String(s) => Ok((k.clone(), s.clone())),
                other => Err(shape_error(path.field(k), "string", other)),
            })
            .collect()
    }

    pub(crate) fn object(&self, key: &str) -> ModelResult<Option<&'a Map<String, Value>>> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::Object(map)) => Ok(Some(map)),
            Some(other) => Err(shape_error(self.path.field(key), "object", other)),
        }
    }

    pub(crate) fn array(&self, key: &str) -> ModelResult<Option<&'a Vec<Value>>> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::Array(items)) => Ok(Some(items)),
            Some(other) => Err(shape_error(self.path.field(key), "array", other)),
        }
    }

    /// Hydrate every element of an array field, or use `default` when the
    /// field is absent. An explicit empty array stays empty.
    pub(crate) fn list<T: Hydrate>(
        &self,
        key: &str,
        default: impl FnOnce() -> Vec<T>,
    ) -> ModelResult<Vec<T>> {
        let path = self.path.field(key);
        match self.array(key)? {
            None => Ok(default()),
            Some(items) => items
                .iter()
                .enumerate()
                .map(|(i, item)| T::hydrate(item, &path.index(i)))
                .collect(),
        }
    }

    pub(crate) fn duration(&self, key: &str, default: RawDuration) -> ModelResult<RawDuration> {
        match self.get(key) {
            None => Ok(default),
            Some(Value::String(s)) => Ok(RawDuration::Text(s.clone())),
            Some(value @ Value::Number(n)) => n
                .as_f64()
                .map(RawDuration::Number)
                .ok_or_else(|| shape_error(self.path.field(key), "finite number", value)),
            Some(other) => Err(shape_error(self.path.field(key), "duration string or number", other)),
        }
    }
}

impl Hydrate for HostConfig {
    fn hydrate(value: &Value, path: &FieldPath) -> ModelResult<Self> {
        let fields = Fields::new(value, path)?;
        let defaults = HostConfig::default();
        Ok(HostConfig {
            host: fields.string("host", &defaults.host)?,
            weight: fields.unsigned("weight", defaults.weight)?,
        })
    }
}

impl Hydrate for HealthCheckConfig<Raw> {
    fn hydrate(value: &Value, path: &FieldPath) -> ModelResult<Self> {
        let fields = Fields::new(value, path)?;
        let defaults = HealthCheckConfig::<Raw>::default();
        Ok(HealthCheckConfig {
            url: fields.string("url", &defaults.url)?,
            timeout: fields.duration("timeout", defaults.timeout)?,
        })
    }
}

impl Hydrate for BackendConfig<Raw> {
    fn hydrate(value: &Value, path: &FieldPath) -> ModelResult<Self> {
        let fields = Fields::new(value, path)?;
        let d = BackendConfig::<Raw>::default();
        Ok(BackendConfig {
            hosts: fields.list("hosts", || d.hosts.clone())?,
            timeout: fields.duration("timeout", d.timeout.clone())?,
            method: fields.string("method", &d.method)?,
            url_pattern: fields.string("url_pattern", &d.url_pattern)?,
            encoding: fields.string("encoding", &d.encoding)?,
            group: fields.string("group", &d.group)?,
            blacklist: fields.string_list("blacklist")?,
            whitelist: fields.string_list("whitelist")?,
            mapping: fields.string_map("mapping")?,
            is_collection: fields.boolean("is_collection", d.is_collection)?,
            wrap_collection_to_json: fields
                .boolean("wrap_collection_to_json", d.wrap_collection_to_json)?,
            target: fields.string("target", &d.target)?,
            middleware: fields.object("middleware")?.cloned().unwrap_or_default(),
            disable_host_sanitize: fields
                .boolean("disable_host_sanitize", d.disable_host_sanitize)?,
            lb_mode: fields.string("lb_mode", &d.lb_mode)?,
        })
    }
}

impl Hydrate for ApiDefinition<Raw> {
    fn hydrate(value: &Value, path: &FieldPath) -> ModelResult<Self> {
        let fields = Fields::new(value, path)?;
        let d = ApiDefinition::<Raw>::default();
        Ok(ApiDefinition {
            name: fields.string("name", &d.name)?,
            active: fields.boolean("active", d.active)?,
            endpoint: fields.string("endpoint", &d.endpoint)?,
            hosts: fields.list("hosts", || d.hosts.clone())?,
            method: fields.string("method", &d.method)?,
            timeout: fields.duration("timeout", d.timeout.clone())?,
            cache_ttl: fields.duration("cache_ttl", d.cache_ttl.clone())?,
            output_encoding: fields.string("output_encoding", &d.output_encoding)?,
            except_querystrings: fields.string_list("except_querystrings")?,
            except_headers: fields.string_list("except_headers")?,
            middleware: fields.object("middleware")?.cloned().unwrap_or_default(),
            backend: fields.list("backend", || d.backend.clone())?,
        })
    }
}

impl Hydrate for ApiGroup<Raw> {
    fn hydrate(value: &Value, path: &FieldPath) -> ModelResult<Self> {
        let fields = Fields::new(value, path)?;
        Ok(ApiGroup {
            name: fields.string("name", "")?,
            definitions: fields.list("definitions", Vec::new)?,
        })
    }
}
