//! Deserialization entry points.
//!
//! # Data Flow
//! ```text
//! untyped JSON
//!     → hydrate.rs (field-by-field, defaults fill gaps)  → Raw entities
//!     → convert::adjust (exactly one pass)
//!         Received → receive_adjust → Editor entities
//!         Outgoing → send_adjust    → Wire entities
//! ```
//!
//! # Design Decisions
//! - Hydration finishes before any duration is converted, so shape errors
//!   always win over duration errors
//! - Nothing is returned on failure; there is no partially hydrated graph

pub mod hydrate;

use serde::Serialize;
use serde_json::Value;

use crate::error::ModelResult;
use crate::model::{ApiDefinition, ApiGroup, Editor, FieldPath, Raw, Wire};

pub use hydrate::Hydrate;

/// Which way the data is travelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Just arrived from storage; convert to editor form.
    Received,
    /// About to leave the editor; convert to wire form.
    Outgoing,
}

impl Direction {
    pub fn from_received(is_received: bool) -> Self {
        if is_received {
            Direction::Received
        } else {
            Direction::Outgoing
        }
    }
}

/// Result of a deserialization call: editor form when received, wire form
/// otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum Adjusted<E, W> {
    Editor(E),
    Wire(W),
}

pub type AdjustedGroup = Adjusted<ApiGroup<Editor>, ApiGroup<Wire>>;
pub type AdjustedDefinition = Adjusted<ApiDefinition<Editor>, ApiDefinition<Wire>>;

impl<E, W> Adjusted<E, W> {
    pub fn into_editor(self) -> Option<E> {
        match self {
            Adjusted::Editor(e) => Some(e),
            Adjusted::Wire(_) => None,
        }
    }

    pub fn into_wire(self) -> Option<W> {
        match self {
            Adjusted::Wire(w) => Some(w),
            Adjusted::Editor(_) => None,
        }
    }

    pub fn direction(&self) -> Direction {
        match self {
            Adjusted::Editor(_) => Direction::Received,
            Adjusted::Wire(_) => Direction::Outgoing,
        }
    }
}

impl<E: Serialize, W: Serialize> Adjusted<E, W> {
    pub fn to_json(&self) -> serde_json::Result<Value> {
        match self {
            Adjusted::Editor(e) => serde_json::to_value(e),
            Adjusted::Wire(w) => serde_json::to_value(w),
        }
    }
}

/// Hydrate a group without converting durations.
pub fn hydrate_group(raw: &Value) -> ModelResult<ApiGroup<Raw>> {
    ApiGroup::hydrate(raw, &FieldPath::root())
}

/// Hydrate a definition without converting durations.
pub fn hydrate_definition(raw: &Value) -> ModelResult<ApiDefinition<Raw>> {
    ApiDefinition::hydrate(raw, &FieldPath::root())
}

/// Hydrate a stored group into editor form.
pub fn load_group(raw: &Value) -> ModelResult<ApiGroup<Editor>> {
    let group = hydrate_group(raw)?;
    tracing::debug!(
        group = %group.name,
        definitions = group.definitions.len(),
        "group hydrated, applying receive pass"
    );
    group.receive_adjust()
}

/// Hydrate an edited group into wire form.
pub fn prepare_group(raw: &Value) -> ModelResult<ApiGroup<Wire>> {
    let group = hydrate_group(raw)?;
    tracing::debug!(
        group = %group.name,
        definitions = group.definitions.len(),
        "group hydrated, applying send pass"
    );
    group.send_adjust()
}

/// Hydrate a stored definition into editor form.
pub fn load_definition(raw: &Value) -> ModelResult<ApiDefinition<Editor>> {
    let def = hydrate_definition(raw)?;
    tracing::debug!(
        definition = %def.name,
        backends = def.backend.len(),
        "definition hydrated, applying receive pass"
    );
    def.receive_adjust()
}

/// Hydrate an edited definition into wire form.
pub fn prepare_definition(raw: &Value) -> ModelResult<ApiDefinition<Wire>> {
    let def = hydrate_definition(raw)?;
    tracing::debug!(
        definition = %def.name,
        backends = def.backend.len(),
        "definition hydrated, applying send pass"
    );
    def.send_adjust()
}

/// Hydrate a group and apply the pass for `direction`.
pub fn deserialize_group_from_json(raw: &Value, direction: Direction) -> ModelResult<AdjustedGroup> {
    match direction {
        Direction::Received => load_group(raw).map(Adjusted::Editor),
        Direction::Outgoing => prepare_group(raw).map(Adjusted::Wire),
    }
}

/// Hydrate a definition and apply the pass for `direction`.
pub fn deserialize_definition_from_json(
    raw: &Value,
    direction: Direction,
) -> ModelResult<AdjustedDefinition> {
    match direction {
        Direction::Received => load_definition(raw).map(Adjusted::Editor),
        Direction::Outgoing => prepare_definition(raw).map(Adjusted::Wire),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HostConfig, Seconds};
    use serde_json::json;

    #[test]
    fn test_users_scenario() {
        let raw = json!({"name": "users", "backend": [{"timeout": "3s", "method": "POST"}]});
        let def = deserialize_definition_from_json(&raw, Direction::Received)
            .unwrap()
            .into_editor()
            .unwrap();

        assert_eq!(def.name, "users");
        assert_eq!(def.backend[0].timeout, Seconds::from_secs(3));
        assert_eq!(def.backend[0].method, "POST");
        assert_eq!(def.backend[0].hosts, vec![HostConfig::default()]);
    }

    #[test]
    fn test_empty_definition_outgoing() {
        let def = deserialize_definition_from_json(&json!({}), Direction::Outgoing)
            .unwrap()
            .into_wire()
            .unwrap();

        assert_eq!(def.hosts, vec![HostConfig::new("", 0)]);
        assert_eq!(def.backend.len(), 1);
        assert_eq!(def.timeout.as_str(), "1m");
        assert_eq!(def.cache_ttl.as_str(), "3600s");
        assert_eq!(def.backend[0].timeout.as_str(), "3s");
    }

    #[test]
    fn test_direction_selects_form() {
        let raw = json!({"name": "g", "definitions": [{"timeout": 30}]});
        let received = deserialize_group_from_json(&raw, Direction::from_received(true)).unwrap();
        assert_eq!(received.direction(), Direction::Received);
        assert_eq!(received.to_json().unwrap()["definitions"][0]["timeout"], json!(30));

        let outgoing = deserialize_group_from_json(&raw, Direction::from_received(false)).unwrap();
        assert_eq!(outgoing.direction(), Direction::Outgoing);
        assert_eq!(outgoing.to_json().unwrap()["definitions"][0]["timeout"], json!("30s"));
    }

    #[test]
    fn test_shape_error_before_duration_error() {
        // Malformed duration is listed first but never reached.
        let raw = json!({"timeout": "abc", "backend": "not-an-array"});
        let err = deserialize_definition_from_json(&raw, Direction::Received).unwrap_err();
        assert!(err.is_shape());
    }

    #[test]
    fn test_malformed_timeout() {
        let raw = json!({"timeout": "abc"});
        for direction in [Direction::Received, Direction::Outgoing] {
            let err = deserialize_definition_from_json(&raw, direction).unwrap_err();
            assert!(err.is_duration());
            assert_eq!(err.path().as_str(), "timeout");
        }
    }
}
