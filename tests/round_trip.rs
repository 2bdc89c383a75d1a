//! Load/save cycles through the public entry points.

use serde_json::json;

use apigw_model::convert::{from_duration, to_duration, Unit};
use apigw_model::model::{HostConfig, Seconds};
use apigw_model::serializer::{self, Direction};
use apigw_model::{deserialize_definition_from_json, deserialize_group_from_json};

mod common;

#[test]
fn test_wire_group_round_trip() {
    let wire = common::wire_group();

    let editor = serializer::load_group(&wire).unwrap();
    let def = &editor.definitions[0];
    assert_eq!(def.timeout, Seconds::from_secs(30));
    assert_eq!(def.cache_ttl, Seconds::from_secs(3600));
    assert_eq!(def.backend[0].timeout, Seconds::from_secs(3));

    let back = editor.send_adjust().unwrap();
    assert_eq!(serde_json::to_value(&back).unwrap(), wire);
}

#[test]
fn test_sparse_group_fills_defaults() {
    let editor = serializer::load_group(&common::sparse_wire_group()).unwrap();
    let def = &editor.definitions[0];

    assert!(!def.active);
    assert_eq!(def.method, "GET");
    assert_eq!(def.cache_ttl, Seconds::from_secs(3600));
    assert_eq!(def.hosts, vec![HostConfig::new("http://orders.internal:9000", 0)]);
    assert_eq!(def.backend[0].timeout.as_secs_f64(), 0.5);
    assert_eq!(def.backend[0].encoding, "json");

    let wire = serde_json::to_value(editor.send_adjust().unwrap()).unwrap();
    let def = &wire["definitions"][0];
    assert_eq!(def["timeout"], json!("90s"));
    assert_eq!(def["cache_ttl"], json!("1h"));
    assert_eq!(def["backend"][0]["timeout"], json!("500ms"));
    assert_eq!(def["backend"][0]["hosts"], json!([{"host": "", "weight": 0}]));
}

#[test]
fn test_editor_json_round_trip() {
    // The editor posts numbers; saving and reloading gives them back.
    let editor_json = json!({
        "name": "g",
        "definitions": [{"name": "d", "timeout": 45, "cache_ttl": 600, "backend": [{"timeout": 2}]}]
    });

    let wire = deserialize_group_from_json(&editor_json, Direction::Outgoing)
        .unwrap()
        .to_json()
        .unwrap();
    assert_eq!(wire["definitions"][0]["timeout"], json!("45s"));
    assert_eq!(wire["definitions"][0]["cache_ttl"], json!("10m"));

    let reloaded = deserialize_group_from_json(&wire, Direction::Received)
        .unwrap()
        .to_json()
        .unwrap();
    assert_eq!(reloaded["definitions"][0]["timeout"], json!(45));
    assert_eq!(reloaded["definitions"][0]["cache_ttl"], json!(600));
    assert_eq!(reloaded["definitions"][0]["backend"][0]["timeout"], json!(2));
}

#[test]
fn test_duration_inverse() {
    for secs in [0u64, 1, 60, 3600, 86400] {
        let text = to_duration(secs as f64).unwrap();
        assert_eq!(from_duration(text.as_str(), Unit::Seconds).unwrap(), Seconds::from_secs(secs));
    }
}

#[test]
fn test_empty_definition_defaults() {
    let def = deserialize_definition_from_json(&json!({}), Direction::Outgoing)
        .unwrap()
        .into_wire()
        .unwrap();
    assert_eq!(def.hosts, vec![HostConfig::default()]);
    assert_eq!(def.backend.len(), 1);
    assert_eq!(def.backend[0].method, "GET");
}

#[test]
fn test_backend_not_an_array() {
    let err = deserialize_definition_from_json(&json!({"backend": "not-an-array"}), Direction::Received)
        .unwrap_err();
    assert!(err.is_shape());
    assert_eq!(err.path().as_str(), "backend");
}

#[test]
fn test_malformed_timeout() {
    let err = deserialize_definition_from_json(&json!({"timeout": "abc"}), Direction::Received)
        .unwrap_err();
    assert!(err.is_duration());
}

#[test]
fn test_users_scenario() {
    let raw = json!({"name": "users", "backend": [{"timeout": "3s", "method": "POST"}]});
    let def = deserialize_definition_from_json(&raw, Direction::from_received(true))
        .unwrap()
        .into_editor()
        .unwrap();
    assert_eq!(def.name, "users");
    assert_eq!(def.backend[0].timeout, Seconds::from_secs(3));
    assert_eq!(def.backend[0].method, "POST");
    assert_eq!(def.backend[0].hosts, vec![HostConfig::default()]);
}

#[test]
fn test_group_error_path() {
    let raw = json!({"definitions": [{}, {"backend": [{}, {"timeout": "later"}]}]});
    let err = deserialize_group_from_json(&raw, Direction::Received).unwrap_err();
    assert_eq!(err.path().as_str(), "definitions[1].backend[1].timeout");
}

#[test]
fn test_legacy_default_ttl_is_rewritten() {
    // Older stores spell the default TTL in seconds; one edit cycle
    // writes it back in the largest exact unit.
    let mut wire = common::wire_group();
    wire["definitions"][0]["cache_ttl"] = json!("3600s");

    let editor = serializer::load_group(&wire).unwrap();
    assert_eq!(editor.definitions[0].cache_ttl, Seconds::from_secs(3600));

    let saved = serde_json::to_value(editor.send_adjust().unwrap()).unwrap();
    assert_eq!(saved["definitions"][0]["cache_ttl"], json!("1h"));

    // Sent straight through without an edit, the stored spelling is kept.
    let prepared = serializer::prepare_group(&wire).unwrap();
    assert_eq!(serde_json::to_value(prepared).unwrap(), wire);
}

#[test]
fn test_send_normalizes_human_durations() {
    let raw = json!({"timeout": "2 days", "cache_ttl": "1h 30m", "backend": [{"timeout": "3sec"}]});
    let def = deserialize_definition_from_json(&raw, Direction::Outgoing)
        .unwrap()
        .into_wire()
        .unwrap();
    assert_eq!(def.timeout.as_str(), "48h");
    assert_eq!(def.cache_ttl.as_str(), "90m");
    assert_eq!(def.backend[0].timeout.as_str(), "3s");
}
