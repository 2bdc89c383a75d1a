//! Catalog editing against stored JSON.

use serde_json::json;

use apigw_model::catalog::{Catalog, CatalogError};
use apigw_model::model::{ApiDefinition, Editor, HostConfig, Seconds};

mod common;

fn stored_catalog() -> serde_json::Value {
    json!([common::wire_group(), common::sparse_wire_group()])
}

#[test]
fn test_load_edit_save() {
    let mut catalog = Catalog::load(&stored_catalog()).unwrap();
    assert_eq!(catalog.group_names(), vec!["users", "orders"]);
    assert!(catalog.validate().is_ok());

    let new_def = ApiDefinition::<Editor> {
        name: "create-order".into(),
        endpoint: "/orders".into(),
        method: "POST".into(),
        hosts: vec![HostConfig::new("http://orders.internal:9000", 1)],
        timeout: Seconds::from_secs(120),
        ..Default::default()
    };
    catalog.add_definition("orders", new_def).unwrap();

    let wire = catalog.into_wire().unwrap();
    let orders = wire.group("orders").unwrap();
    let created = orders
        .definitions
        .iter()
        .find(|d| d.name == "create-order")
        .unwrap();
    assert_eq!(created.timeout.as_str(), "2m");
    assert_eq!(created.cache_ttl.as_str(), "1h");
}

#[test]
fn test_endpoint_conflict_with_loaded_data() {
    let mut catalog = Catalog::load(&stored_catalog()).unwrap();
    let clash = ApiDefinition::<Editor> {
        name: "shadow".into(),
        endpoint: "/users".into(),
        hosts: vec![HostConfig::new("http://other:80", 1)],
        ..Default::default()
    };
    let err = catalog.add_definition("orders", clash).unwrap_err();
    assert!(matches!(err, CatalogError::EndpointExists { ref group, .. } if group == "users"));
}

#[test]
fn test_load_rejects_non_array() {
    let err = Catalog::load(&common::wire_group()).unwrap_err();
    assert!(matches!(err, CatalogError::NotAnArray("object")));
}

#[test]
fn test_load_reports_group_index() {
    let err = Catalog::load(&json!([{"name": "ok"}, {"definitions": [{"cache_ttl": "often"}]}]))
        .unwrap_err();
    match err {
        CatalogError::Model(model) => {
            assert!(model.is_duration());
            assert_eq!(model.path().as_str(), "[1].definitions[0].cache_ttl");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_validate_flags_bad_stored_definition() {
    let mut raw = common::wire_group();
    raw["definitions"][0]["backend"][0]["lb_mode"] = json!("random");
    let catalog = Catalog::load(&json!([raw])).unwrap();

    let issues = catalog.validate().unwrap_err();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].path.as_str(), "[0].definitions[0].backend[0].lb_mode");
}

#[test]
fn test_validate_flags_duplicates_in_stored_data() {
    let mut admin = common::wire_group();
    admin["name"] = json!("admin");
    admin["definitions"][0]["name"] = json!("list-admins");

    let mut shadow = common::wire_group();
    shadow["name"] = json!("Users");
    shadow["definitions"][0]["endpoint"] = json!("/users/shadow");

    let catalog = Catalog::load(&json!([common::wire_group(), admin, shadow])).unwrap();
    let issues = catalog.validate().unwrap_err();
    let paths: Vec<&str> = issues.iter().map(|i| i.path.as_str()).collect();
    assert_eq!(paths, vec!["[1].definitions[0].endpoint", "[2].name"]);
    assert!(issues[0].message.contains("/users"));
}
