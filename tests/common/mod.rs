//! Shared fixtures for integration tests.

use serde_json::{json, Value};

/// A stored group as the gateway writes it, every field spelled out and
/// durations in canonical form.
pub fn wire_group() -> Value {
    json!({
        "name": "users",
        "definitions": [
            {
                "name": "list-users",
                "active": true,
                "endpoint": "/users",
                "hosts": [{"host": "http://users.internal:8000", "weight": 2}],
                "method": "GET",
                "timeout": "30s",
                "cache_ttl": "1h",
                "output_encoding": "json",
                "except_querystrings": ["debug"],
                "except_headers": ["X-Internal"],
                "middleware": {"ratelimit": {"max_rate": 10}},
                "backend": [
                    {
                        "hosts": [{"host": "", "weight": 0}],
                        "timeout": "3s",
                        "method": "GET",
                        "url_pattern": "/api/users",
                        "encoding": "json",
                        "group": "items",
                        "blacklist": ["password"],
                        "whitelist": [],
                        "mapping": {"uid": "id"},
                        "is_collection": true,
                        "wrap_collection_to_json": false,
                        "target": "data",
                        "middleware": {},
                        "disable_host_sanitize": false,
                        "lb_mode": "wrr"
                    }
                ]
            }
        ]
    })
}

/// The same group with only the fields that differ from defaults.
#[allow(dead_code)]
pub fn sparse_wire_group() -> Value {
    json!({
        "name": "orders",
        "definitions": [
            {
                "name": "get-order",
                "endpoint": "/orders/:id",
                "hosts": [{"host": "http://orders.internal:9000"}],
                "timeout": "90s",
                "backend": [{"url_pattern": "/orders/:id", "timeout": "500ms"}]
            }
        ]
    })
}
