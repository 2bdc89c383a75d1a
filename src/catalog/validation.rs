//! Definition validation.
//!
//! # Responsibilities
//! - Required fields (name, endpoint, at least one backend)
//! - Allowed values (methods, encodings, load-balancing modes)
//! - Host addresses parse as http(s) URLs
//! - Every backend resolves at least one host
//!
//! # Design Decisions
//! - Returns all issues, not just the first
//! - Pure function of the definition; form-independent
//! - `blacklist` and `whitelist` together are allowed and applied independently

use std::fmt;

use url::Url;

use crate::model::{ApiDefinition, BackendConfig, FieldPath, Form, HostConfig};

pub const METHODS: [&str; 7] = ["GET", "POST", "PUT", "PATCH", "DELETE", "HEAD", "OPTIONS"];
pub const ENCODINGS: [&str; 2] = ["json", "xml"];
pub const LB_MODES: [&str; 3] = ["", "rr", "wrr"];

/// One problem found in a definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub path: FieldPath,
    pub message: String,
}

impl ValidationIssue {
    fn new(path: FieldPath, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Check a definition, collecting every issue.
pub fn validate_definition<F: Form>(def: &ApiDefinition<F>) -> Result<(), Vec<ValidationIssue>> {
    let root = FieldPath::root();
    let mut issues = Vec::new();

    if def.name.trim().is_empty() {
        issues.push(ValidationIssue::new(root.field("name"), "name is required"));
    }
    if def.endpoint.is_empty() {
        issues.push(ValidationIssue::new(root.field("endpoint"), "endpoint is required"));
    } else if !def.endpoint.starts_with('/') {
        issues.push(ValidationIssue::new(
            root.field("endpoint"),
            format!("endpoint {:?} must start with '/'", def.endpoint),
        ));
    }

    check_method(&def.method, root.field("method"), &mut issues);
    check_encoding(&def.output_encoding, root.field("output_encoding"), &mut issues);
    check_hosts(&def.hosts, false, &root.field("hosts"), &mut issues);

    if def.backend.is_empty() {
        issues.push(ValidationIssue::new(root.field("backend"), "at least one backend is required"));
    }
    let backend_path = root.field("backend");
    for (i, backend) in def.backend.iter().enumerate() {
        check_backend(backend, &def.hosts, &backend_path.index(i), &mut issues);
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}

fn check_backend<F: Form>(
    backend: &BackendConfig<F>,
    inherited: &[HostConfig],
    path: &FieldPath,
    issues: &mut Vec<ValidationIssue>,
) {
    check_method(&backend.method, path.field("method"), issues);
    check_encoding(&backend.encoding, path.field("encoding"), issues);

    if !LB_MODES.contains(&backend.lb_mode.as_str()) {
        issues.push(ValidationIssue::new(
            path.field("lb_mode"),
            format!("unknown load-balancing mode {:?}, expected \"rr\" or \"wrr\"", backend.lb_mode),
        ));
    }

    if !backend.url_pattern.is_empty() && !backend.url_pattern.starts_with('/') {
        issues.push(ValidationIssue::new(
            path.field("url_pattern"),
            format!("url pattern {:?} must start with '/'", backend.url_pattern),
        ));
    }

    check_hosts(&backend.hosts, backend.disable_host_sanitize, &path.field("hosts"), issues);
    if backend.resolved_hosts(inherited).is_empty() {
        issues.push(ValidationIssue::new(
            path.field("hosts"),
            "no host configured on the backend or its definition",
        ));
    }

    if !backend.blacklist.is_empty() && !backend.whitelist.is_empty() {
        tracing::debug!(
            backend = %path,
            "blacklist and whitelist both set, applying independently"
        );
    }
}

fn check_method(method: &str, path: FieldPath, issues: &mut Vec<ValidationIssue>) {
    let upper = method.to_ascii_uppercase();
    if !METHODS.contains(&upper.as_str()) {
        issues.push(ValidationIssue::new(path, format!("unsupported method {:?}", method)));
    }
}

fn check_encoding(encoding: &str, path: FieldPath, issues: &mut Vec<ValidationIssue>) {
    if !ENCODINGS.contains(&encoding) {
        issues.push(ValidationIssue::new(
            path,
            format!("unsupported encoding {:?}, expected json or xml", encoding),
        ));
    }
}

fn check_hosts(
    hosts: &[HostConfig],
    skip_address_check: bool,
    path: &FieldPath,
    issues: &mut Vec<ValidationIssue>,
) {
    if skip_address_check {
        return;
    }
    for (i, host) in hosts.iter().enumerate() {
        if host.is_blank() {
            continue;
        }
        match Url::parse(&host.host) {
            Ok(url) if matches!(url.scheme(), "http" | "https") && url.host().is_some() => {}
            _ => issues.push(ValidationIssue::new(
                path.index(i).field("host"),
                format!("host {:?} is not an http(s) address", host.host),
            )),
        }
    }
}
