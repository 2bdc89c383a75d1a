//! Backend host entries.

use serde::Serialize;

/// One backend endpoint and its load-balancing weight.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct HostConfig {
    /// Host address, e.g. `"http://localhost:8000"`.
    pub host: String,

    /// Weight for weighted round robin.
    pub weight: u32,
}

impl HostConfig {
    pub fn new(host: impl Into<String>, weight: u32) -> Self {
        Self {
            host: host.into(),
            weight,
        }
    }

    /// True for the placeholder row an editor starts with.
    pub fn is_blank(&self) -> bool {
        self.host.trim().is_empty()
    }
}

/// Host list defaults to a single blank row.
pub(crate) fn default_hosts() -> Vec<HostConfig> {
    vec![HostConfig::default()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_host() {
        let host = HostConfig::default();
        assert_eq!(host.host, "");
        assert_eq!(host.weight, 0);
        assert!(host.is_blank());
        assert!(!HostConfig::new("http://a:80", 1).is_blank());
    }
}
