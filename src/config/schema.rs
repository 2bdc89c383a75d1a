//! Configuration schema definitions.
//!
//! Settings for the `apigw-model` command-line tool. All types derive Serde
//! traits for deserialization from TOML.

use serde::{Deserialize, Serialize};

/// Root configuration for the tool.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct ToolConfig {
    /// Logging settings.
    pub observability: ObservabilityConfig,

    /// JSON output settings.
    pub output: OutputConfig,

    /// Definition validation settings.
    pub validation: ValidationConfig,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable, for terminals.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print emitted JSON.
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

/// Validation configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ValidationConfig {
    /// Validate definitions before emitting wire JSON.
    pub on_send: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self { on_send: true }
    }
}
