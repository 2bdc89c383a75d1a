//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (log level is a known level or filter directive)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ToolConfig → Result<(), Vec<ValidationError>>

use std::fmt;

use tracing_subscriber::EnvFilter;

use crate::config::schema::ToolConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Check a parsed configuration.
pub fn validate_config(config: &ToolConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let level = config.observability.log_level.trim();
    if level.is_empty() {
        errors.push(ValidationError {
            field: "observability.log_level",
            message: "must not be empty".to_string(),
        });
    } else if let Err(e) = EnvFilter::try_new(level) {
        errors.push(ValidationError {
            field: "observability.log_level",
            message: format!("invalid filter {:?}: {}", level, e),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(validate_config(&ToolConfig::default()).is_ok());
    }

    #[test]
    fn test_accepts_directives() {
        let mut config = ToolConfig::default();
        config.observability.log_level = "apigw_model=trace,warn".to_string();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_rejects_empty_level() {
        let mut config = ToolConfig::default();
        config.observability.log_level = "  ".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "observability.log_level");
    }
}
