//! Error types for hydration and duration adjustment.

use thiserror::Error;

use crate::convert::duration::DurationError;
use crate::model::FieldPath;

/// Errors raised while turning untyped JSON into the typed entity graph.
#[derive(Debug, Error)]
pub enum ModelError {
    /// A field held a JSON value of the wrong type.
    #[error("invalid shape at `{path}`: expected {expected}, found {found}")]
    InvalidShape {
        path: FieldPath,
        expected: &'static str,
        found: &'static str,
    },

    /// A duration field could not be converted.
    #[error("invalid duration at `{path}`: {source}")]
    InvalidDurationFormat {
        path: FieldPath,
        #[source]
        source: DurationError,
    },
}

impl ModelError {
    /// Path of the offending field.
    pub fn path(&self) -> &FieldPath {
        match self {
            ModelError::InvalidShape { path, .. } => path,
            ModelError::InvalidDurationFormat { path, .. } => path,
        }
    }

    /// Re-root the error path under `base`.
    pub fn within(self, base: &FieldPath) -> Self {
        match self {
            ModelError::InvalidShape { path, expected, found } => ModelError::InvalidShape {
                path: base.join(&path),
                expected,
                found,
            },
            ModelError::InvalidDurationFormat { path, source } => {
                ModelError::InvalidDurationFormat {
                    path: base.join(&path),
                    source,
                }
            }
        }
    }

    pub fn is_shape(&self) -> bool {
        matches!(self, ModelError::InvalidShape { .. })
    }

    pub fn is_duration(&self) -> bool {
        matches!(self, ModelError::InvalidDurationFormat { .. })
    }
}

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;
