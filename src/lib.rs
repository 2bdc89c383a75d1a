//! API gateway configuration model and wire/editor serializer.

pub mod catalog;
pub mod config;
pub mod convert;
pub mod error;
pub mod model;
pub mod observability;
pub mod serializer;

pub use catalog::Catalog;
pub use error::{ModelError, ModelResult};
pub use model::{ApiDefinition, ApiGroup, BackendConfig, Editor, HostConfig, Raw, Wire};
pub use serializer::{deserialize_definition_from_json, deserialize_group_from_json, Direction};
