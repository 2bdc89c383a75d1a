//! Gateway configuration entities.
//!
//! # Containment
//! ```text
//! ApiGroup
//!     → ApiDefinition (endpoint, default hosts, durations)
//!         → BackendConfig (per-backend call, own hosts and timeout)
//!             → HostConfig
//! ```
//!
//! # Design Decisions
//! - Pure values: no back-references, no shared sub-objects
//! - Every field has a default so partial input still yields a full value
//! - Duration fields are typed by [`Form`], see [`form`]

pub mod backend;
pub mod definition;
pub mod form;
pub mod group;
pub mod health;
pub mod host;
pub mod path;

pub use backend::BackendConfig;
pub use definition::ApiDefinition;
pub use form::{DurationText, Editor, Form, Raw, RawDuration, Seconds, Wire};
pub use group::ApiGroup;
pub use health::HealthCheckConfig;
pub use host::HostConfig;
pub use path::FieldPath;
