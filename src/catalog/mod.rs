//! Editable collection of API groups.
//!
//! # Data Flow
//! ```text
//! stored JSON array of groups
//!     → Catalog::load (hydrate + receive pass per group)
//!     → add / update / remove definitions (validated, duplicates rejected)
//!     → Catalog::into_wire (send pass per group)
//!     → stored JSON
//! ```
//!
//! # Design Decisions
//! - Names unique per group, endpoints unique across all groups
//! - Duplicate inserts are errors, not silently ignored
//! - Validation runs before any mutation

pub mod store;
pub mod validation;

pub use store::{Catalog, CatalogError, CatalogResult};
pub use validation::{validate_definition, ValidationIssue};
