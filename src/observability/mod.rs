//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! serializer / convert / catalog produce:
//!     → tracing events (debug on entry points, trace per duration field,
//!       warn on rejected catalog changes)
//!
//! Consumers:
//!     → logging.rs subscriber (stderr, pretty or JSON)
//! ```
//!
//! # Design Decisions
//! - Library code only emits events; installing a subscriber is the
//!   binary's job

pub mod logging;

pub use logging::init_logging;
