//! Duration conversion between wire and editor forms.
//!
//! # Data Flow
//! ```text
//! Wire   "3s" ──receive_adjust──▶ Editor 3
//! Editor 90   ──send_adjust─────▶ Wire   "90s"
//! ```
//!
//! # Design Decisions
//! - Passes consume their input and return a value of the other form
//! - Each duration field is converted exactly once per pass
//! - Errors name the field path that failed

pub mod adjust;
pub mod duration;

pub use adjust::{ReceiveForm, SendForm, DEFAULT_UNIT};
pub use duration::{format_duration, from_duration, to_duration, DurationError, Unit};
