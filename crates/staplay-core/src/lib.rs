//! STA Play Core - record model, error facility and logging facility
//!
//! This crate provides the pieces shared by the store and the CLI:
//! - Record types for the four collections (general info, traits, players, trackers)
//! - Explicit numeric coercion for loosely typed input
//! - The structured error facility (`ExError`, `ExErrorKind`, `StaError`)
//! - The structured logging facility (`init`, `log_op_*` macros, event capture)

pub mod errors;
pub mod logging_facility;
pub mod model;

// The logging macros reach these through `$crate`
pub use staplay_core_types;
#[doc(hidden)]
pub use tracing as __tracing;

// Re-export commonly used types
pub use errors::{ExError, ExErrorKind, Result, StaError};
pub use model::{GeneralInfo, Named, NamedInfo, PlayerInfo, TrackerInfo, GENERAL_INFO_KEY};
