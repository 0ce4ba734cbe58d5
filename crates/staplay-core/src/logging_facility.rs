//! Structured logging for STA Play
//!
//! Every store operation is bracketed by a start event and either an end or
//! an end_error event, all carrying the same `component`/`op`/`event`
//! fields (see `staplay_core_types::schema`). Binaries pick an output format
//! once with [`init`]; tests install [`capture::install_capture`] instead and
//! assert on the recorded events.
//!
//! ```rust
//! use staplay_core::logging_facility::{init, Profile};
//!
//! let active = init(Profile::Development);
//! assert_eq!(init(Profile::Production), active);
//! ```

pub mod capture;
pub mod init;
pub mod macros;

pub use capture::{install_capture, CapturedEvent, EventCapture};
pub use init::{init, Profile};
