//! Migration framework
//!
//! Provides:
//! - Version-gated migration runner with checksums
//! - Idempotent application (only steps above the stored version run)
//! - Embedded SQL migrations

mod embedded;
mod runner;

pub use embedded::{get_migrations, Migration, SCHEMA_VERSION};
pub use runner::{apply_migrations, current_version, migrate_to, plan};
