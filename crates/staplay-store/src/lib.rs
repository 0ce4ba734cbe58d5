//! STA Play Store - versioned SQLite persistence for session tracking
//!
//! Provides:
//! - Store lifecycle: configuration, open (with migration), destroy, connection scopes
//! - Versioned schema migrations with checksums
//! - Repository layer: singleton general info, collection scans, name lookup,
//!   and the atomic replace-all of traits, players and trackers

pub mod config;
pub mod db;
pub mod errors;
pub mod migrations;
pub mod repo;
pub mod scope;

// Re-export key types
pub use config::StoreConfig;
pub use db::Store;
pub use errors::Result;
pub use repo::{Collection, CollectionRecord, ReplaceOutcome, SqliteRepo};
pub use scope::ConnectionScope;
