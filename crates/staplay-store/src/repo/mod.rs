//! Repository layer for persisting session records to SQLite
//!
//! Maps the record types onto their collections and implements the read,
//! upsert and replace-all operations.

pub mod collection;
pub mod hydration;
pub mod sqlite_repo;
mod write_scope;

pub use collection::{Collection, CollectionRecord, GENERAL, PLAYERS, TRACKERS, TRAITS};
pub use sqlite_repo::{ReplaceOutcome, SqliteRepo};
