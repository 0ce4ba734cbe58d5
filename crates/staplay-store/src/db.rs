//! Store lifecycle
//!
//! Opens, configures and migrates SQLite connections, hands out connection
//! scopes to the repository, and deletes the store on reset.

use crate::config::StoreConfig;
use crate::errors::{from_rusqlite, io_error, Result};
use crate::migrations::apply_migrations;
use crate::scope::ConnectionScope;
use rusqlite::Connection;
use staplay_core::errors::{ExError, ExErrorKind};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Open a SQLite database at the given path
pub fn open<P: AsRef<Path>>(path: P) -> Result<Connection> {
    Connection::open(path).map_err(|e| from_rusqlite(e).with_op("open"))
}

/// Open an in-memory SQLite database (for testing)
pub fn open_in_memory() -> Result<Connection> {
    Connection::open_in_memory().map_err(|e| from_rusqlite(e).with_op("open"))
}

/// Configure a connection with the store's settings
///
/// SQLite takes the busy timeout as an `i32` of milliseconds; anything
/// longer is rejected as `InvalidInput`.
pub fn configure(conn: &Connection, busy_timeout: Duration) -> Result<()> {
    if i32::try_from(busy_timeout.as_millis()).is_err() {
        return Err(ExError::new(ExErrorKind::InvalidInput)
            .with_op("open")
            .with_entity("busy_timeout_ms")
            .with_message(format!(
                "Busy timeout of {} ms exceeds the supported maximum of {} ms",
                busy_timeout.as_millis(),
                i32::MAX
            )));
    }
    conn.busy_timeout(busy_timeout).map_err(from_rusqlite)?;

    conn.execute_batch("PRAGMA foreign_keys = ON")
        .map_err(from_rusqlite)?;

    // WAL lets readers keep going while a replace-all holds the write lock.
    // journal_mode returns a row, so it goes through query_row.
    let _mode: String = conn
        .query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))
        .map_err(from_rusqlite)?;

    Ok(())
}

/// A named, versioned store on disk
#[derive(Debug, Clone)]
pub struct Store {
    config: StoreConfig,
}

impl Store {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    /// Store at `path` with default settings
    pub fn at(path: impl AsRef<Path>) -> Self {
        Self::new(StoreConfig::new(path))
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// Open a connection, creating and migrating the store if needed
    ///
    /// The returned connection belongs to the caller; nothing here closes it.
    pub fn open(&self) -> Result<Connection> {
        if let Some(parent) = self.config.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| io_error("open", e))?;
            }
        }

        let mut conn = open(&self.config.path)?;
        configure(&conn, self.config.busy_timeout())?;
        let version = apply_migrations(&mut conn)?;

        tracing::debug!(
            path = %self.config.path.display(),
            schema_version = version,
            "opened store"
        );

        Ok(conn)
    }

    /// Delete the entire store, including WAL side files
    ///
    /// Deleting a store that does not exist is not an error. Connections that
    /// are still open keep their own view until they are closed.
    pub fn destroy(&self) -> Result<()> {
        for path in self.files() {
            match std::fs::remove_file(&path) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(io_error("destroy", e)),
            }
        }

        tracing::info!(path = %self.config.path.display(), "destroyed store");
        Ok(())
    }

    /// Whether the store file exists
    pub fn exists(&self) -> bool {
        self.config.path.exists()
    }

    /// Scope for one operation
    ///
    /// With `existing`, the scope borrows that connection and never closes
    /// it. Without, the scope opens its own connection and closes it when
    /// the scope is dropped or closed.
    pub fn scope<'c>(&self, existing: Option<&'c Connection>) -> Result<ConnectionScope<'c>> {
        match existing {
            Some(conn) => Ok(ConnectionScope::Borrowed(conn)),
            None => Ok(ConnectionScope::Owned(self.open()?)),
        }
    }

    fn files(&self) -> [PathBuf; 3] {
        let base = self.config.path.as_os_str();
        let with_suffix = |suffix: &str| {
            let mut name = base.to_os_string();
            name.push(suffix);
            PathBuf::from(name)
        };
        [self.config.path.clone(), with_suffix("-wal"), with_suffix("-shm")]
    }
}
