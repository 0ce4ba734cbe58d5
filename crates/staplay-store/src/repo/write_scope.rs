//! Read-write scope for multi-statement writes
//!
//! On a connection in autocommit mode the scope is its own `BEGIN IMMEDIATE`
//! transaction, so the write lock is taken (or waited for, up to the busy
//! timeout) before the first statement runs. Inside a caller's transaction
//! it is a savepoint, so a failure undoes only this scope's statements and
//! leaves the caller's transaction usable. Dropping an uncommitted scope
//! rolls it back.

use crate::errors::{from_rusqlite, Result};
use rusqlite::Connection;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Transaction,
    Savepoint,
}

pub(crate) struct WriteScope<'c> {
    conn: &'c Connection,
    name: &'static str,
    mode: Mode,
    finished: bool,
}

impl<'c> WriteScope<'c> {
    pub(crate) fn begin(conn: &'c Connection, name: &'static str) -> Result<Self> {
        let mode = if conn.is_autocommit() {
            conn.execute_batch("BEGIN IMMEDIATE")
                .map_err(|e| from_rusqlite(e).with_op(name))?;
            Mode::Transaction
        } else {
            conn.execute_batch(&format!("SAVEPOINT {}", name))
                .map_err(|e| from_rusqlite(e).with_op(name))?;
            Mode::Savepoint
        };

        Ok(Self {
            conn,
            name,
            mode,
            finished: false,
        })
    }

    /// Make the scope's writes permanent (or part of the caller's transaction)
    pub(crate) fn commit(mut self) -> Result<()> {
        let sql = match self.mode {
            Mode::Transaction => "COMMIT".to_string(),
            Mode::Savepoint => format!("RELEASE {}", self.name),
        };
        self.conn
            .execute_batch(&sql)
            .map_err(|e| from_rusqlite(e).with_op(self.name))?;
        self.finished = true;
        Ok(())
    }
}

impl Drop for WriteScope<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        let sql = match self.mode {
            Mode::Transaction => "ROLLBACK".to_string(),
            Mode::Savepoint => format!("ROLLBACK TO {0}; RELEASE {0}", self.name),
        };
        if let Err(e) = self.conn.execute_batch(&sql) {
            tracing::error!(scope = self.name, error = %e, "rollback failed");
        }
    }
}
