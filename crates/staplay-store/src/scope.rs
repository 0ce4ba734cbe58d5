//! Connection scopes
//!
//! Every repository operation runs inside a `ConnectionScope`. An owned scope
//! closes its connection when it goes away, on success and failure paths
//! alike. A borrowed scope leaves the caller's connection open, which lets
//! several operations share one connection or one caller-managed transaction.

use crate::errors::{from_rusqlite, Result};
use rusqlite::Connection;
use std::ops::Deref;

/// A connection for the duration of one operation
#[derive(Debug)]
pub enum ConnectionScope<'c> {
    /// Opened for this operation; closed when the scope is dropped
    Owned(Connection),
    /// Supplied by the caller; never closed here
    Borrowed(&'c Connection),
}

impl<'c> ConnectionScope<'c> {
    /// Whether this scope will close its connection
    pub fn is_owned(&self) -> bool {
        matches!(self, ConnectionScope::Owned(_))
    }

    /// End the scope, closing an owned connection and reporting close errors
    ///
    /// Dropping the scope closes the connection as well but discards any
    /// error from SQLite.
    pub fn close(self) -> Result<()> {
        match self {
            ConnectionScope::Owned(conn) => conn
                .close()
                .map_err(|(_, e)| from_rusqlite(e).with_op("close")),
            ConnectionScope::Borrowed(_) => Ok(()),
        }
    }

    /// Hand an owned connection over to the caller
    ///
    /// Returns `None` for a borrowed scope, whose connection already belongs
    /// to the caller.
    pub fn detach(self) -> Option<Connection> {
        match self {
            ConnectionScope::Owned(conn) => Some(conn),
            ConnectionScope::Borrowed(_) => None,
        }
    }
}

impl Deref for ConnectionScope<'_> {
    type Target = Connection;

    fn deref(&self) -> &Connection {
        match self {
            ConnectionScope::Owned(conn) => conn,
            ConnectionScope::Borrowed(conn) => *conn,
        }
    }
}
