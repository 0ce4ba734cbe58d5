//! SQLite repository implementation
//!
//! Every operation takes an optional connection. With `None` the operation
//! opens its own connection and closes it before returning, on error paths
//! too. With `Some(conn)` it runs on the caller's connection (or the
//! caller's transaction, via `Some(&*tx)`) and leaves it open.

use std::time::Instant;

use crate::db::Store;
use crate::errors::{from_rusqlite, Result};
use crate::repo::collection::{insert_sql, select_sql, Collection, CollectionRecord, ALL, GENERAL};
use crate::repo::hydration::{general_from_row, GENERAL_COLUMNS};
use crate::repo::write_scope::WriteScope;
use rusqlite::{Connection, OptionalExtension};
use staplay_core::errors::ExError;
use staplay_core::{
    log_op_end, log_op_error, log_op_start, GeneralInfo, Named, NamedInfo, PlayerInfo,
    TrackerInfo, GENERAL_INFO_KEY,
};

/// What a replace-all did to its collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceOutcome {
    /// Rows removed from the previous contents
    pub deleted: usize,
    /// Store-assigned keys of the new rows, in input order
    pub inserted_ids: Vec<i64>,
}

impl ReplaceOutcome {
    pub fn inserted(&self) -> usize {
        self.inserted_ids.len()
    }
}

/// SQLite repository for the session records
#[derive(Debug, Clone)]
pub struct SqliteRepo {
    store: Store,
}

impl SqliteRepo {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Read the general info record, or `None` if none was ever saved
    pub fn get_general_info(&self, conn: Option<&Connection>) -> Result<Option<GeneralInfo>> {
        self.run("get_general_info", GENERAL, conn, read_general)
    }

    /// Write the general info record, replacing any previous one
    ///
    /// The record is always written under [`GENERAL_INFO_KEY`], whatever its
    /// `id` field holds.
    pub fn save_general_info(&self, info: &GeneralInfo, conn: Option<&Connection>) -> Result<()> {
        self.run("save_general_info", GENERAL, conn, |c| write_general(c, info))
    }

    /// Read every record of a collection, ordered by key
    pub fn list_all<R>(&self, conn: Option<&Connection>) -> Result<Vec<R>>
    where
        R: CollectionRecord + Named,
    {
        self.run("list_all", R::COLLECTION, conn, select_all::<R>)
    }

    /// Read the names of all scene traits
    pub fn list_traits(&self, conn: Option<&Connection>) -> Result<Vec<String>> {
        let traits: Vec<NamedInfo> = self.list_all(conn)?;
        Ok(traits.into_iter().map(|t| t.name).collect())
    }

    pub fn list_players(&self, conn: Option<&Connection>) -> Result<Vec<PlayerInfo>> {
        self.list_all(conn)
    }

    pub fn list_trackers(&self, conn: Option<&Connection>) -> Result<Vec<TrackerInfo>> {
        self.list_all(conn)
    }

    /// Look records up by name through the collection's name index
    ///
    /// Returns at most one record for traits and trackers; players may share
    /// a name.
    pub fn find_by_name<R>(&self, name: &str, conn: Option<&Connection>) -> Result<Vec<R>>
    where
        R: CollectionRecord + Named,
    {
        self.run("find_by_name", R::COLLECTION, conn, |c| select_by_name::<R>(c, name))
    }

    /// Number of records in a collection
    pub fn count<R>(&self, conn: Option<&Connection>) -> Result<u64>
    where
        R: CollectionRecord + Named,
    {
        self.run("count", R::COLLECTION, conn, |c| count_rows(c, R::COLLECTION))
    }

    /// Atomically swap the whole contents of a collection for `records`
    ///
    /// Deletes every existing row, then inserts `records` with fresh keys
    /// (any `id` on the input is ignored). Either all of it happens or none
    /// of it does: a duplicate name in a uniquely named collection fails the
    /// call with `ERR_CONSTRAINT_VIOLATION` and leaves the previous rows in
    /// place.
    pub fn replace_all<R>(&self, records: &[R], conn: Option<&Connection>) -> Result<ReplaceOutcome>
    where
        R: CollectionRecord + Named,
    {
        self.run("replace_all", R::COLLECTION, conn, |c| replace_rows(c, records))
    }

    /// Replace all scene traits with the given names
    pub fn replace_traits<S: AsRef<str>>(
        &self,
        names: &[S],
        conn: Option<&Connection>,
    ) -> Result<ReplaceOutcome> {
        let traits: Vec<NamedInfo> = names.iter().map(|n| NamedInfo::new(n.as_ref())).collect();
        self.replace_all(&traits, conn)
    }

    pub fn replace_players(
        &self,
        players: &[PlayerInfo],
        conn: Option<&Connection>,
    ) -> Result<ReplaceOutcome> {
        self.replace_all(players, conn)
    }

    pub fn replace_trackers(
        &self,
        trackers: &[TrackerInfo],
        conn: Option<&Connection>,
    ) -> Result<ReplaceOutcome> {
        self.replace_all(trackers, conn)
    }

    /// Empty every collection in one transaction, keeping the store itself
    pub fn clear_all(&self, conn: Option<&Connection>) -> Result<()> {
        self.run("clear_all", GENERAL, conn, |c| {
            let scope = WriteScope::begin(c, "clear_all")?;
            for collection in ALL {
                delete_all(c, collection)?;
            }
            scope.commit()
        })
    }

    fn run<T>(
        &self,
        op: &'static str,
        collection: Collection,
        conn: Option<&Connection>,
        f: impl FnOnce(&Connection) -> Result<T>,
    ) -> Result<T> {
        let started = Instant::now();
        log_op_start!(op, collection = collection.name);

        let result = self.store.scope(conn).and_then(|scope| {
            let value = f(&*scope)?;
            Ok(settle_close(op, value, scope.close()))
        });

        let duration_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(_) => {
                log_op_end!(op, duration_ms = duration_ms, collection = collection.name);
            }
            Err(err) => {
                log_op_error!(
                    op,
                    err.clone(),
                    duration_ms = duration_ms,
                    collection = collection.name
                );
            }
        }
        result
    }
}

/// Keep a completed operation's value even if closing its connection fails
///
/// By the time the connection is closed any write has already committed, so
/// a close error is logged rather than reported as a failed operation.
fn settle_close<T>(op: &'static str, value: T, closed: Result<()>) -> T {
    if let Err(err) = closed {
        tracing::warn!(op, error = %err, "failed to close connection after operation");
    }
    value
}

fn read_general(conn: &Connection) -> Result<Option<GeneralInfo>> {
    if count_rows(conn, GENERAL)? == 0 {
        return Ok(None);
    }

    conn.query_row(
        &format!("SELECT {} FROM general WHERE id = ?1", GENERAL_COLUMNS),
        [GENERAL_INFO_KEY],
        general_from_row,
    )
    .optional()
    .map_err(from_rusqlite)
}

fn write_general(conn: &Connection, info: &GeneralInfo) -> Result<()> {
    conn.execute(
        "INSERT INTO general (id, text, ship_name, ship_model, momentum, active_alert)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)
         ON CONFLICT(id) DO UPDATE SET
            text = excluded.text,
            ship_name = excluded.ship_name,
            ship_model = excluded.ship_model,
            momentum = excluded.momentum,
            active_alert = excluded.active_alert",
        rusqlite::params![
            GENERAL_INFO_KEY,
            info.text,
            info.ship_name,
            info.ship_model,
            info.momentum,
            info.active_alert,
        ],
    )
    .map_err(from_rusqlite)?;

    Ok(())
}

fn select_all<R: CollectionRecord>(conn: &Connection) -> Result<Vec<R>> {
    let mut stmt = conn.prepare(&select_sql::<R>("")).map_err(from_rusqlite)?;
    let records = stmt
        .query_map([], R::from_row)
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;

    Ok(records)
}

fn select_by_name<R: CollectionRecord>(conn: &Connection, name: &str) -> Result<Vec<R>> {
    let mut stmt = conn
        .prepare(&select_sql::<R>("WHERE name = ?1"))
        .map_err(from_rusqlite)?;
    let records = stmt
        .query_map([name], R::from_row)
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;

    Ok(records)
}

fn count_rows(conn: &Connection, collection: Collection) -> Result<u64> {
    let rows: i64 = conn
        .query_row(
            &format!("SELECT COUNT(*) FROM {}", collection.name),
            [],
            |row| row.get(0),
        )
        .map_err(from_rusqlite)?;

    Ok(rows.max(0) as u64)
}

/// Delete every row of a collection, returning how many went
///
/// Named collections are walked in name-index order; the walk covers the
/// whole collection, so the order only decides the sequence of deletes.
fn delete_all(conn: &Connection, collection: Collection) -> Result<usize> {
    let order = if collection.name_index.is_some() {
        " ORDER BY name"
    } else {
        ""
    };

    let mut scan = conn
        .prepare(&format!("SELECT id FROM {}{}", collection.name, order))
        .map_err(from_rusqlite)?;
    let ids: Vec<i64> = scan
        .query_map([], |row| row.get(0))
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;
    drop(scan);

    let mut delete = conn
        .prepare(&format!("DELETE FROM {} WHERE id = ?1", collection.name))
        .map_err(from_rusqlite)?;
    for id in &ids {
        delete.execute([id]).map_err(from_rusqlite)?;
    }

    Ok(ids.len())
}

fn replace_rows<R>(conn: &Connection, records: &[R]) -> Result<ReplaceOutcome>
where
    R: CollectionRecord + Named,
{
    let collection = R::COLLECTION;
    let scope = WriteScope::begin(conn, "replace_all")?;

    let deleted = delete_all(conn, collection).map_err(|e| in_replace(collection, e))?;

    let mut insert = conn.prepare(&insert_sql::<R>()).map_err(from_rusqlite)?;
    let mut inserted_ids = Vec::with_capacity(records.len());
    for record in records {
        insert.execute(&record.bind_values()[..]).map_err(|e| {
            let err = from_rusqlite(e);
            let message = format!("{} (name: {})", err.message(), record.name());
            in_replace(collection, err.with_message(message))
        })?;
        inserted_ids.push(conn.last_insert_rowid());
    }
    drop(insert);

    scope.commit()?;

    tracing::debug!(
        collection = collection.name,
        deleted,
        inserted = inserted_ids.len(),
        "replaced collection"
    );

    Ok(ReplaceOutcome {
        deleted,
        inserted_ids,
    })
}

fn in_replace(collection: Collection, err: ExError) -> ExError {
    err.with_op("replace_all").with_entity(collection.name)
}
