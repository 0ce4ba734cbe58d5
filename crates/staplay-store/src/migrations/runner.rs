//! Migration runner
//!
//! Applies only the migrations between the stored schema version and the
//! target version, verifying the checksums of steps already applied.

use crate::errors::{checksum_mismatch, from_rusqlite, migration_error, schema_too_new, Result};
use crate::migrations::embedded::{get_migrations, Migration, SCHEMA_VERSION};
use rusqlite::{Connection, TransactionBehavior};

/// Bring the store up to [`SCHEMA_VERSION`]
///
/// Returns the schema version the store is at afterwards. Running this on a
/// store that is already current changes nothing.
pub fn apply_migrations(conn: &mut Connection) -> Result<u32> {
    migrate_to(conn, SCHEMA_VERSION)
}

/// Bring the store up to `target`
///
/// Fails without touching the store if the stored version is newer than
/// `target`, or if an applied step no longer matches its embedded SQL.
pub fn migrate_to(conn: &mut Connection, target: u32) -> Result<u32> {
    create_schema_version_table(conn)?;

    let current = current_version(conn)?;
    if current > target {
        return Err(schema_too_new(current, target));
    }

    verify_applied_checksums(conn)?;

    for migration in plan(current, target) {
        apply_migration(conn, &migration)?;
    }

    current_version(conn)
}

/// The migrations needed to go from version `from` to version `to`
pub fn plan(from: u32, to: u32) -> Vec<Migration> {
    get_migrations()
        .into_iter()
        .filter(|m| m.version > from && m.version <= to)
        .collect()
}

/// Read the schema version recorded in the store (0 for a fresh store)
pub fn current_version(conn: &Connection) -> Result<u32> {
    let version: i64 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |row| row.get(0),
        )
        .map_err(from_rusqlite)?;

    u32::try_from(version)
        .map_err(|_| migration_error("schema_version", &format!("invalid version {}", version)))
}

/// Create the schema_version table if it doesn't exist
fn create_schema_version_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            migration_id TEXT NOT NULL UNIQUE,
            applied_at INTEGER NOT NULL,
            checksum TEXT NOT NULL
        )",
        [],
    )
    .map_err(from_rusqlite)?;

    Ok(())
}

/// Check every recorded step against the embedded migration of the same version
fn verify_applied_checksums(conn: &Connection) -> Result<()> {
    let mut stmt = conn
        .prepare("SELECT version, migration_id, checksum FROM schema_version ORDER BY version")
        .map_err(from_rusqlite)?;
    let applied: Vec<(u32, String, String)> = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;

    let embedded = get_migrations();
    for (version, migration_id, recorded) in applied {
        let migration = embedded
            .iter()
            .find(|m| m.version == version)
            .ok_or_else(|| migration_error(&migration_id, "no embedded migration for this version"))?;

        let expected = migration.checksum();
        if recorded != expected {
            return Err(checksum_mismatch(&migration_id, &expected, &recorded));
        }
    }

    Ok(())
}

/// Apply a single migration in its own transaction
fn apply_migration(conn: &mut Connection, migration: &Migration) -> Result<()> {
    let tx = conn
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(from_rusqlite)?;

    // Another connection may have migrated the store while this one waited
    // for the write lock.
    if current_version(&tx)? >= migration.version {
        return Ok(());
    }

    tx.execute_batch(migration.sql)
        .map_err(|e| migration_error(migration.id, &e.to_string()))?;

    let now = chrono::Utc::now().timestamp();
    tx.execute(
        "INSERT INTO schema_version (version, migration_id, applied_at, checksum) VALUES (?1, ?2, ?3, ?4)",
        rusqlite::params![migration.version, migration.id, now, migration.checksum()],
    )
    .map_err(from_rusqlite)?;

    tx.commit().map_err(from_rusqlite)?;

    if migration.destructive {
        tracing::warn!(
            migration_id = migration.id,
            schema_version = migration.version,
            path = conn.path().unwrap_or_default(),
            "cleared store for upgrade"
        );
    } else {
        tracing::info!(
            migration_id = migration.id,
            schema_version = migration.version,
            "applied migration"
        );
    }

    Ok(())
}
