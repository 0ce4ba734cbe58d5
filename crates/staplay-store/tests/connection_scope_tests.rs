// Integration tests for caller-supplied connections and transactions

use std::time::Duration;

use staplay_core::{ExErrorKind, GeneralInfo, NamedInfo};
use staplay_store::{SqliteRepo, Store, StoreConfig};
use tempfile::TempDir;

fn setup_repo() -> (TempDir, SqliteRepo) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let repo = SqliteRepo::new(Store::at(dir.path().join("store.db")));
    (dir, repo)
}

#[test]
fn test_borrowed_connection_stays_open() {
    let (_dir, repo) = setup_repo();
    let conn = repo.store().open().unwrap();

    repo.replace_traits(&["Nebula"], Some(&conn)).unwrap();
    assert_eq!(repo.list_traits(Some(&conn)).unwrap(), vec!["Nebula"]);

    // Still usable after two operations ran on it
    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM traits", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
    conn.close().unwrap();
}

#[test]
fn test_failed_operation_releases_write_lock() {
    let (_dir, repo) = setup_repo();
    repo.replace_traits(&["a", "a"], None).unwrap_err();

    // Another connection can take the write lock without waiting
    let store = Store::new(
        StoreConfig::new(repo.store().path()).with_busy_timeout(Duration::ZERO),
    );
    let conn = store.open().unwrap();
    conn.execute_batch("BEGIN IMMEDIATE; ROLLBACK;").unwrap();
}

#[test]
fn test_operations_compose_in_caller_transaction() {
    let (_dir, repo) = setup_repo();
    let mut conn = repo.store().open().unwrap();

    let tx = conn.transaction().unwrap();
    repo.replace_traits(&["Nebula"], Some(&*tx)).unwrap();
    repo.save_general_info(&GeneralInfo::new("", "Enterprise", 1, "Green"), Some(&*tx))
        .unwrap();
    tx.rollback().unwrap();

    assert!(repo.list_traits(Some(&conn)).unwrap().is_empty());
    assert_eq!(repo.get_general_info(Some(&conn)).unwrap(), None);
}

#[test]
fn test_committed_caller_transaction_keeps_both_writes() {
    let (_dir, repo) = setup_repo();
    let mut conn = repo.store().open().unwrap();

    let tx = conn.transaction().unwrap();
    repo.replace_traits(&["Nebula"], Some(&*tx)).unwrap();
    repo.save_general_info(&GeneralInfo::new("", "Enterprise", 1, "Green"), Some(&*tx))
        .unwrap();
    tx.commit().unwrap();

    assert_eq!(repo.list_traits(None).unwrap(), vec!["Nebula"]);
    assert!(repo.get_general_info(None).unwrap().is_some());
}

#[test]
fn test_failed_replace_inside_transaction_keeps_earlier_writes() {
    let (_dir, repo) = setup_repo();
    let mut conn = repo.store().open().unwrap();

    let tx = conn.transaction().unwrap();
    repo.replace_traits(&["Nebula"], Some(&*tx)).unwrap();

    let err = repo.replace_traits(&["a", "a"], Some(&*tx)).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::ConstraintViolation);

    // The failed replace undid only its own statements
    let traits: Vec<NamedInfo> = repo.list_all(Some(&*tx)).unwrap();
    assert_eq!(traits.len(), 1);
    assert_eq!(traits[0].name, "Nebula");
    tx.commit().unwrap();

    assert_eq!(repo.list_traits(None).unwrap(), vec!["Nebula"]);
}

#[test]
fn test_destroy_then_reopen_gives_empty_store() {
    let (_dir, repo) = setup_repo();
    repo.replace_traits(&["Nebula"], None).unwrap();

    repo.store().destroy().unwrap();
    assert!(!repo.store().exists());

    assert!(repo.list_traits(None).unwrap().is_empty());
    assert!(repo.store().exists());
}

#[test]
fn test_scope_detach_hands_over_connection() {
    let (_dir, repo) = setup_repo();
    let scope = repo.store().scope(None).unwrap();
    assert!(scope.is_owned());

    let conn = scope.detach().expect("owned scope detaches");
    repo.replace_traits(&["Nebula"], Some(&conn)).unwrap();
    assert_eq!(repo.list_traits(Some(&conn)).unwrap(), vec!["Nebula"]);
}

#[test]
fn test_oversized_busy_timeout_fails_operation() {
    let dir = TempDir::new().unwrap();
    let config = StoreConfig::new(dir.path().join("store.db"))
        .with_busy_timeout(Duration::from_secs(30 * 24 * 3600));
    let repo = SqliteRepo::new(Store::new(config));

    let err = repo.list_traits(None).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::InvalidInput);
    assert_eq!(err.entity(), Some("busy_timeout_ms"));
}
