// Integration tests for the atomic replace-all of collections

use std::collections::HashSet;
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

use staplay_core::{ExErrorKind, NamedInfo, PlayerInfo, TrackerInfo};
use staplay_store::{SqliteRepo, Store, StoreConfig};
use tempfile::TempDir;

fn setup_repo() -> (TempDir, SqliteRepo) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let repo = SqliteRepo::new(Store::at(dir.path().join("store.db")));
    (dir, repo)
}

fn name_set(names: &[String]) -> HashSet<String> {
    names.iter().cloned().collect()
}

#[test]
fn test_replace_traits_with_empty_list_clears_collection() {
    let (_dir, repo) = setup_repo();
    repo.replace_traits(&["Nebula", "Ion Storm"], None).unwrap();

    let outcome = repo.replace_traits::<&str>(&[], None).unwrap();

    assert_eq!(outcome.deleted, 2);
    assert_eq!(outcome.inserted(), 0);
    assert!(repo.list_traits(None).unwrap().is_empty());
}

#[test]
fn test_replace_traits_is_set_equal_to_input() {
    let (_dir, repo) = setup_repo();
    repo.replace_traits(&["Old One", "Old Two"], None).unwrap();

    let input = vec!["Nebula".to_string(), "Ion Storm".to_string(), "Dark".to_string()];
    repo.replace_traits(&input, None).unwrap();

    let listed = repo.list_traits(None).unwrap();
    assert_eq!(listed.len(), input.len());
    assert_eq!(name_set(&listed), name_set(&input));
}

#[test]
fn test_duplicate_trait_leaves_previous_contents() {
    let (_dir, repo) = setup_repo();
    repo.replace_traits(&["Nebula", "Ion Storm"], None).unwrap();

    let err = repo.replace_traits(&["a", "a"], None).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::ConstraintViolation);
    assert_eq!(err.code(), "ERR_CONSTRAINT_VIOLATION");
    assert_eq!(err.entity(), Some("traits"));
    assert!(err.message().contains("(name: a)"));

    let mut names = repo.list_traits(None).unwrap();
    names.sort();
    assert_eq!(names, vec!["Ion Storm", "Nebula"]);
}

#[test]
fn test_duplicate_tracker_leaves_previous_contents() {
    let (_dir, repo) = setup_repo();
    let before = vec![TrackerInfo::new("Shield Repair", "Daring", "Engineering", 10)];
    repo.replace_trackers(&before, None).unwrap();

    let err = repo
        .replace_trackers(
            &[
                TrackerInfo::new("Hull Breach", "Control", "Engineering", 8),
                TrackerInfo::new("Hull Breach", "Daring", "Command", 6),
            ],
            None,
        )
        .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::ConstraintViolation);

    let after = repo.list_trackers(None).unwrap();
    assert_eq!(after.len(), 1);
    assert_eq!(after[0].name, "Shield Repair");
}

#[test]
fn test_players_may_share_a_name() {
    let (_dir, repo) = setup_repo();

    let outcome = repo
        .replace_players(
            &[
                PlayerInfo::new("Data", 0, 4, "", "gold"),
                PlayerInfo::new("Data", 2, 4, "●", "gold"),
            ],
            None,
        )
        .unwrap();

    assert_eq!(outcome.inserted(), 2);
    assert_eq!(repo.list_players(None).unwrap().len(), 2);
}

#[test]
fn test_replace_players_assigns_fresh_keys() {
    let (_dir, repo) = setup_repo();
    let kirk = PlayerInfo::new("Kirk", 2, 6, "●●", "#f00");

    let outcome = repo.replace_players(&[kirk.clone()], None).unwrap();

    let players = repo.list_players(None).unwrap();
    assert_eq!(players.len(), 1);
    let stored = &players[0];
    let id = stored.id.expect("stored players carry a key");
    assert!(id >= 1);
    assert_eq!(outcome.inserted_ids, vec![id]);
    assert_eq!(stored.name, "Kirk");
    assert_eq!(stored.current_stress, 2);
    assert_eq!(stored.max_stress, 6);
    assert_eq!(stored.pips, "●●");
    assert_eq!(stored.border_color, "#f00");
}

#[test]
fn test_input_keys_are_ignored() {
    let (_dir, repo) = setup_repo();
    let mut spock = PlayerInfo::new("Spock", 0, 8, "", "blue");
    spock.id = Some(4242);

    repo.replace_players(&[spock], None).unwrap();

    let players = repo.list_players(None).unwrap();
    assert_ne!(players[0].id, Some(4242));
}

#[test]
fn test_player_image_round_trip() {
    let (_dir, repo) = setup_repo();
    let portrait = vec![0x89, 0x50, 0x4e, 0x47, 0x00, 0xff];
    let uhura = PlayerInfo::new("Uhura", 1, 5, "●", "red").with_image(portrait.clone());

    repo.replace_players(&[uhura], None).unwrap();

    let players = repo.list_players(None).unwrap();
    assert_eq!(players[0].image.as_deref(), Some(portrait.as_slice()));
}

#[test]
fn test_tracker_fields_round_trip() {
    let (_dir, repo) = setup_repo();
    let tracker = TrackerInfo::new("Hull Breach", "Control", "Engineering", 8)
        .with_resistance(2)
        .with_complication_range(3);

    repo.replace_trackers(&[tracker.clone()], None).unwrap();

    let mut stored = repo.list_trackers(None).unwrap().remove(0);
    assert!(stored.id.is_some());
    stored.id = None;
    assert_eq!(stored, tracker);
}

#[test]
fn test_find_by_name_uses_name_lookup() {
    let (_dir, repo) = setup_repo();
    repo.replace_traits(&["Nebula", "Ion Storm"], None).unwrap();

    let found: Vec<NamedInfo> = repo.find_by_name("Nebula", None).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Nebula");

    let missing: Vec<NamedInfo> = repo.find_by_name("Void", None).unwrap();
    assert!(missing.is_empty());
}

#[test]
fn test_clear_all_empties_every_collection() {
    let (_dir, repo) = setup_repo();
    repo.replace_traits(&["Nebula"], None).unwrap();
    repo.replace_players(&[PlayerInfo::new("Kirk", 0, 6, "", "red")], None)
        .unwrap();
    repo.replace_trackers(&[TrackerInfo::new("Hull Breach", "Control", "Engineering", 8)], None)
        .unwrap();

    repo.clear_all(None).unwrap();

    assert_eq!(repo.count::<NamedInfo>(None).unwrap(), 0);
    assert_eq!(repo.count::<PlayerInfo>(None).unwrap(), 0);
    assert_eq!(repo.count::<TrackerInfo>(None).unwrap(), 0);
    assert_eq!(repo.get_general_info(None).unwrap(), None);
}

#[test]
fn test_concurrent_replacements_never_interleave() {
    let (_dir, repo) = setup_repo();
    // Create and migrate the store before the writers race
    repo.store().open().unwrap();

    let writers = 4;
    let barrier = Arc::new(Barrier::new(writers));
    let handles: Vec<_> = (0..writers)
        .map(|i| {
            let repo = repo.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let names = vec![format!("w{}-alpha", i), format!("w{}-beta", i)];
                barrier.wait();
                let outcome = repo.replace_traits(&names, None);
                outcome.map(|_| names)
            })
        })
        .collect();

    let written: Vec<Vec<String>> = handles
        .into_iter()
        .map(|h| h.join().expect("writer thread panicked").expect("replace failed"))
        .collect();

    let listed = name_set(&repo.list_traits(None).unwrap());
    assert!(
        written.iter().any(|names| name_set(names) == listed),
        "final contents {:?} must equal exactly one writer's input",
        listed
    );
}

#[test]
fn test_blocked_writer_times_out() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("store.db");

    // Given: Another connection holds the write lock
    let holder = Store::at(&path).open().unwrap();
    holder.execute_batch("BEGIN IMMEDIATE").unwrap();

    // When: A writer with a short busy timeout tries to replace a collection
    let impatient = SqliteRepo::new(Store::new(
        StoreConfig::new(&path).with_busy_timeout(Duration::from_millis(100)),
    ));
    let err = impatient.replace_traits(&["Nebula"], None).unwrap_err();

    // Then: It gives up with a timeout instead of waiting forever
    assert_eq!(err.kind(), ExErrorKind::Timeout);

    holder.execute_batch("ROLLBACK").unwrap();
    assert!(impatient.replace_traits(&["Nebula"], None).is_ok());
}
