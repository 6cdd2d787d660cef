//! Snapshot store tests against throwaway directories.

use chrono::{NaiveDate, NaiveDateTime};
use seatdraw_core::{
    clock::FixedClock,
    error::SeatError,
    snapshot::SnapshotStore,
};
use serde_json::json;
use std::fs;
use tempfile::TempDir;

fn at(day: u32, h: u32, m: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, day)
        .unwrap()
        .and_hms_opt(h, m, s)
        .unwrap()
}

fn store_at(dir: &TempDir, when: NaiveDateTime) -> SnapshotStore {
    SnapshotStore::open(dir.path())
        .expect("open store")
        .with_clock(FixedClock(when))
}

#[test]
fn save_then_read_back_round_trips() {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = TempDir::new().unwrap();
    let store = store_at(&dir, at(1, 9, 30, 0));
    let doc = json!({"seats": [{"x": 10.5, "y": 20, "number": 3}], "title": "1반"});

    let saved = store.save(&doc).expect("save");
    assert_eq!(saved.id, "seat_20240501_093000");
    assert_eq!(saved.path, dir.path().join("seat_20240501_093000.json"));

    let content = fs::read_to_string(&saved.path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(parsed, doc);
}

#[test]
fn files_are_pretty_printed_with_unescaped_unicode() {
    let dir = TempDir::new().unwrap();
    let store = store_at(&dir, at(1, 8, 0, 0));
    let saved = store.save(&json!({"name": "좌석", "a": 1})).unwrap();

    let content = fs::read_to_string(&saved.path).unwrap();
    assert_eq!(content, "{\n  \"name\": \"좌석\",\n  \"a\": 1\n}");
}

#[test]
fn open_creates_missing_directory() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("static").join("saves");
    let store = SnapshotStore::open(&nested).unwrap();
    assert!(nested.is_dir());
    assert!(store.list_all().unwrap().is_empty());
}

#[test]
fn save_recreates_a_removed_directory() {
    let dir = TempDir::new().unwrap();
    let saves = dir.path().join("saves");
    let store = SnapshotStore::open(&saves).unwrap().with_clock(FixedClock(at(2, 1, 2, 3)));
    fs::remove_dir(&saves).unwrap();

    assert!(store.list_all().unwrap().is_empty());
    store.save(&json!({"a": 1})).unwrap();
    assert_eq!(store.list_all().unwrap(), vec![json!({"a": 1})]);
}

#[test]
fn saved_document_comes_first_in_listing() {
    let dir = TempDir::new().unwrap();
    store_at(&dir, at(1, 9, 0, 0)).save(&json!({"b": 2})).unwrap();
    store_at(&dir, at(1, 9, 0, 1)).save(&json!({"a": 1})).unwrap();

    let listed = SnapshotStore::open(dir.path()).unwrap().list_all().unwrap();
    assert_eq!(listed.first(), Some(&json!({"a": 1})));
}

#[test]
fn listing_is_newest_first_and_skips_other_files() {
    let dir = TempDir::new().unwrap();
    for (i, when) in [at(3, 12, 0, 0), at(1, 12, 0, 0), at(2, 12, 0, 0)].into_iter().enumerate() {
        store_at(&dir, when).save(&json!({"order": i})).unwrap();
    }
    fs::write(dir.path().join("notes.txt"), "not a snapshot").unwrap();

    let store = SnapshotStore::open(dir.path()).unwrap();
    assert_eq!(
        store.list_all().unwrap(),
        vec![json!({"order": 0}), json!({"order": 2}), json!({"order": 1})]
    );
    assert_eq!(
        store.snapshot_ids().unwrap(),
        vec!["seat_20240503_120000", "seat_20240502_120000", "seat_20240501_120000"]
    );
}

#[test]
fn recent_is_a_prefix_of_all() {
    let dir = TempDir::new().unwrap();
    for s in 0..5 {
        store_at(&dir, at(4, 10, 0, s)).save(&json!({"s": s})).unwrap();
    }
    let store = SnapshotStore::open(dir.path()).unwrap();
    let all = store.list_all().unwrap();

    assert_eq!(store.list_recent(3).unwrap(), all[..3].to_vec());
    assert_eq!(store.list_recent(10).unwrap(), all);
    assert!(store.list_recent(0).unwrap().is_empty());
}

#[test]
fn recent_counts_only_snapshot_files() {
    let dir = TempDir::new().unwrap();
    store_at(&dir, at(5, 1, 0, 0)).save(&json!({"n": 1})).unwrap();
    store_at(&dir, at(5, 2, 0, 0)).save(&json!({"n": 2})).unwrap();
    // Sorts ahead of every snapshot name.
    fs::write(dir.path().join("zz_readme.md"), "hello").unwrap();

    let recent = SnapshotStore::open(dir.path()).unwrap().list_recent(2).unwrap();
    assert_eq!(recent, vec![json!({"n": 2}), json!({"n": 1})]);
}

#[test]
fn one_corrupt_file_fails_the_whole_listing() {
    let dir = TempDir::new().unwrap();
    store_at(&dir, at(6, 9, 0, 0)).save(&json!({"ok": true})).unwrap();
    fs::write(dir.path().join("seat_20240601_080000.json"), "{ not json").unwrap();

    let store = SnapshotStore::open(dir.path()).unwrap();
    match store.list_all() {
        Err(SeatError::CorruptSnapshot { path, .. }) => {
            assert!(path.ends_with("seat_20240601_080000.json"));
        }
        other => panic!("expected CorruptSnapshot, got {other:?}"),
    }
}

#[test]
fn corrupt_file_outside_the_recent_window_is_not_read() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("seat_20240101_000000.json"), "garbage").unwrap();
    store_at(&dir, at(7, 9, 0, 0)).save(&json!({"fresh": 1})).unwrap();

    let store = SnapshotStore::open(dir.path()).unwrap();
    assert_eq!(store.list_recent(1).unwrap(), vec![json!({"fresh": 1})]);
    assert!(store.list_recent(2).is_err());
}

#[test]
fn same_second_saves_overwrite() {
    let dir = TempDir::new().unwrap();
    let store = store_at(&dir, at(8, 14, 15, 16));
    let first = store.save(&json!({"v": 1})).unwrap();
    let second = store.save(&json!({"v": 2})).unwrap();

    assert_eq!(first.path, second.path);
    assert_eq!(store.list_all().unwrap(), vec![json!({"v": 2})]);
}

#[test]
fn save_into_a_path_that_is_not_a_directory_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let saves = dir.path().join("saves");
    let store = SnapshotStore::open(&saves).unwrap().with_clock(FixedClock(at(9, 7, 0, 0)));
    fs::remove_dir(&saves).unwrap();
    fs::write(&saves, "a plain file where the directory was").unwrap();

    match store.save(&json!({"a": 1})) {
        Err(SeatError::Io(_)) => {}
        other => panic!("expected Io error, got {other:?}"),
    }
}

#[test]
fn open_under_a_regular_file_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "not a directory").unwrap();

    assert!(matches!(SnapshotStore::open(blocker.join("saves")), Err(SeatError::Io(_))));
}
