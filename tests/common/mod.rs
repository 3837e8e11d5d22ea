//! Shared test utilities for tracker integration tests

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use rickmorty::storage::SqliteStore;
use tempfile::TempDir;

/// Creates a SQLite store in a temporary directory.
///
/// The directory must outlive the store, so both are returned.
pub fn create_test_store() -> (TempDir, SqliteStore) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let store = SqliteStore::open(&temp_dir.path().join("data.db")).expect("Failed to open store");
    (temp_dir, store)
}

pub fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid date")
}

/// `s` at `hour`:00 local time
pub fn at(s: &str, hour: u32) -> NaiveDateTime {
    day(s).and_hms_opt(hour, 0, 0).expect("valid hour")
}
