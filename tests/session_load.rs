//! Session Load Tests
//!
//! Loading happens once per session:
//! - A second load returns the same snapshot without touching the files
//! - Any missing or malformed file fails the whole load
//! - A failed reload keeps the previous snapshot

mod common;

use std::fs;

use feedline::dataset::{CsvSource, DatasetErrorCode, Session, TableName};
use tempfile::TempDir;

// =============================================================================
// Idempotent Load
// =============================================================================

/// Second load returns identical content.
#[test]
fn test_load_is_idempotent() {
    let tmp = common::standard_dataset();
    let mut session = Session::new(CsvSource::new(tmp.path()));

    let first = session.load().unwrap().clone();
    let second = session.load().unwrap();

    assert_eq!(first.summary(), second.summary());
    for (name, table) in first.tables() {
        assert_eq!(table, second.table(name));
    }
}

/// Second load does no I/O: removing the files does not affect it.
#[test]
fn test_second_load_ignores_deleted_files() {
    let tmp = common::standard_dataset();
    let mut session = Session::new(CsvSource::new(tmp.path()));

    let fingerprint = session.load().unwrap().fingerprint();
    for table in TableName::ALL {
        fs::remove_file(session.source().path_for(table)).unwrap();
    }

    let dataset = session.load().unwrap();
    assert_eq!(dataset.fingerprint(), fingerprint);
    assert_eq!(dataset.table(TableName::Claims).len(), 6);
}

/// Row counts match the files.
#[test]
fn test_summary_counts() {
    let tmp = common::standard_dataset();
    let mut session = Session::new(CsvSource::new(tmp.path()));

    let summary = session.load().unwrap().summary();
    assert_eq!(summary.total_providers, 3);
    assert_eq!(summary.total_receivers, 3);
    assert_eq!(summary.total_food_listings, 4);
    assert_eq!(summary.total_claims, 6);
}

// =============================================================================
// Load Failures
// =============================================================================

/// Missing file fails the load with DataUnavailable.
#[test]
fn test_missing_file_is_unavailable() {
    let tmp = common::standard_dataset();
    fs::remove_file(tmp.path().join("receivers_data.csv")).unwrap();

    let mut session = Session::new(CsvSource::new(tmp.path()));
    let err = session.load().unwrap_err();

    assert_eq!(err.code(), DatasetErrorCode::FeedDataUnavailable);
    assert!(err.is_fatal());
    assert!(err.message().contains("receivers_data.csv"));
    assert!(!session.is_loaded());
}

/// Empty directory fails on the first table.
#[test]
fn test_empty_directory() {
    let tmp = TempDir::new().unwrap();
    let mut session = Session::new(CsvSource::new(tmp.path()));

    let err = session.load().unwrap_err();
    assert!(err.message().contains("providers_data.csv"));
}

/// Malformed row fails the whole load.
#[test]
fn test_malformed_row_fails_load() {
    let tmp = TempDir::new().unwrap();
    common::write_dataset_with_claims(
        tmp.path(),
        "Claim_ID,Food_ID,Receiver_ID,Status,Timestamp\n\
         1,100,10,Completed,x\n\
         abc,100,10,Pending,y\n",
    );

    let mut session = Session::new(CsvSource::new(tmp.path()));
    let err = session.load().unwrap_err();

    assert_eq!(err.code(), DatasetErrorCode::FeedDataUnavailable);
    assert_eq!(err.line(), Some(3));
}

/// Header-only claims file loads as an empty table.
#[test]
fn test_header_only_table_loads() {
    let tmp = TempDir::new().unwrap();
    common::write_dataset_with_claims(tmp.path(), common::CLAIMS_HEADER_ONLY);

    let mut session = Session::new(CsvSource::new(tmp.path()));
    let dataset = session.load().unwrap();
    assert!(dataset.table(TableName::Claims).is_empty());
}

// =============================================================================
// Reload
// =============================================================================

/// Reload picks up changed files.
#[test]
fn test_reload_reads_again() {
    let tmp = common::standard_dataset();
    let mut session = Session::new(CsvSource::new(tmp.path()));
    session.load().unwrap();

    fs::write(tmp.path().join("claims_data.csv"), common::CLAIMS_HEADER_ONLY).unwrap();

    // Plain load still serves the snapshot
    assert_eq!(session.load().unwrap().table(TableName::Claims).len(), 6);

    let dataset = session.reload().unwrap();
    assert_eq!(dataset.table(TableName::Claims).len(), 0);
}

/// Failed reload keeps the previous snapshot.
#[test]
fn test_failed_reload_keeps_snapshot() {
    let tmp = common::standard_dataset();
    let mut session = Session::new(CsvSource::new(tmp.path()));
    session.load().unwrap();

    fs::remove_file(tmp.path().join("providers_data.csv")).unwrap();
    assert!(session.reload().is_err());

    assert!(session.is_loaded());
    assert_eq!(session.load().unwrap().table(TableName::Providers).len(), 3);
}
