//! Bulk operation tests
//!
//! Bulk writes are batch/administrative operations: one shared etag per
//! batch, filter-based matching, no per-document version checking.

use serde_json::json;

use etchdb::{DocumentRepository, DocumentStore, MemoryStore, StatusCode};

/// All documents of one bulk upsert share the identical etag value.
#[test]
fn test_bulk_upsert_stamps_one_shared_etag() {
    let store = MemoryStore::new();
    let repo = DocumentRepository::new(&store);

    let documents: Vec<_> = (1..=10).map(|i| json!({"_id": i, "n": i})).collect();
    let result = repo.bulk_upsert_documents_post("docs", documents).unwrap();

    assert_eq!(result.status, StatusCode::Ok);
    assert_eq!(result.summary.inserted, 10);

    let marker = json!(result.etag.unwrap().to_string());
    let first = store.find_by_id("docs", &json!(1)).unwrap().unwrap();
    let last = store.find_by_id("docs", &json!(10)).unwrap().unwrap();
    assert_eq!(first["_etag"], marker);
    assert_eq!(last["_etag"], marker);
}

/// A bulk upsert overwrites existing documents without any etag check.
#[test]
fn test_bulk_upsert_always_overwrites() {
    let store = MemoryStore::new();
    let repo = DocumentRepository::new(&store);

    repo.upsert_document("docs", &json!(1), json!({"n": 1}), None, false, true)
        .unwrap();

    let result = repo
        .bulk_upsert_documents_post("docs", vec![json!({"_id": 1, "n": 100})])
        .unwrap();

    assert_eq!(result.summary.matched, 1);
    assert_eq!(
        store.find_by_id("docs", &json!(1)).unwrap().unwrap()["n"],
        json!(100)
    );
}

/// Filter-based bulk delete removes every match and reports counts only.
#[test]
fn test_bulk_delete_matches_by_filter() {
    let store = MemoryStore::new();
    let repo = DocumentRepository::new(&store);

    let documents: Vec<_> = (1..=6)
        .map(|i| json!({"_id": i, "n": i, "parity": if i % 2 == 0 { "even" } else { "odd" }}))
        .collect();
    repo.bulk_upsert_documents_post("docs", documents).unwrap();

    let result = repo
        .bulk_delete_documents("docs", json!({"parity": "even"}))
        .unwrap();

    assert_eq!(result.summary.deleted, 3);
    assert!(result.etag.is_none());
    assert_eq!(store.count("docs").unwrap(), 3);
    assert!(store.find_by_id("docs", &json!(2)).unwrap().is_none());
    assert!(store.find_by_id("docs", &json!(3)).unwrap().is_some());
}

/// Bulk patch applies to every match, creates nothing, and leaves
/// unmatched documents alone.
#[test]
fn test_bulk_patch_is_matching_only() {
    let store = MemoryStore::new();
    let repo = DocumentRepository::new(&store);

    let documents: Vec<_> = (1..=4).map(|i| json!({"_id": i, "n": i})).collect();
    repo.bulk_upsert_documents_post("docs", documents).unwrap();

    let result = repo
        .bulk_patch_documents("docs", json!({"n": {"$gte": 3}}), json!({"big": true}))
        .unwrap();

    assert_eq!(result.summary.matched, 2);
    assert_eq!(result.summary.modified, 2);
    assert_eq!(store.count("docs").unwrap(), 4);

    let patched = store.find_by_id("docs", &json!(4)).unwrap().unwrap();
    assert_eq!(patched["big"], json!(true));
    let untouched = store.find_by_id("docs", &json!(1)).unwrap().unwrap();
    assert!(untouched.get("big").is_none());
}

/// Bulk patch against a filter with no matches touches nothing.
#[test]
fn test_bulk_patch_no_matches() {
    let store = MemoryStore::new();
    let repo = DocumentRepository::new(&store);

    repo.bulk_upsert_documents_post("docs", vec![json!({"_id": 1, "n": 1})])
        .unwrap();

    let result = repo
        .bulk_patch_documents("docs", json!({"n": 999}), json!({"big": true}))
        .unwrap();

    assert!(result.summary.is_empty());
    assert_eq!(store.count("docs").unwrap(), 1);
}
