#[path = "../common/mod.rs"]
mod common;

use axum::http::StatusCode;
use common::TestApp;
use playground_server::{NoteStore, StoreError};
use serde_json::Value;
use tokio_test::{assert_err, assert_ok};

fn ids(notes: &Value) -> Vec<i64> {
    notes
        .as_array()
        .unwrap()
        .iter()
        .map(|note| note["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_create_delete_create_scenario() {
    let app = TestApp::new();

    let a = app.create_note("a").await;
    let b = app.create_note("b").await;
    assert_eq!((a["id"].as_i64(), b["id"].as_i64()), (Some(1), Some(2)));

    let response = app.delete("/api/notes/delete?id=1").await;
    assert_eq!(response.status, StatusCode::OK);

    let c = app.create_note("c").await;
    assert_eq!(c["id"], 3);

    let notes = app.get("/api/notes").await.json();
    assert_eq!(ids(&notes), vec![2, 3]);
    assert_eq!(notes[0]["text"], "b");
    assert_eq!(notes[1]["text"], "c");
}

#[tokio::test]
async fn test_ids_are_never_reused() {
    let app = TestApp::new();

    for round in 0..5 {
        let note = app.create_note(&format!("note {}", round)).await;
        let id = note["id"].as_i64().unwrap();
        assert_eq!(id, round + 1);

        let response = app.delete(&format!("/api/notes/{}", id)).await;
        assert_eq!(response.status, StatusCode::OK);
    }

    assert_eq!(app.get("/api/notes").await.json(), serde_json::json!([]));
    assert_eq!(app.create_note("after").await["id"], 6);
}

#[tokio::test]
async fn test_listing_keeps_creation_order_across_deletes() {
    let app = TestApp::new();
    for text in ["one", "two", "three", "four", "five"] {
        app.create_note(text).await;
    }

    app.delete("/api/notes/2").await;
    app.delete("/api/notes/4").await;

    let notes = app.get("/api/notes").await.json();
    assert_eq!(ids(&notes), vec![1, 3, 5]);

    let texts: Vec<&str> = notes
        .as_array()
        .unwrap()
        .iter()
        .map(|note| note["text"].as_str().unwrap())
        .collect();
    assert_eq!(texts, vec!["one", "three", "five"]);
}

#[tokio::test]
async fn test_form_and_json_share_one_store() {
    let app = TestApp::new();

    app.create_note("from json").await;
    let response = app
        .post_raw("/notes/create", "application/x-www-form-urlencoded", "note=from+form")
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);

    let notes = app.get("/api/notes").await.json();
    assert_eq!(ids(&notes), vec![1, 2]);
    assert_eq!(notes[1]["text"], "from form");
}

#[tokio::test]
async fn test_separate_apps_do_not_share_notes() {
    let first = TestApp::new();
    let second = TestApp::new();

    first.create_note("only here").await;

    assert_eq!(first.state.note_service.note_count(), 1);
    assert_eq!(second.state.note_service.note_count(), 0);
    assert_eq!(second.create_note("fresh").await["id"], 1);
}

#[test]
fn test_store_returned_snapshot_is_detached() {
    let store = NoteStore::new();
    assert_ok!(store.create("kept"));

    let mut snapshot = store.list();
    snapshot.clear();

    assert_eq!(store.len(), 1);
    assert_eq!(assert_ok!(store.get_by_id(1)).text, "kept");
}

#[test]
fn test_store_rejects_empty_and_missing() {
    let store = NoteStore::new();

    let err = assert_err!(store.create(""));
    assert!(matches!(err, StoreError::InvalidInput(_)));

    assert_eq!(store.get_by_id(1), Err(StoreError::NotFound(1)));
    assert_eq!(store.delete_by_id(1), Err(StoreError::NotFound(1)));
    assert!(store.is_empty());
}
