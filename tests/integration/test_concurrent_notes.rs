#[path = "../common/mod.rs"]
mod common;

use axum::http::StatusCode;
use common::TestApp;
use futures::future::join_all;
use parking_lot::Mutex;
use playground_server::NoteStore;
use std::{collections::BTreeSet, sync::Arc};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_http_creates_get_distinct_ids() {
    let app = Arc::new(TestApp::new());

    let tasks = (0..100).map(|i| {
        let app = app.clone();
        tokio::spawn(async move { app.create_note(&format!("note {}", i)).await })
    });

    let ids: BTreeSet<i64> = join_all(tasks)
        .await
        .into_iter()
        .map(|joined| joined.unwrap()["id"].as_i64().unwrap())
        .collect();

    assert_eq!(ids, (1..=100).collect::<BTreeSet<i64>>());

    let listed = app.get("/api/notes").await.json();
    let listed_ids: Vec<i64> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|note| note["id"].as_i64().unwrap())
        .collect();
    assert_eq!(listed_ids, (1..=100).collect::<Vec<i64>>());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_deletes_remove_each_note_once() {
    let app = Arc::new(TestApp::new());
    for i in 0..20 {
        app.create_note(&format!("note {}", i)).await;
    }

    // Two deleters race for every id; exactly one of them wins.
    let tasks = (1..=20).flat_map(|id| {
        let app = app.clone();
        (0..2).map(move |_| {
            let app = app.clone();
            tokio::spawn(async move { app.delete(&format!("/api/notes/{}", id)).await.status })
        })
    });

    let statuses: Vec<StatusCode> = join_all(tasks)
        .await
        .into_iter()
        .map(|joined| joined.unwrap())
        .collect();

    let ok = statuses.iter().filter(|s| **s == StatusCode::OK).count();
    let missing = statuses.iter().filter(|s| **s == StatusCode::NOT_FOUND).count();
    assert_eq!((ok, missing), (20, 20));
    assert_eq!(app.state.note_service.note_count(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_readers_see_consistent_snapshots_during_writes() {
    let app = Arc::new(TestApp::new());

    let writer = {
        let app = app.clone();
        tokio::spawn(async move {
            for i in 0..50 {
                app.create_note(&format!("note {}", i)).await;
            }
        })
    };

    let readers = (0..10).map(|_| {
        let app = app.clone();
        tokio::spawn(async move {
            for _ in 0..10 {
                let notes = app.get("/api/notes").await.json();
                let ids: Vec<i64> = notes
                    .as_array()
                    .unwrap()
                    .iter()
                    .map(|note| note["id"].as_i64().unwrap())
                    .collect();
                // Every snapshot is a gapless prefix of the creation order.
                assert_eq!(ids, (1..=ids.len() as i64).collect::<Vec<i64>>());
            }
        })
    });

    for reader in join_all(readers).await {
        reader.unwrap();
    }
    writer.await.unwrap();

    assert_eq!(app.state.note_service.note_count(), 50);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_listing_during_deletes_never_shows_removed_notes() {
    const TOTAL: i64 = 60;
    let app = Arc::new(TestApp::new());
    for i in 0..TOTAL {
        app.create_note(&format!("note {}", i)).await;
    }
    let confirmed = Arc::new(Mutex::new(BTreeSet::new()));

    let deleters = (0..3).map(|worker| {
        let app = app.clone();
        let confirmed = confirmed.clone();
        tokio::spawn(async move {
            for id in (1..=TOTAL).filter(|id| id % 3 == worker) {
                let response = app.delete(&format!("/api/notes/{}", id)).await;
                assert_eq!(response.status, StatusCode::OK);
                confirmed.lock().insert(id);
            }
        })
    });

    let readers = (0..4).map(|_| {
        let app = app.clone();
        let confirmed = confirmed.clone();
        tokio::spawn(async move {
            for _ in 0..25 {
                let gone_before: BTreeSet<i64> = confirmed.lock().clone();
                let notes = app.get("/api/notes").await.json();
                let seen: Vec<i64> = notes
                    .as_array()
                    .unwrap()
                    .iter()
                    .map(|note| note["id"].as_i64().unwrap())
                    .collect();

                assert!(seen.windows(2).all(|pair| pair[0] < pair[1]), "{:?}", seen);
                assert!(seen.iter().all(|id| (1..=TOTAL).contains(id)));
                assert!(seen.iter().all(|id| !gone_before.contains(id)), "{:?}", seen);
            }
        })
    });

    let tasks: Vec<_> = deleters.chain(readers).collect();
    for task in join_all(tasks).await {
        task.unwrap();
    }

    assert_eq!(app.state.note_service.note_count(), 0);
    assert_eq!(app.get("/api/notes").await.json(), serde_json::json!([]));
}

#[test]
fn test_store_shared_across_threads() {
    let store = Arc::new(NoteStore::new());

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let store = store.clone();
            std::thread::spawn(move || {
                (0..25)
                    .map(|i| store.create(format!("{}-{}", t, i)).unwrap().id)
                    .collect::<Vec<i64>>()
            })
        })
        .collect();

    let ids: BTreeSet<i64> = handles
        .into_iter()
        .flat_map(|handle| handle.join().unwrap())
        .collect();

    assert_eq!(ids, (1..=200).collect::<BTreeSet<i64>>());
    assert_eq!(store.len(), 200);
}
