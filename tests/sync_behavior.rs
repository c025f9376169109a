//! End-to-end behavior of the optimistic mutation path against the fetch
//! cache: a liked recommendation stays liked across a refetch, and a failed
//! request leaves both the list and the cache in their pre-mutation state.

use futures::channel::oneshot;
use futures::executor::{block_on, LocalPool};
use futures::task::LocalSpawnExt;
use leptos::{create_runtime, create_rw_signal, SignalGetUntracked, SignalSet};

use prorec::models::recommendation::Recommendation;
use prorec::sync::{optimistic, FetchCache, InFlight};

fn rec(id: &str, likes: &[&str]) -> Recommendation {
    Recommendation {
        id: id.to_string(),
        likes: likes.iter().map(|s| s.to_string()).collect(),
        ..Recommendation::default()
    }
}

#[test]
fn like_toggle_round_trip_with_cache_invalidation() {
    let runtime = create_runtime();
    let cache = FetchCache::new();
    let recs = create_rw_signal(vec![rec("r1", &[])]);

    // Prime the cache the way a page load would.
    let primed: Result<Vec<Recommendation>, prorec::api::ApiError> = block_on(
        cache.get_or_fetch("/recommendations?queryId=q1", || async {
            Ok(recs.get_untracked())
        }),
    );
    assert!(primed.is_ok());
    assert!(cache.contains("/recommendations?queryId=q1"));

    // Optimistic like, server accepts.
    let result: Result<(), prorec::api::ApiError> = block_on(optimistic(
        recs,
        |list| {
            if let Some(r) = list.iter_mut().find(|r| r.id == "r1") {
                r.toggle_like("a@x.com");
            }
        },
        async { Ok(()) },
        |_, _| {},
    ));
    assert!(result.is_ok());
    assert!(recs.get_untracked()[0].is_liked_by("a@x.com"));

    // The mutation invalidates the listing so the next visit refetches.
    cache.invalidate_prefix("/recommendations");
    assert!(!cache.contains("/recommendations?queryId=q1"));

    runtime.dispose();
}

#[test]
fn failed_like_rolls_back_and_cache_survives() {
    let runtime = create_runtime();
    let cache = FetchCache::new();
    let recs = create_rw_signal(vec![rec("r1", &["b@x.com"])]);

    let primed: Result<Vec<Recommendation>, prorec::api::ApiError> = block_on(
        cache.get_or_fetch("/recommendations?queryId=q1", || async {
            Ok(recs.get_untracked())
        }),
    );
    assert!(primed.is_ok());

    let result: Result<(), prorec::api::ApiError> = block_on(optimistic(
        recs,
        |list| {
            if let Some(r) = list.iter_mut().find(|r| r.id == "r1") {
                r.toggle_like("a@x.com");
            }
        },
        async { Err(prorec::api::ApiError::Http(500)) },
        |_, _| {},
    ));
    assert!(result.is_err());

    // Rolled back to exactly the server state; nothing invalidated.
    assert_eq!(recs.get_untracked()[0].likes, vec!["b@x.com".to_string()]);
    assert!(cache.contains("/recommendations?queryId=q1"));

    runtime.dispose();
}

#[test]
fn inflight_key_blocks_a_second_toggle_until_released() {
    let inflight = InFlight::new();

    let guard = inflight.begin("like:r1");
    assert!(guard.is_some());
    assert!(inflight.begin("like:r1").is_none());
    // A different recommendation is unaffected.
    assert!(inflight.begin("like:r2").is_some());

    drop(guard);
    assert!(inflight.begin("like:r1").is_some());
}

// The details pages re-read the route id before writing a response into
// their signals, so a slow fetch started for a previous id can never
// overwrite the data of the id the route has since moved to.
#[test]
fn response_for_a_superseded_route_id_is_discarded() {
    let runtime = create_runtime();
    let route_id = create_rw_signal("a".to_string());
    let shown = create_rw_signal(None::<String>);

    let mut pool = LocalPool::new();
    let spawner = pool.spawner();

    let (slow_tx, slow_rx) = oneshot::channel::<String>();
    {
        let started_for = route_id.get_untracked();
        spawner
            .spawn_local(async move {
                let payload = slow_rx.await.unwrap();
                if route_id.get_untracked() == started_for {
                    shown.set(Some(payload));
                }
            })
            .unwrap();
    }

    // Navigate to "b" while "a" is still loading; "b" resolves first.
    route_id.set("b".to_string());
    let (fast_tx, fast_rx) = oneshot::channel::<String>();
    {
        let started_for = route_id.get_untracked();
        spawner
            .spawn_local(async move {
                let payload = fast_rx.await.unwrap();
                if route_id.get_untracked() == started_for {
                    shown.set(Some(payload));
                }
            })
            .unwrap();
    }
    fast_tx.send("query b".to_string()).unwrap();
    pool.run_until_stalled();
    assert_eq!(shown.get_untracked().as_deref(), Some("query b"));

    // The stale response for "a" lands late and must be dropped.
    slow_tx.send("query a".to_string()).unwrap();
    pool.run_until_stalled();
    assert_eq!(shown.get_untracked().as_deref(), Some("query b"));

    runtime.dispose();
}

#[test]
fn deleted_recommendation_disappears_and_stays_gone_on_success() {
    let runtime = create_runtime();
    let recs = create_rw_signal(vec![rec("r1", &[]), rec("r2", &[])]);

    let result: Result<(), prorec::api::ApiError> = block_on(optimistic(
        recs,
        |list| list.retain(|r| r.id != "r1"),
        async { Ok(()) },
        |_, _| {},
    ));
    assert!(result.is_ok());

    let remaining = recs.get_untracked();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, "r2");

    runtime.dispose();
}
