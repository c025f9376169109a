//! Request-deduplicating fetch cache keyed by resource path. A second fetch
//! for a key while one is in flight awaits the same response; completed
//! values are served from the cache until a mutation invalidates them.

use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;
use std::rc::Rc;

use futures::channel::oneshot;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::api::ApiError;

enum Entry {
    Ready(Value),
    Pending(Vec<oneshot::Sender<Result<Value, ApiError>>>),
}

enum Plan {
    Ready(Value),
    Wait(oneshot::Receiver<Result<Value, ApiError>>),
    Fetch,
}

#[derive(Clone, Default)]
pub struct FetchCache {
    entries: Rc<RefCell<HashMap<String, Entry>>>,
}

impl FetchCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached value for `key`, joins an in-flight request for
    /// it, or runs `fetch` and shares the result. Values are stored as JSON
    /// so heterogeneous resource types can live in one map.
    pub async fn get_or_fetch<T, F, Fut>(&self, key: &str, fetch: F) -> Result<T, ApiError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let plan = {
            let mut entries = self.entries.borrow_mut();
            match entries.get_mut(key) {
                Some(Entry::Ready(value)) => Plan::Ready(value.clone()),
                Some(Entry::Pending(waiters)) => {
                    let (tx, rx) = oneshot::channel();
                    waiters.push(tx);
                    Plan::Wait(rx)
                }
                None => {
                    entries.insert(key.to_string(), Entry::Pending(Vec::new()));
                    Plan::Fetch
                }
            }
        };

        match plan {
            Plan::Ready(value) => decode(value),
            Plan::Wait(rx) => match rx.await {
                Ok(Ok(value)) => decode(value),
                Ok(Err(err)) => Err(err),
                Err(_) => Err(ApiError::Network("request dropped".into())),
            },
            Plan::Fetch => {
                let result = fetch().await;
                let shared = match &result {
                    Ok(value) => {
                        serde_json::to_value(value).map_err(|e| ApiError::Decode(e.to_string()))
                    }
                    Err(err) => Err(err.clone()),
                };

                let waiters = {
                    let mut entries = self.entries.borrow_mut();
                    let waiters = match entries.remove(key) {
                        Some(Entry::Pending(waiters)) => waiters,
                        _ => Vec::new(),
                    };
                    if let Ok(value) = &shared {
                        entries.insert(key.to_string(), Entry::Ready(value.clone()));
                    }
                    waiters
                };
                for tx in waiters {
                    let _ = tx.send(shared.clone());
                }
                result
            }
        }
    }

    /// Drops every completed value whose key starts with `prefix`. Mutations
    /// call this so the next visit refetches.
    pub fn invalidate_prefix(&self, prefix: &str) {
        self.entries
            .borrow_mut()
            .retain(|key, entry| !(key.starts_with(prefix) && matches!(entry, Entry::Ready(_))));
    }

    pub fn contains(&self, key: &str) -> bool {
        matches!(self.entries.borrow().get(key), Some(Entry::Ready(_)))
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::LocalPool;
    use futures::task::LocalSpawnExt;
    use std::cell::Cell;

    #[test]
    fn second_fetch_hits_the_cache() {
        let cache = FetchCache::new();
        let calls = Rc::new(Cell::new(0));
        let mut pool = LocalPool::new();

        let first: Result<Vec<u32>, _> = {
            let calls = Rc::clone(&calls);
            pool.run_until(cache.get_or_fetch("/queries", move || async move {
                calls.set(calls.get() + 1);
                Ok(vec![1, 2, 3])
            }))
        };
        assert_eq!(first.unwrap(), vec![1, 2, 3]);

        let second: Result<Vec<u32>, _> = {
            let calls = Rc::clone(&calls);
            pool.run_until(cache.get_or_fetch("/queries", move || async move {
                calls.set(calls.get() + 1);
                Ok(vec![9])
            }))
        };
        assert_eq!(second.unwrap(), vec![1, 2, 3]);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn concurrent_fetches_share_one_request() {
        let cache = FetchCache::new();
        let calls = Rc::new(Cell::new(0));
        let (tx, rx) = oneshot::channel::<u32>();
        let results = Rc::new(RefCell::new(Vec::new()));

        let mut pool = LocalPool::new();
        let spawner = pool.spawner();

        {
            let cache = cache.clone();
            let calls = Rc::clone(&calls);
            let results = Rc::clone(&results);
            spawner
                .spawn_local(async move {
                    let value: Result<u32, _> = cache
                        .get_or_fetch("/stats", move || async move {
                            calls.set(calls.get() + 1);
                            Ok(rx.await.unwrap())
                        })
                        .await;
                    results.borrow_mut().push(value);
                })
                .unwrap();
        }
        {
            let cache = cache.clone();
            let calls = Rc::clone(&calls);
            let results = Rc::clone(&results);
            spawner
                .spawn_local(async move {
                    let value: Result<u32, _> = cache
                        .get_or_fetch("/stats", move || async move {
                            calls.set(calls.get() + 1);
                            unreachable!("second fetcher must never run");
                        })
                        .await;
                    results.borrow_mut().push(value);
                })
                .unwrap();
        }

        pool.run_until_stalled();
        tx.send(7).unwrap();
        pool.run();

        assert_eq!(calls.get(), 1);
        assert_eq!(*results.borrow(), vec![Ok(7), Ok(7)]);
    }

    #[test]
    fn failed_fetch_is_not_cached() {
        let cache = FetchCache::new();
        let mut pool = LocalPool::new();

        let failed: Result<u32, _> = pool.run_until(
            cache.get_or_fetch("/stats", || async { Err(ApiError::Http(500)) }),
        );
        assert_eq!(failed, Err(ApiError::Http(500)));
        assert!(!cache.contains("/stats"));

        let retried: Result<u32, _> =
            pool.run_until(cache.get_or_fetch("/stats", || async { Ok(11) }));
        assert_eq!(retried, Ok(11));
    }

    #[test]
    fn prefix_invalidation_drops_matching_keys() {
        let cache = FetchCache::new();
        let mut pool = LocalPool::new();

        let _: Result<u32, _> =
            pool.run_until(cache.get_or_fetch("/recommendations?queryId=1", || async { Ok(1) }));
        let _: Result<u32, _> =
            pool.run_until(cache.get_or_fetch("/recommendations/for-me?email=a", || async { Ok(2) }));
        let _: Result<u32, _> = pool.run_until(cache.get_or_fetch("/queries", || async { Ok(3) }));

        cache.invalidate_prefix("/recommendations");
        assert!(!cache.contains("/recommendations?queryId=1"));
        assert!(!cache.contains("/recommendations/for-me?email=a"));
        assert!(cache.contains("/queries"));
    }
}
