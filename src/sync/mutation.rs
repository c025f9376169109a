//! Optimistic mutation: snapshot the current value, apply the local change,
//! issue the request, and either reconcile server-assigned fields or restore
//! the snapshot. Call sites never hand-invert state.

use std::cell::RefCell;
use std::collections::HashSet;
use std::future::Future;
use std::rc::Rc;

use leptos::{RwSignal, SignalGetUntracked, SignalSet, SignalUpdate};

/// Applies `apply` to the signal immediately, then awaits `request`.
///
/// On success, `reconcile` runs against the (already mutated) state with the
/// server's response, e.g. to fill in a newly assigned id. On failure the
/// pre-mutation snapshot is restored and the error returned to the caller
/// for surfacing.
pub async fn optimistic<T, U, E, Fut>(
    signal: RwSignal<T>,
    apply: impl FnOnce(&mut T),
    request: Fut,
    reconcile: impl FnOnce(&mut T, &U),
) -> Result<U, E>
where
    T: Clone,
    Fut: Future<Output = Result<U, E>>,
{
    let snapshot = signal.get_untracked();
    signal.update(apply);

    match request.await {
        Ok(value) => {
            signal.update(|state| reconcile(state, &value));
            Ok(value)
        }
        Err(err) => {
            signal.set(snapshot);
            Err(err)
        }
    }
}

/// Tracks mutation keys with a request outstanding so a double-click cannot
/// fire two conflicting toggles. The guard releases the key on drop.
#[derive(Clone, Default)]
pub struct InFlight {
    keys: Rc<RefCell<HashSet<String>>>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `key`. Returns `None` when the same mutation is already
    /// pending, in which case the caller should ignore the action.
    pub fn begin(&self, key: &str) -> Option<InFlightGuard> {
        if !self.keys.borrow_mut().insert(key.to_string()) {
            return None;
        }
        Some(InFlightGuard {
            keys: Rc::clone(&self.keys),
            key: key.to_string(),
        })
    }
}

pub struct InFlightGuard {
    keys: Rc<RefCell<HashSet<String>>>,
    key: String,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.keys.borrow_mut().remove(&self.key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use leptos::create_runtime;

    #[test]
    fn failure_restores_the_snapshot() {
        let runtime = create_runtime();
        let counts = leptos::create_rw_signal(vec![3usize]);

        let result: Result<(), &str> = block_on(optimistic(
            counts,
            |list| list[0] += 1,
            async { Err("network down") },
            |_, _| {},
        ));

        assert_eq!(result, Err("network down"));
        assert_eq!(counts.get_untracked(), vec![3]);
        runtime.dispose();
    }

    #[test]
    fn success_keeps_the_change_and_reconciles() {
        let runtime = create_runtime();
        let comments = leptos::create_rw_signal(vec![(None::<String>, "hi".to_string())]);

        let result: Result<String, ()> = block_on(optimistic(
            comments,
            |list| list.push((None, "second".into())),
            async { Ok("c42".to_string()) },
            |list, id| {
                if let Some(last) = list.last_mut() {
                    last.0 = Some(id.clone());
                }
            },
        ));

        assert_eq!(result.as_deref(), Ok("c42"));
        let state = comments.get_untracked();
        assert_eq!(state.len(), 2);
        assert_eq!(state[1].0.as_deref(), Some("c42"));
        runtime.dispose();
    }

    #[test]
    fn in_flight_key_blocks_duplicates_until_released() {
        let inflight = InFlight::new();
        let guard = inflight.begin("like:r1").expect("first claim succeeds");
        assert!(inflight.begin("like:r1").is_none());
        assert!(inflight.begin("like:r2").is_some());

        drop(guard);
        assert!(inflight.begin("like:r1").is_some());
    }
}
