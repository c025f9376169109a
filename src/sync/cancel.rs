//! Cancellation guard for view-scoped requests. A response that lands after
//! the owning view was torn down is dropped instead of writing into
//! disposed signals.

use std::cell::Cell;
use std::rc::Rc;

use leptos::on_cleanup;

#[derive(Clone, Default)]
pub struct CancelGuard {
    cancelled: Rc<Cell<bool>>,
}

impl CancelGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A guard that cancels when the current reactive owner is cleaned up.
    pub fn for_current_owner() -> Self {
        let guard = CancelGuard::new();
        let handle = guard.clone();
        on_cleanup(move || handle.cancel());
        guard
    }

    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_cancelled_flag() {
        let guard = CancelGuard::new();
        let clone = guard.clone();
        assert!(!guard.is_cancelled());
        clone.cancel();
        assert!(guard.is_cancelled());
    }
}
