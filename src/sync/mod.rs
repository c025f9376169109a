//! Client-side synchronization helpers: one optimistic-mutation path shared
//! by every state-changing action, a request-deduplicating fetch cache, and
//! a cancellation guard tied to view lifetime.

pub mod cache;
pub mod cancel;
pub mod mutation;

pub use cache::FetchCache;
pub use cancel::CancelGuard;
pub use mutation::{optimistic, InFlight};
