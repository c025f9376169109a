pub mod query;
pub mod recommendation;
pub mod review;
pub mod stats;
pub mod user;
