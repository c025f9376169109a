pub mod comment_thread;
pub mod loading;
pub mod navbar;
pub mod newsletter;
pub mod query_form;
pub mod recent_queries;
pub mod recommendation_card;
pub mod review_panel;
pub mod reviews_strip;
pub mod stats_section;
pub mod top_rated;
