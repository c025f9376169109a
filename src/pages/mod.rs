pub mod add_query;
pub mod all_queries;
pub mod home;
pub mod my_queries;
pub mod my_recommendations;
pub mod not_found;
pub mod profile;
pub mod query_details;
pub mod reco_for_me;
pub mod sign_in;
pub mod sign_up;
pub mod update_query;
