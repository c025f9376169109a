//! JSON-over-HTTP client for the REST backend. One function per endpoint;
//! every non-2xx response is an error. The backend is the source of truth
//! for all data the client holds.

use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config;
use crate::models::query::Query;
use crate::models::recommendation::{Comment, Recommendation};
use crate::models::review::Review;
use crate::models::stats::SiteStats;
use crate::models::user::UserProfile;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Network(String),
    #[error("server responded with status {0}")]
    Http(u16),
    #[error("could not decode response: {0}")]
    Decode(String),
}

impl From<gloo_net::Error> for ApiError {
    fn from(err: gloo_net::Error) -> Self {
        ApiError::Network(err.to_string())
    }
}

fn url(path: &str) -> String {
    format!("{}{}", config::api_base(), path)
}

async fn ok_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    if !response.ok() {
        return Err(ApiError::Http(response.status()));
    }
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

async fn ok_empty(response: Response) -> Result<(), ApiError> {
    if !response.ok() {
        return Err(ApiError::Http(response.status()));
    }
    Ok(())
}

// ---- queries ----

pub async fn fetch_queries(email: Option<&str>) -> Result<Vec<Query>, ApiError> {
    let path = match email {
        Some(email) => format!("/queries?email={}", urlencoding::encode(email)),
        None => "/queries".to_string(),
    };
    ok_json(Request::get(&url(&path)).send().await?).await
}

pub async fn fetch_recent_queries(limit: usize) -> Result<Vec<Query>, ApiError> {
    ok_json(
        Request::get(&url(&format!("/queries/recents?limit={limit}")))
            .send()
            .await?,
    )
    .await
}

pub async fn fetch_query(id: &str) -> Result<Query, ApiError> {
    ok_json(Request::get(&url(&format!("/queries/{id}"))).send().await?).await
}

pub async fn create_query(query: &Query) -> Result<InsertedId, ApiError> {
    ok_json(Request::post(&url("/queries")).json(query)?.send().await?).await
}

pub async fn update_query(id: &str, query: &Query) -> Result<(), ApiError> {
    ok_empty(
        Request::put(&url(&format!("/queries/{id}")))
            .json(query)?
            .send()
            .await?,
    )
    .await
}

pub async fn delete_query(id: &str) -> Result<(), ApiError> {
    ok_empty(Request::delete(&url(&format!("/queries/{id}"))).send().await?).await
}

#[derive(Serialize)]
struct CountDelta {
    delta: i64,
}

/// Adjusts a query's recommendation counter by `delta` (±1).
pub async fn adjust_recommendation_count(id: &str, delta: i64) -> Result<(), ApiError> {
    ok_empty(
        Request::patch(&url(&format!("/queries/{id}/recommendation-count")))
            .json(&CountDelta { delta })?
            .send()
            .await?,
    )
    .await
}

// ---- recommendations ----

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct InsertedId {
    pub inserted_id: String,
}

pub async fn fetch_all_recommendations() -> Result<Vec<Recommendation>, ApiError> {
    ok_json(Request::get(&url("/recommendations")).send().await?).await
}

pub async fn fetch_recommendations_for_query(query_id: &str) -> Result<Vec<Recommendation>, ApiError> {
    ok_json(
        Request::get(&url(&format!(
            "/recommendations?queryId={}",
            urlencoding::encode(query_id)
        )))
        .send()
        .await?,
    )
    .await
}

/// Recommendations other users left on the given user's queries.
pub async fn fetch_recommendations_for_me(email: &str) -> Result<Vec<Recommendation>, ApiError> {
    ok_json(
        Request::get(&url(&format!(
            "/recommendations/for-me?email={}",
            urlencoding::encode(email)
        )))
        .send()
        .await?,
    )
    .await
}

pub async fn fetch_my_recommendations(email: &str) -> Result<Vec<Recommendation>, ApiError> {
    ok_json(
        Request::get(&url(&format!(
            "/recommendations?recommenderEmail={}",
            urlencoding::encode(email)
        )))
        .send()
        .await?,
    )
    .await
}

pub async fn create_recommendation(rec: &Recommendation) -> Result<InsertedId, ApiError> {
    ok_json(
        Request::post(&url("/recommendations"))
            .json(rec)?
            .send()
            .await?,
    )
    .await
}

pub async fn delete_recommendation(id: &str) -> Result<(), ApiError> {
    ok_empty(
        Request::delete(&url(&format!("/recommendations/{id}")))
            .send()
            .await?,
    )
    .await
}

#[derive(Serialize)]
struct LikeBody<'a> {
    email: &'a str,
}

/// The server toggles: present emails are removed, absent ones added.
pub async fn toggle_like(id: &str, email: &str) -> Result<(), ApiError> {
    ok_empty(
        Request::patch(&url(&format!("/recommendations/{id}/like")))
            .json(&LikeBody { email })?
            .send()
            .await?,
    )
    .await
}

// ---- comments ----

pub async fn create_comment(rec_id: &str, comment: &Comment) -> Result<InsertedId, ApiError> {
    ok_json(
        Request::post(&url(&format!("/recommendations/{rec_id}/comments")))
            .json(comment)?
            .send()
            .await?,
    )
    .await
}

pub async fn update_comment(rec_id: &str, comment_id: &str, comment: &Comment) -> Result<(), ApiError> {
    ok_empty(
        Request::patch(&url(&format!(
            "/recommendations/{rec_id}/comments/{comment_id}"
        )))
        .json(comment)?
        .send()
        .await?,
    )
    .await
}

pub async fn delete_comment(rec_id: &str, comment_id: &str) -> Result<(), ApiError> {
    ok_empty(
        Request::delete(&url(&format!(
            "/recommendations/{rec_id}/comments/{comment_id}"
        )))
        .send()
        .await?,
    )
    .await
}

// ---- reviews ----

pub async fn create_review(review: &Review) -> Result<InsertedId, ApiError> {
    ok_json(Request::post(&url("/reviews")).json(review)?.send().await?).await
}

pub async fn fetch_reviews_for_recommendation(rec_id: &str) -> Result<Vec<Review>, ApiError> {
    ok_json(
        Request::get(&url(&format!("/reviews/by-recommendation/{rec_id}")))
            .send()
            .await?,
    )
    .await
}

pub async fn fetch_all_reviews() -> Result<Vec<Review>, ApiError> {
    ok_json(Request::get(&url("/reviews")).send().await?).await
}

// ---- users ----

pub async fn fetch_profile(email: &str, token: &str) -> Result<UserProfile, ApiError> {
    ok_json(
        Request::get(&url(&format!("/users?email={}", urlencoding::encode(email))))
            .header("authorization", &format!("Bearer {token}"))
            .send()
            .await?,
    )
    .await
}

pub async fn upsert_profile(profile: &UserProfile, token: &str) -> Result<(), ApiError> {
    ok_empty(
        Request::put(&url("/users"))
            .header("authorization", &format!("Bearer {token}"))
            .json(profile)?
            .send()
            .await?,
    )
    .await
}

// ---- misc ----

pub async fn fetch_stats() -> Result<SiteStats, ApiError> {
    ok_json(Request::get(&url("/stats")).send().await?).await
}

#[derive(Serialize)]
struct SubscribeBody<'a> {
    email: &'a str,
}

#[derive(Deserialize, Debug, Clone)]
pub struct SubscribeResponse {
    #[serde(default)]
    pub message: String,
}

pub async fn subscribe_newsletter(email: &str) -> Result<SubscribeResponse, ApiError> {
    ok_json(
        Request::post(&url("/subscribe"))
            .json(&SubscribeBody { email })?
            .send()
            .await?,
    )
    .await
}
