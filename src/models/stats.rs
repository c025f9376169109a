use serde::{Deserialize, Serialize};

/// Aggregate platform numbers for the home-page stats strip.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SiteStats {
    #[serde(default)]
    pub total_queries: u64,
    #[serde(default)]
    pub total_recommendations: u64,
    #[serde(default)]
    pub unique_users: u64,
    #[serde(default)]
    pub average_recommendations: f64,
}
