//! Request and response types for the trend suggestion and analysis endpoints.
//! Field names follow the service's JSON exactly.

use serde::{Deserialize, Serialize};

use trendlens_core::product::{Product, Review};
use trendlens_core::state::AnalysisInputs;

// ── Suggest Trends ──────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct SuggestTrendsRequest {
    #[serde(rename = "productDetails")]
    pub product_details: Product,
    #[serde(rename = "trendDuration")]
    pub trend_duration: u32,
}

#[derive(Debug, Deserialize)]
pub struct SuggestTrendsResponse {
    #[serde(default)]
    pub suggested_trends: Vec<String>,
}

// ── Trend Analysis ──────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct RunTrendAnalysisRequest {
    pub trend_descriptions: Vec<String>,
    pub website_links: Vec<String>,
    pub customer_reviews: Vec<Review>,
}

impl From<AnalysisInputs> for RunTrendAnalysisRequest {
    fn from(inputs: AnalysisInputs) -> Self {
        Self {
            trend_descriptions: inputs.trend_descriptions,
            website_links: inputs.website_links,
            customer_reviews: inputs.customer_reviews,
        }
    }
}

/// `structured_data` is kept as raw JSON; the service sometimes sends a
/// string instead of a list, which is rejected later when building the chart.
#[derive(Debug, Clone, Deserialize)]
pub struct RunTrendAnalysisResponse {
    #[serde(default)]
    pub report: String,
    #[serde(default)]
    pub structured_data: serde_json::Value,
}
