//! HTTP client for the trend suggestion and analysis service.

use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument};

use trendlens_core::product::Product;
use trendlens_core::state::AnalysisInputs;

use crate::protocol::*;

/// Client for the trend service API.
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    /// Build a client. Without a timeout, requests wait as long as the transport allows.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Self {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().unwrap_or_else(|_| Client::new());
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Ask the service for trend phrases suited to a product.
    /// Returns the raw `suggested_trends` list.
    #[instrument(skip(self, product), fields(product_id = product.id))]
    pub async fn suggest_trends(
        &self,
        product: Product,
        trend_duration: u32,
    ) -> anyhow::Result<Vec<String>> {
        let url = format!("{}/api/suggest_trends", self.base_url);
        let req = SuggestTrendsRequest {
            product_details: product,
            trend_duration,
        };
        let resp = self.client.post(&url).json(&req).send().await?;
        let result: SuggestTrendsResponse = resp.error_for_status()?.json().await?;
        debug!("Received {} suggestion entries", result.suggested_trends.len());
        Ok(result.suggested_trends)
    }

    /// Run the trend analysis for the given queries, links and reviews.
    #[instrument(skip(self, inputs))]
    pub async fn run_trend_analysis(
        &self,
        inputs: AnalysisInputs,
    ) -> anyhow::Result<RunTrendAnalysisResponse> {
        let url = format!("{}/api/run_trend_analysis", self.base_url);
        let req = RunTrendAnalysisRequest::from(inputs);
        debug!(
            trends = req.trend_descriptions.len(),
            links = req.website_links.len(),
            reviews = req.customer_reviews.len(),
            "Requesting trend analysis"
        );
        let resp = self.client.post(&url).json(&req).send().await?;
        let result: RunTrendAnalysisResponse = resp.error_for_status()?.json().await?;
        debug!("Report is {} bytes", result.report.len());
        Ok(result)
    }
}
