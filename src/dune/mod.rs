//! Dune Analytics client.
//!
//! Only the "latest result" endpoint is used: the dashboard reads whatever the
//! query's last materialized execution produced and never triggers a run.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::config::DuneConfig;
use crate::error::UpstreamError;

/// Source of materialized query results.
#[async_trait]
pub trait QueryClient: Send + Sync {
    /// Latest result of `query_id`, as the provider returned it.
    async fn fetch_latest(&self, query_id: u64) -> Result<Value, UpstreamError>;
}

#[derive(Debug, Deserialize)]
struct DuneErrorBody {
    error: String,
}

pub struct DuneClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl DuneClient {
    pub fn new(config: &DuneConfig) -> Result<Self, UpstreamError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn results_url(&self, query_id: u64) -> String {
        format!("{}/query/{}/results", self.base_url, query_id)
    }
}

#[async_trait]
impl QueryClient for DuneClient {
    async fn fetch_latest(&self, query_id: u64) -> Result<Value, UpstreamError> {
        info!("fetching latest result for Dune query {}", query_id);

        let response = self
            .client
            .get(self.results_url(query_id))
            .header("X-Dune-API-Key", &self.api_key)
            .header("User-Agent", "MemecoinMonitor/1.0")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<DuneErrorBody>(&body)
                .map(|b| b.error)
                .unwrap_or_else(|_| format!("Dune request failed: {}", status));
            return Err(UpstreamError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let value: Value = serde_json::from_str(&body)?;
        debug!("Dune query {} returned {} bytes", query_id, body.len());
        Ok(value)
    }
}

/// The `result` object (`rows` + `metadata`) of a latest-result response.
///
/// `None` when the execution has not materialized rows yet, e.g. a pending or
/// failed query state.
pub fn result_set(response: &Value) -> Option<&Value> {
    response
        .get("result")
        .filter(|result| result.get("rows").map_or(false, Value::is_array))
}
