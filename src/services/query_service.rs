use std::collections::HashSet;

use serde_json::Value;
use tracing::debug;

use super::fetcher::DataFetcher;
use crate::analysis::{price, risk};
use crate::error::QueryError;
use crate::types::{ApiResponse, Operation, PriceDataReport, RiskyTokensReport};

const NO_DUNE_DATA: &str = "No data returned from Dune query";
const NO_PRICE_DATA: &str = "No price data available";

/// Named dashboard operations.
///
/// Every method resolves to an [`ApiResponse`]; nothing here returns an error
/// to the caller.
pub struct QueryService {
    fetcher: DataFetcher,
    supported_tokens: HashSet<String>,
}

impl QueryService {
    pub fn new<I, S>(fetcher: DataFetcher, supported_tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fetcher,
            supported_tokens: supported_tokens.into_iter().map(Into::into).collect(),
        }
    }

    pub fn fetcher(&self) -> &DataFetcher {
        &self.fetcher
    }

    pub fn is_supported_token(&self, token_id: &str) -> bool {
        self.supported_tokens.contains(token_id)
    }

    // Dashboard

    pub async fn get_global_stats(&self) -> ApiResponse {
        self.fetcher.fetch(Operation::GlobalStats).await
    }

    pub async fn get_graduated_tokens(&self) -> ApiResponse {
        self.fetcher.fetch(Operation::GraduatedTokens).await
    }

    pub async fn get_24h_volume(&self) -> ApiResponse {
        self.fetcher.fetch(Operation::Volume24h).await
    }

    pub async fn get_top_launches(&self) -> ApiResponse {
        self.fetcher.fetch(Operation::TopLaunches).await
    }

    pub async fn get_volume_brackets(&self) -> ApiResponse {
        self.fetcher.fetch(Operation::VolumeBrackets).await
    }

    pub async fn get_chart_data(&self) -> ApiResponse {
        self.fetcher.fetch(Operation::ChartData).await
    }

    // Analysis

    pub async fn get_risky_tokens(&self) -> ApiResponse<RiskyTokensReport> {
        self.risky_tokens().await.into()
    }

    async fn risky_tokens(&self) -> Result<RiskyTokensReport, QueryError> {
        let data = self.fetch(Operation::RiskyTokens).await?;
        let rows = rows_of(&data).ok_or(QueryError::MalformedData(NO_DUNE_DATA))?;

        let risky = risk::classify(rows);
        debug!("{} of {} tokens flagged as risky", risky.len(), rows.len());
        Ok(RiskyTokensReport::new(risky))
    }

    pub async fn get_token_volume(&self, token_id: &str) -> ApiResponse {
        self.token_scoped(Operation::TokenVolume, token_id).await.into()
    }

    // Token

    pub async fn get_token_info(&self, token_id: &str) -> ApiResponse {
        self.token_scoped(Operation::TokenInfo, token_id).await.into()
    }

    pub async fn get_top_holders(&self, token_id: &str) -> ApiResponse {
        self.token_scoped(Operation::TopHolders, token_id).await.into()
    }

    pub async fn get_price_data(&self, token_id: &str) -> ApiResponse<PriceDataReport> {
        self.price_data(token_id).await.into()
    }

    async fn price_data(&self, token_id: &str) -> Result<PriceDataReport, QueryError> {
        let data = self.token_scoped(Operation::PriceData, token_id).await?;
        let rows = rows_of(&data).ok_or(QueryError::MalformedData(NO_PRICE_DATA))?;
        Ok(price::build_report(rows.clone()))
    }

    async fn token_scoped(&self, operation: Operation, token_id: &str) -> Result<Value, QueryError> {
        self.check_token(operation, token_id)?;
        self.fetch(operation).await
    }

    fn check_token(&self, operation: Operation, token_id: &str) -> Result<(), QueryError> {
        match operation.unsupported_token_message() {
            Some(message) if !self.is_supported_token(token_id) => {
                debug!("{} rejected unsupported token {}", operation, token_id);
                Err(QueryError::UnsupportedToken(message))
            }
            _ => Ok(()),
        }
    }

    async fn fetch(&self, operation: Operation) -> Result<Value, QueryError> {
        match self.fetcher.fetch(operation).await {
            ApiResponse::Success(data) => Ok(data),
            ApiResponse::Error(message) => Err(QueryError::Failed(message)),
        }
    }
}

fn rows_of(data: &Value) -> Option<&Vec<Value>> {
    data.get("rows").and_then(Value::as_array)
}
