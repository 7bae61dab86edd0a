use super::super::ApiState;
use crate::types::{ApiResponse, RiskyTokensReport, TokenQuery};
use axum::extract::{Query, State};

pub async fn get_risky_tokens(State(state): State<ApiState>) -> ApiResponse<RiskyTokensReport> {
    state.queries.get_risky_tokens().await
}

pub async fn get_token_volume(
    Query(params): Query<TokenQuery>,
    State(state): State<ApiState>,
) -> ApiResponse {
    state.queries.get_token_volume(&params.token_id).await
}
