use super::super::ApiState;
use crate::types::{ApiResponse, PriceDataReport, TokenQuery};
use axum::extract::{Query, State};

pub async fn get_token_info(
    Query(params): Query<TokenQuery>,
    State(state): State<ApiState>,
) -> ApiResponse {
    state.queries.get_token_info(&params.token_id).await
}

pub async fn get_top_holders(
    Query(params): Query<TokenQuery>,
    State(state): State<ApiState>,
) -> ApiResponse {
    state.queries.get_top_holders(&params.token_id).await
}

pub async fn get_price_data(
    Query(params): Query<TokenQuery>,
    State(state): State<ApiState>,
) -> ApiResponse<PriceDataReport> {
    state.queries.get_price_data(&params.token_id).await
}
