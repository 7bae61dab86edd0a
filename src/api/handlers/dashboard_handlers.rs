use super::super::ApiState;
use crate::types::ApiResponse;
use axum::extract::State;

pub async fn get_global_stats(State(state): State<ApiState>) -> ApiResponse {
    state.queries.get_global_stats().await
}

pub async fn get_graduated_tokens(State(state): State<ApiState>) -> ApiResponse {
    state.queries.get_graduated_tokens().await
}

pub async fn get_24h_volume(State(state): State<ApiState>) -> ApiResponse {
    state.queries.get_24h_volume().await
}

pub async fn get_top_launches(State(state): State<ApiState>) -> ApiResponse {
    state.queries.get_top_launches().await
}

pub async fn get_volume_brackets(State(state): State<ApiState>) -> ApiResponse {
    state.queries.get_volume_brackets().await
}

pub async fn get_chart_data(State(state): State<ApiState>) -> ApiResponse {
    state.queries.get_chart_data().await
}
