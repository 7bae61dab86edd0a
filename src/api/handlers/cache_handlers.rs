use super::super::ApiState;
use crate::types::{ApiResponse, CacheMode, Operation};
use axum::{
    extract::{Path, State},
    response::Json,
};
use serde_json::{json, Value};
use tracing::{error, info};

pub async fn get_cache_mode(State(state): State<ApiState>) -> ApiResponse<CacheMode> {
    ApiResponse::success(CacheMode {
        use_local_data: state.local_data().is_enabled(),
    })
}

pub async fn set_cache_mode(
    State(state): State<ApiState>,
    Json(payload): Json<CacheMode>,
) -> ApiResponse<CacheMode> {
    state.local_data().set(payload.use_local_data);
    info!("local data mode set to {}", payload.use_local_data);
    ApiResponse::success(payload)
}

pub async fn clear_cache_entry(
    Path(operation): Path<String>,
    State(state): State<ApiState>,
) -> ApiResponse<Value> {
    let operation: Operation = match operation.parse() {
        Ok(op) => op,
        Err(message) => return ApiResponse::error(message),
    };

    match state.cache().remove(operation.name()).await {
        Ok(removed) => ApiResponse::success(json!({
            "operation": operation.name(),
            "removed": removed,
        })),
        Err(e) => {
            error!("Failed to clear cache for {}: {:#}", operation, e);
            ApiResponse::error(format!("Failed to clear cache for {}", operation))
        }
    }
}
