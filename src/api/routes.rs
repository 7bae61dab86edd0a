use super::{handlers, ApiState};
use axum::{
    routing::{delete, get},
    Router,
};
use tower_http::cors::CorsLayer;

pub fn create_router(state: ApiState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        // Dashboard routes
        .route("/api/dashboard/getGlobalStats", get(handlers::get_global_stats))
        .route("/api/dashboard/getGraduatedtokens", get(handlers::get_graduated_tokens))
        .route("/api/dashboard/get24hVolume", get(handlers::get_24h_volume))
        .route("/api/dashboard/getTopLaunches", get(handlers::get_top_launches))
        .route("/api/dashboard/getVolumeBrackets", get(handlers::get_volume_brackets))
        .route("/api/dashboard/getchartdata", get(handlers::get_chart_data))
        // Analysis routes
        .route("/api/analysis/getTopLaunches", get(handlers::get_top_launches))
        .route("/api/analysis/getRiskyTokens", get(handlers::get_risky_tokens))
        .route("/api/analysis/getTokenVolume", get(handlers::get_token_volume))
        // Token routes
        .route("/api/token/getTokenInfo", get(handlers::get_token_info))
        .route("/api/token/getTopHolders", get(handlers::get_top_holders))
        .route("/api/token/getPriceData", get(handlers::get_price_data))
        // Cache administration
        .route(
            "/api/cache/mode",
            get(handlers::get_cache_mode).put(handlers::set_cache_mode),
        )
        .route("/api/cache/:operation", delete(handlers::clear_cache_entry))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
