pub mod analysis_handlers;
pub mod cache_handlers;
pub mod dashboard_handlers;
pub mod token_handlers;

pub use analysis_handlers::*;
pub use cache_handlers::*;
pub use dashboard_handlers::*;
pub use token_handlers::*;

use axum::response::Json;
use serde_json::{json, Value};

pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Memecoin monitor API is running" }))
}
