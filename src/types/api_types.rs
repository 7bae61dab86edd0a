use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::de::{self, Deserializer};
use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::QueryError;

/// Uniform result of every query operation.
///
/// Serialises as `{"success": true, "data": ...}` or
/// `{"success": false, "error": "..."}` and never anything in between.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse<T = Value> {
    Success(T),
    Error(String),
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        ApiResponse::Success(data)
    }

    pub fn error(message: impl Into<String>) -> Self {
        ApiResponse::Error(message.into())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ApiResponse::Success(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            ApiResponse::Success(data) => Some(data),
            ApiResponse::Error(_) => None,
        }
    }
}

impl<T> From<Result<T, QueryError>> for ApiResponse<T> {
    fn from(result: Result<T, QueryError>) -> Self {
        match result {
            Ok(data) => ApiResponse::Success(data),
            Err(e) => ApiResponse::Error(e.to_string()),
        }
    }
}

impl<T: Serialize> Serialize for ApiResponse<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ApiResponse", 2)?;
        match self {
            ApiResponse::Success(data) => {
                state.serialize_field("success", &true)?;
                state.serialize_field("data", data)?;
            }
            ApiResponse::Error(message) => {
                state.serialize_field("success", &false)?;
                state.serialize_field("error", message)?;
            }
        }
        state.end()
    }
}

#[derive(Deserialize)]
struct RawEnvelope {
    success: bool,
    #[serde(default)]
    data: Value,
    error: Option<String>,
}

/// Cached envelopes are stored as untyped JSON, so only the `Value` form is readable back.
impl<'de> Deserialize<'de> for ApiResponse<Value> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawEnvelope::deserialize(deserializer)?;
        match (raw.success, raw.error) {
            (true, None) => Ok(ApiResponse::Success(raw.data)),
            (false, Some(error)) if raw.data.is_null() => Ok(ApiResponse::Error(error)),
            _ => Err(de::Error::custom("ambiguous response envelope")),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[derive(Debug, Deserialize)]
pub struct TokenQuery {
    #[serde(rename = "tokenId")]
    pub token_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheMode {
    pub use_local_data: bool,
}
