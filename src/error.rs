//! Error types for upstream access and query operations.
//!
//! Every variant ends up as the `error` string of an [`ApiResponse`](crate::types::ApiResponse);
//! nothing here is allowed to escape to the transport layer.

use thiserror::Error;

/// Failures talking to the analytics provider.
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// Transport-level failure (connect, TLS, body read)
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    /// Provider answered with a non-success status
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Provider answered 2xx with a body that is not JSON
    #[error("Failed to decode Dune response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Anything raised by a non-HTTP client
    #[error("{0}")]
    Other(String),
}

/// Errors surfaced by a named query operation.
#[derive(Error, Debug)]
pub enum QueryError {
    /// Token id outside the configured allow-list
    #[error("{0}")]
    UnsupportedToken(&'static str),

    /// Upstream succeeded but the payload lacks the expected fields
    #[error("{0}")]
    MalformedData(&'static str),

    /// Upstream failure, already reduced to the message shown to the caller
    #[error("{0}")]
    Failed(String),
}
