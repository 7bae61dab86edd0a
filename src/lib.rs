pub mod analysis;
pub mod api;
pub mod cache;
pub mod config;
pub mod dune;
pub mod error;
pub mod services;
pub mod types;

pub use config::Config;
pub use error::{QueryError, UpstreamError};
pub use types::*;
