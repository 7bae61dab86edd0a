pub mod api_service;
pub mod fetcher;
pub mod query_service;

pub use api_service::ApiService;
pub use fetcher::DataFetcher;
pub use query_service::QueryService;
