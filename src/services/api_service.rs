use crate::{
    api::{routes::create_router, ApiState},
    cache::CacheStore,
    config::{Config, LocalDataSwitch},
    dune::DuneClient,
    services::{DataFetcher, QueryService},
};
use anyhow::Result;
use std::sync::Arc;
use tracing::info;

pub struct ApiService {
    config: Config,
    queries: Arc<QueryService>,
}

impl ApiService {
    pub fn new(config: Config) -> Result<Self> {
        let client = Arc::new(DuneClient::new(&config.dune)?);
        let cache = CacheStore::new(config.cache.data_dir.clone());
        let local_data = LocalDataSwitch::new(config.cache.use_local_data);

        let fetcher = DataFetcher::new(client, cache, local_data);
        let queries = Arc::new(QueryService::new(
            fetcher,
            config.tokens.supported.iter().cloned(),
        ));

        Ok(Self { config, queries })
    }

    pub fn state(&self) -> ApiState {
        ApiState::new(Arc::clone(&self.queries))
    }

    pub async fn start(&self) -> Result<()> {
        info!("🚀 Starting API service...");
        info!(
            "local data mode: {}, cache directory: {}",
            self.config.cache.use_local_data,
            self.config.cache.data_dir.display()
        );

        let app = create_router(self.state());
        let listener = tokio::net::TcpListener::bind(format!(
            "{}:{}",
            self.config.server.host, self.config.server.port
        ))
        .await?;

        info!(
            "API Server starting on {}:{}",
            self.config.server.host, self.config.server.port
        );
        axum::serve(listener, app).await?;

        Ok(())
    }
}
