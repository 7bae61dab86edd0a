pub mod handlers;
pub mod routes;

use std::sync::Arc;

use crate::cache::CacheStore;
use crate::config::LocalDataSwitch;
use crate::services::QueryService;

#[derive(Clone)]
pub struct ApiState {
    pub queries: Arc<QueryService>,
}

impl ApiState {
    pub fn new(queries: Arc<QueryService>) -> Self {
        Self { queries }
    }

    pub fn cache(&self) -> &CacheStore {
        self.queries.fetcher().cache()
    }

    pub fn local_data(&self) -> &LocalDataSwitch {
        self.queries.fetcher().local_data()
    }
}
