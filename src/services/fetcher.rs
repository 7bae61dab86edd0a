use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::cache::CacheStore;
use crate::config::LocalDataSwitch;
use crate::dune::{result_set, QueryClient};
use crate::types::{ApiResponse, Operation, Payload};

/// Read-through cache in front of the upstream query client.
///
/// With cache-first mode on, a stored envelope short-circuits the upstream
/// call. Otherwise, or on a cache miss, the upstream is queried and a
/// successful result overwrites the operation's slot. Failures, including
/// replies without result rows, never touch the cache.
#[derive(Clone)]
pub struct DataFetcher {
    client: Arc<dyn QueryClient>,
    cache: CacheStore,
    local_data: LocalDataSwitch,
}

impl DataFetcher {
    pub fn new(client: Arc<dyn QueryClient>, cache: CacheStore, local_data: LocalDataSwitch) -> Self {
        Self {
            client,
            cache,
            local_data,
        }
    }

    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    pub fn local_data(&self) -> &LocalDataSwitch {
        &self.local_data
    }

    pub async fn fetch(&self, operation: Operation) -> ApiResponse {
        let name = operation.name();

        if self.local_data.is_enabled() {
            if let Some(entry) = self.cache.read(name).await {
                debug!("serving {} from local data", name);
                return entry;
            }
            debug!("no local data for {}, querying Dune", name);
        }

        match self.client.fetch_latest(operation.query_id()).await {
            Ok(response) => {
                let data = match operation.payload() {
                    Payload::Whole => response,
                    Payload::ResultSet => match result_set(&response) {
                        Some(result) => result.clone(),
                        None => {
                            warn!("{} returned no result rows, keeping local data", name);
                            return ApiResponse::error(operation.missing_data_error());
                        }
                    },
                };
                let envelope = ApiResponse::success(data);

                if let Err(e) = self.cache.write(name, &envelope).await {
                    warn!("failed to store {} locally: {:#}", name, e);
                }

                envelope
            }
            Err(e) => {
                error!("{} failed: {}", name, e);
                let message = e.to_string();
                if message.is_empty() {
                    ApiResponse::error(operation.fallback_error())
                } else {
                    ApiResponse::error(message)
                }
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::UpstreamError;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Scripted upstream that counts calls.
    pub(crate) struct StubClient {
        pub calls: AtomicUsize,
        pub response: Mutex<Result<Value, String>>,
    }

    impl StubClient {
        pub(crate) fn ok(response: Value) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                response: Mutex::new(Ok(response)),
            })
        }

        pub(crate) fn failing(message: &str) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                response: Mutex::new(Err(message.to_string())),
            })
        }

        pub(crate) fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl QueryClient for StubClient {
        async fn fetch_latest(&self, _query_id: u64) -> Result<Value, UpstreamError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.response
                .lock()
                .unwrap()
                .clone()
                .map_err(UpstreamError::Other)
        }
    }

    fn fetcher(client: Arc<StubClient>, dir: &TempDir, local: bool) -> DataFetcher {
        DataFetcher::new(client, CacheStore::new(dir.path()), LocalDataSwitch::new(local))
    }

    #[tokio::test]
    async fn test_cache_hit_skips_upstream() {
        let tmp = TempDir::new().unwrap();
        let stored = ApiResponse::success(json!({"rows": [{"symbol": "CACHED"}]}));
        CacheStore::new(tmp.path())
            .write("getTopLaunches", &stored)
            .await
            .unwrap();
        let client = StubClient::ok(json!({"result": {"rows": []}}));

        let result = fetcher(client.clone(), &tmp, true)
            .fetch(Operation::TopLaunches)
            .await;

        assert_eq!(client.calls(), 0);
        assert_eq!(result, stored);
    }

    #[tokio::test]
    async fn test_cache_miss_fetches_once_and_stores() {
        let tmp = TempDir::new().unwrap();
        let client = StubClient::ok(json!({"result": {"rows": [{"v": 1}]}}));
        let fetcher = fetcher(client.clone(), &tmp, true);

        let result = fetcher.fetch(Operation::VolumeBrackets).await;

        assert_eq!(client.calls(), 1);
        assert_eq!(result, ApiResponse::success(json!({"rows": [{"v": 1}]})));
        assert_eq!(fetcher.cache().read("getVolumeBrackets").await, Some(result));

        fetcher.fetch(Operation::VolumeBrackets).await;
        assert_eq!(client.calls(), 1);
    }

    #[tokio::test]
    async fn test_always_fetch_mode_ignores_and_refreshes_cache() {
        let tmp = TempDir::new().unwrap();
        let cache = CacheStore::new(tmp.path());
        cache
            .write("get24hVolume", &ApiResponse::success(json!("stale")))
            .await
            .unwrap();
        let client = StubClient::ok(json!({"result": {"rows": ["fresh"]}}));

        let result = fetcher(client.clone(), &tmp, false)
            .fetch(Operation::Volume24h)
            .await;

        assert_eq!(client.calls(), 1);
        assert_eq!(result, ApiResponse::success(json!({"rows": ["fresh"]})));
        assert_eq!(cache.read("get24hVolume").await, Some(result));
    }

    #[tokio::test]
    async fn test_failure_leaves_cache_absent() {
        let tmp = TempDir::new().unwrap();
        let client = StubClient::failing("quota exceeded");
        let fetcher = fetcher(client.clone(), &tmp, true);

        let result = fetcher.fetch(Operation::ChartData).await;

        assert_eq!(result, ApiResponse::error("quota exceeded"));
        assert!(fetcher.cache().read("getchartdata").await.is_none());
    }

    #[tokio::test]
    async fn test_failure_keeps_previous_entry() {
        let tmp = TempDir::new().unwrap();
        let previous = ApiResponse::success(json!({"rows": [1, 2]}));
        let cache = CacheStore::new(tmp.path());
        cache.write("getchartdata", &previous).await.unwrap();

        let result = fetcher(StubClient::failing("timeout"), &tmp, false)
            .fetch(Operation::ChartData)
            .await;

        assert!(!result.is_success());
        assert_eq!(cache.read("getchartdata").await, Some(previous));
    }

    #[tokio::test]
    async fn test_pending_reply_keeps_previous_entry() {
        let tmp = TempDir::new().unwrap();
        let previous = ApiResponse::success(json!({"rows": [{"symbol": "GOOD", "price_change_pct": "1500"}]}));
        let cache = CacheStore::new(tmp.path());
        cache.write("getRiskyTokens", &previous).await.unwrap();
        let client = StubClient::ok(json!({"state": "QUERY_STATE_PENDING"}));
        let fetcher = fetcher(client.clone(), &tmp, false);

        let refreshed = fetcher.fetch(Operation::RiskyTokens).await;

        assert_eq!(refreshed, ApiResponse::error("No data returned from Dune query"));
        assert_eq!(cache.read("getRiskyTokens").await, Some(previous.clone()));

        fetcher.local_data().set(true);
        assert_eq!(fetcher.fetch(Operation::RiskyTokens).await, previous);
        assert_eq!(client.calls(), 1);
    }

    #[tokio::test]
    async fn test_reply_without_rows_is_not_cached() {
        let tmp = TempDir::new().unwrap();
        let fetcher = fetcher(StubClient::ok(json!({"result": null})), &tmp, true);

        let result = fetcher.fetch(Operation::PriceData).await;

        assert_eq!(result, ApiResponse::error("No price data available"));
        assert!(fetcher.cache().read("getPriceData").await.is_none());
    }

    #[tokio::test]
    async fn test_empty_upstream_message_uses_fallback() {
        let tmp = TempDir::new().unwrap();

        let result = fetcher(StubClient::failing(""), &tmp, false)
            .fetch(Operation::PriceData)
            .await;

        assert_eq!(result, ApiResponse::error("Failed to fetch price data from Dune"));
    }

    #[tokio::test]
    async fn test_global_stats_keeps_whole_response() {
        let tmp = TempDir::new().unwrap();
        let upstream = json!({"execution_id": "01H", "result": {"rows": []}});

        let result = fetcher(StubClient::ok(upstream.clone()), &tmp, false)
            .fetch(Operation::GlobalStats)
            .await;

        assert_eq!(result, ApiResponse::success(upstream));
    }

    #[tokio::test]
    async fn test_switch_is_read_per_call() {
        let tmp = TempDir::new().unwrap();
        let client = StubClient::ok(json!({"result": {"rows": []}}));
        let fetcher = fetcher(client.clone(), &tmp, false);

        fetcher.fetch(Operation::TopLaunches).await;
        fetcher.fetch(Operation::TopLaunches).await;
        assert_eq!(client.calls(), 2);

        fetcher.local_data().set(true);
        fetcher.fetch(Operation::TopLaunches).await;
        assert_eq!(client.calls(), 2);
    }
}
