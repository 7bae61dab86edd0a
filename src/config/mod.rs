use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Token the dashboard ships with; every token-scoped query is limited to it by default.
pub const DEFAULT_SUPPORTED_TOKEN: &str = "DitHyRMQiSDhn5cnKMJV2CDDt6sVct96YrECiM49pump";

pub const DEFAULT_DUNE_API_URL: &str = "https://api.dune.com/api/v1";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub dune: DuneConfig,
    pub cache: CacheConfig,
    pub tokens: TokenConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DuneConfig {
    pub api_key: String,
    pub base_url: String,
    /// Unset leaves the transport default in place.
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    pub use_local_data: bool,
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenConfig {
    pub supported: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            supported: vec![DEFAULT_SUPPORTED_TOKEN.to_string()],
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let _ = dotenv::dotenv().ok();

        if std::env::var("DUNE_API_KEY").is_err() {
            Self::print_config_help();
            return Err(anyhow::anyhow!("missing DUNE_API_KEY"));
        }

        Ok(Config {
            dune: DuneConfig {
                api_key: required_env_var("DUNE_API_KEY")?,
                base_url: env_var_or_default("DUNE_API_URL", DEFAULT_DUNE_API_URL.to_string())?,
                timeout_secs: optional_env_var("DUNE_TIMEOUT_SECS")?,
            },
            cache: CacheConfig {
                use_local_data: std::env::var("USE_LOCAL_DATA")
                    .map(|v| is_local_data_enabled(&v))
                    .unwrap_or(false),
                data_dir: env_var_or_default("DATA_DIR", PathBuf::from("data"))?,
            },
            tokens: match std::env::var("SUPPORTED_TOKENS") {
                Ok(raw) => TokenConfig {
                    supported: parse_token_list(&raw),
                },
                Err(_) => TokenConfig::default(),
            },
            server: ServerConfig {
                host: env_var_or_default("SERVER_HOST", "0.0.0.0".to_string())?,
                port: env_var_or_default("SERVER_PORT", 3003)?,
            },
        })
    }

    fn print_config_help() {
        println!("\n🔧 Configuration");
        println!("{}", "=".repeat(50));
        println!("Set the following environment variables:\n");

        println!("[required]");
        println!("DUNE_API_KEY=<your dune api key>\n");

        println!("[optional]");
        println!("DUNE_API_URL={}", DEFAULT_DUNE_API_URL);
        println!("DUNE_TIMEOUT_SECS=30");
        println!("USE_LOCAL_DATA=false");
        println!("DATA_DIR=data");
        println!("SUPPORTED_TOKENS={}", DEFAULT_SUPPORTED_TOKEN);
        println!("SERVER_HOST=0.0.0.0");
        println!("SERVER_PORT=3003\n");

        println!("{}", "=".repeat(50));
    }
}

/// Shared cache-first switch.
///
/// Cloned into every component that needs it; the flag is read on each call so
/// flipping it takes effect on the next request.
#[derive(Debug, Clone, Default)]
pub struct LocalDataSwitch(Arc<AtomicBool>);

impl LocalDataSwitch {
    pub fn new(enabled: bool) -> Self {
        Self(Arc::new(AtomicBool::new(enabled)))
    }

    pub fn is_enabled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    pub fn set(&self, enabled: bool) {
        self.0.store(enabled, Ordering::Relaxed);
    }
}

/// Only the literal `true` turns cache-first mode on.
pub fn is_local_data_enabled(raw: &str) -> bool {
    raw == "true"
}

pub fn parse_token_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn env_var_or_default<T: std::str::FromStr>(key: &str, default: T) -> anyhow::Result<T>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(val) => val
            .parse()
            .map_err(|e| anyhow::anyhow!("failed to parse {}: {}", key, e)),
        Err(_) => Ok(default),
    }
}

fn optional_env_var<T: std::str::FromStr>(key: &str) -> anyhow::Result<Option<T>>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(val) => val
            .parse()
            .map(Some)
            .map_err(|e| anyhow::anyhow!("failed to parse {}: {}", key, e)),
        Err(_) => Ok(None),
    }
}

fn required_env_var(key: &str) -> anyhow::Result<String> {
    std::env::var(key).map_err(|_| anyhow::anyhow!("missing required setting: {}", key))
}
