//! File-backed response cache.
//!
//! One pretty-printed JSON file per operation name under the data directory.
//! Entries never expire; a slot changes only when it is overwritten by a fresh
//! upstream result or deleted.

use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::types::ApiResponse;

#[derive(Debug, Clone)]
pub struct CacheStore {
    dir: PathBuf,
}

impl CacheStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, operation: &str) -> PathBuf {
        self.dir.join(format!("{}.json", operation))
    }

    /// Last stored envelope for `operation`. Missing or unreadable files are
    /// reported as absent.
    pub async fn read(&self, operation: &str) -> Option<ApiResponse> {
        let path = self.path_for(operation);
        let raw = match tokio::fs::read(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("no cache entry for {}", operation);
                return None;
            }
            Err(e) => {
                warn!("failed to read cache file {}: {}", path.display(), e);
                return None;
            }
        };

        match serde_json::from_slice(&raw) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("ignoring corrupt cache file {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Overwrite the slot for `operation`, creating the directory if needed.
    pub async fn write(&self, operation: &str, entry: &ApiResponse) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("creating cache directory {}", self.dir.display()))?;

        let path = self.path_for(operation);
        let body = serde_json::to_vec_pretty(entry)?;
        tokio::fs::write(&path, body)
            .await
            .with_context(|| format!("writing cache file {}", path.display()))?;

        debug!("cached {} at {}", operation, path.display());
        Ok(())
    }

    /// Drop the slot for `operation`. Returns whether an entry existed.
    pub async fn remove(&self, operation: &str) -> Result<bool> {
        let path = self.path_for(operation);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e).with_context(|| format!("removing cache file {}", path.display())),
        }
    }
}
