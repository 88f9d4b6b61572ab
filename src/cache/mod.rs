//! Single-file snapshot cache.
//!
//! The whole [`CacheSnapshot`] is written as one JSON document and reused
//! while the file's modification time is younger than the TTL. There is no
//! locking: the last writer wins.

pub mod models;

pub use models::{CacheSnapshot, LeagueGroup, MatchStatus, MatchView};

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tracing::{debug, warn};

use crate::error::CacheError;

#[derive(Debug, Clone)]
pub struct CacheStore {
    path: PathBuf,
    ttl: Duration,
}

impl CacheStore {
    pub fn new(path: impl Into<PathBuf>, ttl: Duration) -> Self {
        CacheStore {
            path: path.into(),
            ttl,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// True when the cache file exists and was modified less than `ttl` ago.
    /// A missing or unreadable file is simply not valid.
    pub async fn is_valid(&self) -> bool {
        let modified = match tokio::fs::metadata(&self.path).await.and_then(|m| m.modified()) {
            Ok(t) => t,
            Err(e) => {
                debug!("Cache file {} unavailable: {}", self.path.display(), e);
                return false;
            }
        };
        let age = age_of(modified, SystemTime::now());
        let valid = age < self.ttl;
        debug!(
            "Cache age: {:.1}s, valid: {} (limit: {}s)",
            age.as_secs_f64(),
            valid,
            self.ttl.as_secs()
        );
        valid
    }

    /// Read the cached snapshot. Read and parse failures are logged and
    /// reported as `None`.
    pub async fn load(&self) -> Option<CacheSnapshot> {
        match self.read().await {
            Ok(snapshot) => {
                debug!("Loaded snapshot from {}", self.path.display());
                Some(snapshot)
            }
            Err(e) => {
                warn!("Failed to load cache: {}", e);
                None
            }
        }
    }

    /// Overwrite the cache file. Failures are logged, never returned: the
    /// caller already has the fresh snapshot.
    pub async fn save(&self, snapshot: &CacheSnapshot) {
        match self.write(snapshot).await {
            Ok(()) => debug!("Saved snapshot to {}", self.path.display()),
            Err(e) => warn!("Failed to save cache: {}", e),
        }
    }

    async fn read(&self) -> Result<CacheSnapshot, CacheError> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|source| CacheError::Io {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_slice(&bytes).map_err(|source| CacheError::Json {
            path: self.path.clone(),
            source,
        })
    }

    async fn write(&self, snapshot: &CacheSnapshot) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(snapshot).map_err(|source| CacheError::Json {
            path: self.path.clone(),
            source,
        })?;
        let io_err = |source| CacheError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
        }
        tokio::fs::write(&self.path, bytes).await.map_err(io_err)
    }
}

/// Time elapsed since `modified`. A modification time in the future counts
/// as age zero.
fn age_of(modified: SystemTime, now: SystemTime) -> Duration {
    now.duration_since(modified).unwrap_or(Duration::ZERO)
}
