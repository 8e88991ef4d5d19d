use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, warn};

/// What a cache entry holds. Each key maps to one JSON file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheKey {
    Campsite(u32),
    Comments(u32),
}

impl CacheKey {
    fn file_name(self) -> String {
        match self {
            CacheKey::Campsite(id) => format!("campsite_{id}.json"),
            CacheKey::Comments(id) => format!("comments_{id}.json"),
        }
    }
}

/// Disk cache of store responses, keyed per campsite, expiring after `ttl_secs`.
#[derive(Debug, Clone)]
pub struct CacheStore {
    dir: PathBuf,
    ttl_secs: u64,
}

#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry<T> {
    stored_at: chrono::DateTime<chrono::Utc>,
    data: T,
}

impl CacheStore {
    pub fn new(dir: PathBuf, ttl_secs: u64) -> Self {
        Self { dir, ttl_secs }
    }

    fn path_for(&self, key: CacheKey) -> PathBuf {
        self.dir.join(key.file_name())
    }

    pub fn get<T: for<'de> Deserialize<'de>>(&self, key: CacheKey) -> Option<T> {
        let path = self.path_for(key);
        let content = std::fs::read_to_string(&path).ok()?;

        let entry: CacheEntry<T> = match serde_json::from_str(&content) {
            Ok(e) => e,
            Err(e) => {
                warn!(?key, error = %e, "Discarding unreadable cache entry");
                return None;
            }
        };

        let age = chrono::Utc::now()
            .signed_duration_since(entry.stored_at)
            .num_seconds();

        if age < 0 || age as u64 > self.ttl_secs {
            debug!(?key, age, "Cache entry expired");
            return None;
        }

        debug!(?key, age, "Cache hit");
        Some(entry.data)
    }

    pub fn set<T: Serialize>(&self, key: CacheKey, data: &T) -> Result<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create cache directory: {}", self.dir.display()))?;

        let entry = CacheEntry {
            stored_at: chrono::Utc::now(),
            data,
        };

        let content = serde_json::to_string(&entry).context("Failed to serialize cache entry")?;
        let path = self.path_for(key);
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write cache file: {}", path.display()))?;

        debug!(?key, "Cache set");
        Ok(())
    }

    pub fn invalidate(&self, key: CacheKey) -> Result<()> {
        let path = self.path_for(key);
        if path.exists() {
            std::fs::remove_file(&path)
                .with_context(|| format!("Failed to remove cache file: {}", path.display()))?;
            debug!(?key, "Cache invalidated");
        }
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        if !self.dir.exists() {
            return Ok(());
        }
        let entries = std::fs::read_dir(&self.dir)
            .with_context(|| format!("Failed to read cache directory: {}", self.dir.display()))?;
        for entry in entries {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                std::fs::remove_file(&path)
                    .with_context(|| format!("Failed to remove cache file: {}", path.display()))?;
            }
        }
        debug!(dir = %self.dir.display(), "Cache cleared");
        Ok(())
    }
}
