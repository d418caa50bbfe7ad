//! Persistent domain → emails cache.
//!
//! A flat JSON object mapping each domain to its resolved email list, read
//! once at startup and rewritten write-through on every mutation. The cache
//! is the only state shared across concurrent jobs; all access goes through
//! this component, which owns the persisted store exclusively.
//!
//! Persistence failures are non-fatal in both directions: a load failure
//! starts the run with an empty cache, a save failure keeps the in-memory
//! copy for the rest of the run.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::sync::Mutex;

/// Domain-keyed email cache with write-through persistence.
pub struct DomainCache {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, Vec<String>>>,
}

impl DomainCache {
    /// Loads the cache from disk, or starts empty when the file is missing
    /// or unreadable.
    pub fn load(path: &Path) -> Self {
        let entries = match std::fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str::<BTreeMap<String, Vec<String>>>(&content) {
                Ok(map) => {
                    log::info!("Loaded {} cached domains from {}", map.len(), path.display());
                    map
                }
                Err(e) => {
                    log::warn!("Error parsing cache file {}: {e}", path.display());
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                log::warn!("Error loading cache file {}: {e}", path.display());
                BTreeMap::new()
            }
        };

        DomainCache {
            path: path.to_path_buf(),
            entries: Mutex::new(entries),
        }
    }

    /// Returns the cached emails for a domain, if any.
    pub async fn get(&self, domain: &str) -> Option<Vec<String>> {
        self.entries.lock().await.get(domain).cloned()
    }

    /// Stores the emails for a domain, overwriting any prior entry, and
    /// persists the whole cache. A persistence failure is logged and the
    /// in-memory entry retained.
    pub async fn put(&self, domain: &str, emails: &BTreeSet<String>) {
        {
            let mut entries = self.entries.lock().await;
            entries.insert(domain.to_string(), emails.iter().cloned().collect());
        }
        if let Err(e) = self.flush().await {
            log::warn!("Error saving cache: {e}");
        }
    }

    /// Persists the cache to disk.
    pub async fn flush(&self) -> Result<()> {
        let serialized = {
            let entries = self.entries.lock().await;
            serde_json::to_string_pretty(&*entries).context("Failed to serialize cache")?
        };
        std::fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write cache file {}", self.path.display()))?;
        Ok(())
    }

    /// Number of cached domains.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn emails(list: &[&str]) -> BTreeSet<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_missing_file_starts_empty() {
        let dir = TempDir::new().expect("tempdir");
        let cache = DomainCache::load(&dir.path().join("cache.json"));
        assert!(cache.is_empty().await);
        assert_eq!(cache.get("example.com").await, None);
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let dir = TempDir::new().expect("tempdir");
        let cache = DomainCache::load(&dir.path().join("cache.json"));

        cache.put("example.com", &emails(&["a@example.com"])).await;
        assert_eq!(
            cache.get("example.com").await,
            Some(vec!["a@example.com".to_string()])
        );
    }

    #[tokio::test]
    async fn test_put_overwrites() {
        let dir = TempDir::new().expect("tempdir");
        let cache = DomainCache::load(&dir.path().join("cache.json"));

        cache.put("example.com", &emails(&["a@example.com"])).await;
        cache.put("example.com", &emails(&["b@example.com"])).await;

        assert_eq!(
            cache.get("example.com").await,
            Some(vec!["b@example.com".to_string()])
        );
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_roundtrip_through_disk() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("cache.json");

        {
            let cache = DomainCache::load(&path);
            cache
                .put("firma.de", &emails(&["x@firma.de", "y@firma.de"]))
                .await;
        }

        let reloaded = DomainCache::load(&path);
        assert_eq!(
            reloaded.get("firma.de").await,
            Some(vec!["x@firma.de".to_string(), "y@firma.de".to_string()])
        );
    }

    #[tokio::test]
    async fn test_corrupt_file_starts_empty() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("cache.json");
        std::fs::write(&path, "{not valid json").expect("write corrupt file");

        let cache = DomainCache::load(&path);
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_file_is_flat_json_object() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("cache.json");

        let cache = DomainCache::load(&path);
        cache.put("example.org", &emails(&["a@example.org"])).await;

        let content = std::fs::read_to_string(&path).expect("cache file written");
        let parsed: serde_json::Value = serde_json::from_str(&content).expect("valid json");
        assert_eq!(
            parsed["example.org"],
            serde_json::json!(["a@example.org"])
        );
    }
}
