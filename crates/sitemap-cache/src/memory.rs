//! In-process cache implementation.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::{Cache, CacheError};

struct MemoryEntry {
    expires_at: Instant,
    value: Vec<u8>,
}

/// Process-local [`Cache`] backed by a locked map.
///
/// Expired entries are dropped lazily on the next lookup.
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, MemoryEntry>>,
}

impl MemoryCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl std::fmt::Debug for MemoryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let len = self.entries.lock().map_or(0, |entries| entries.len());
        f.debug_struct("MemoryCache").field("entries", &len).finish()
    }
}

impl Cache for MemoryCache {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let mut entries = self.entries.lock().map_err(|_| CacheError::Poisoned)?;
        match entries.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => Ok(Some(entry.value.clone())),
            Some(_) => {
                tracing::debug!(key, "memory cache entry expired");
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    fn put(&self, key: &str, value: &[u8], ttl: Duration) -> Result<(), CacheError> {
        let mut entries = self.entries.lock().map_err(|_| CacheError::Poisoned)?;
        if ttl.is_zero() {
            entries.remove(key);
            return Ok(());
        }
        entries.insert(
            key.to_owned(),
            MemoryEntry {
                expires_at: Instant::now() + ttl,
                value: value.to_vec(),
            },
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_and_get() {
        let cache = MemoryCache::new();
        cache
            .put("sitemap.", b"payload", Duration::from_secs(60))
            .unwrap();

        assert_eq!(cache.get("sitemap.").unwrap(), Some(b"payload".to_vec()));
        assert!(cache.has("sitemap."));
    }

    #[test]
    fn test_overwrite() {
        let cache = MemoryCache::new();
        cache.put("k", b"first", Duration::from_secs(60)).unwrap();
        cache.put("k", b"second", Duration::from_secs(60)).unwrap();

        assert_eq!(cache.get("k").unwrap(), Some(b"second".to_vec()));
    }

    #[test]
    fn test_zero_ttl_removes_entry() {
        let cache = MemoryCache::new();
        cache.put("k", b"value", Duration::from_secs(60)).unwrap();
        cache.put("k", b"value", Duration::ZERO).unwrap();

        assert!(!cache.has("k"));
    }

    #[test]
    fn test_expired_entry_misses() {
        let cache = MemoryCache::new();
        cache.put("k", b"value", Duration::from_nanos(1)).unwrap();
        std::thread::sleep(Duration::from_millis(5));

        assert_eq!(cache.get("k").unwrap(), None);
    }

    #[test]
    fn test_keys_are_isolated() {
        let cache = MemoryCache::new();
        cache.put("a", b"alpha", Duration::from_secs(60)).unwrap();
        cache.put("b", b"beta", Duration::from_secs(60)).unwrap();

        assert_eq!(cache.get("a").unwrap(), Some(b"alpha".to_vec()));
        assert_eq!(cache.get("b").unwrap(), Some(b"beta".to_vec()));
    }
}
