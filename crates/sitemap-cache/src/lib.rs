//! Cache abstraction layer for sitemap generation.
//!
//! The engine keeps a snapshot of its entry (or sub-sitemap) list under a
//! single cache key so repeated renders can skip the live collection. This
//! crate decouples that from the storage mechanism:
//!
//! - [`Cache`]: key-value store with time-to-live expiry
//! - [`CacheExt`]: typed JSON convenience methods
//!
//! # Implementations
//!
//! - [`NullCache`]: No-op implementation (always misses)
//! - [`MemoryCache`]: Process-local map, shared between requests
//! - [`FileCache`]: File-based implementation with version validation
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use sitemap_cache::{Cache, MemoryCache};
//!
//! let cache = MemoryCache::new();
//! cache.put("sitemap.", b"[]", Duration::from_secs(60)).unwrap();
//! assert!(cache.has("sitemap."));
//! ```

mod ext;
mod file;
mod memory;

use std::time::Duration;

pub use ext::CacheExt;
pub use file::FileCache;
pub use memory::MemoryCache;

/// Error returned by cache backends.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// I/O error reading or writing a cache entry.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Cached value could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
    /// A previous holder of the cache lock panicked.
    #[error("Cache lock poisoned")]
    Poisoned,
}

/// Key-value cache with per-entry expiry.
///
/// Values are raw bytes; typed access lives in [`CacheExt`]. An entry whose
/// time-to-live has elapsed behaves exactly like a missing entry.
pub trait Cache: Send + Sync {
    /// Check whether a live value exists for `key`.
    ///
    /// Returns `false` on backend errors (treats errors as "not cached").
    fn has(&self, key: &str) -> bool {
        matches!(self.get(key), Ok(Some(_)))
    }

    /// Retrieve a cached value.
    ///
    /// Returns `Ok(None)` on miss or when the entry has expired.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Store a value for `ttl`, overwriting any existing entry.
    ///
    /// A zero `ttl` removes the entry instead of storing it.
    fn put(&self, key: &str, value: &[u8], ttl: Duration) -> Result<(), CacheError>;
}

/// No-op [`Cache`] that never stores or retrieves data.
///
/// Use when caching is disabled.
#[derive(Debug, Default)]
pub struct NullCache;

impl Cache for NullCache {
    fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        Ok(None)
    }

    fn put(&self, _key: &str, _value: &[u8], _ttl: Duration) -> Result<(), CacheError> {
        Ok(())
    }
}
