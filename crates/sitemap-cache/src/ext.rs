//! Extension trait for [`Cache`] with typed convenience methods.

use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::{Cache, CacheError};

/// Typed convenience methods for [`Cache`].
///
/// Implemented as default methods on an extension trait so that [`Cache`]
/// stays object-safe and backends only handle raw bytes.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use sitemap_cache::{CacheExt, MemoryCache};
///
/// let cache = MemoryCache::new();
/// cache.put_json("urls", &vec!["/a", "/b"], Duration::from_secs(60)).unwrap();
/// let urls: Option<Vec<String>> = cache.get_json("urls").unwrap();
/// assert_eq!(urls, Some(vec!["/a".to_owned(), "/b".to_owned()]));
/// ```
pub trait CacheExt: Cache {
    /// Retrieve a JSON-deserialized value from the cache.
    ///
    /// Returns `Ok(None)` on miss; a stored value of the wrong shape is a
    /// [`CacheError::Serialize`].
    fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.get(key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Store a value as JSON in the cache.
    fn put_json<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
        ttl: Duration,
    ) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(value)?;
        self.put(key, &bytes, ttl)
    }
}

impl<C: Cache + ?Sized> CacheExt for C {}
