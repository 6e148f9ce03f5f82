//! File-based cache implementation.
//!
//! [`FileCache`] stores each entry as a single file named after its key, with
//! a binary header followed by the data:
//!
//! ```text
//! [expires_at: u64 LE, seconds since Unix epoch][data bytes]
//! ```
//!
//! On read, only the header is read first to check expiry. The data is read
//! only when the entry is still live; expired files are removed.
//!
//! The cache root carries a `VERSION` stamp. Opening the cache with a
//! different version clears the directory first.

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::{Cache, CacheError};

const VERSION_FILE: &str = "VERSION";

/// File-based [`Cache`] rooted at a directory on disk.
///
/// Directory layout:
/// ```text
/// {root}/
/// +-- VERSION            # contains the cache version string
/// +-- sitemap.           # entry for key "sitemap."
/// +-- news/sitemap       # nested key "news/sitemap"
/// ```
#[derive(Debug)]
pub struct FileCache {
    root: PathBuf,
}

impl FileCache {
    /// Open the cache at `root` for snapshots written by `version`.
    ///
    /// Failing to reset a stale directory is logged, not returned; reads
    /// then simply miss.
    #[must_use]
    pub fn new(root: PathBuf, version: &str) -> Self {
        reset_if_stale(&root, version);
        Self { root }
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

impl Cache for FileCache {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let path = self.entry_path(key);
        let mut file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let mut header = [0u8; 8];
        if let Err(e) = file.read_exact(&mut header) {
            // Truncated entry: treat as miss
            tracing::warn!(key, "unreadable cache entry header: {e}");
            return Ok(None);
        }
        let expires_at = u64::from_le_bytes(header);

        if expires_at <= now_secs() {
            tracing::debug!(key, "file cache entry expired");
            drop(file);
            let _ = fs::remove_file(&path);
            return Ok(None);
        }

        let mut data = Vec::new();
        file.read_to_end(&mut data)?;
        Ok(Some(data))
    }

    fn put(&self, key: &str, value: &[u8], ttl: Duration) -> Result<(), CacheError> {
        let path = self.entry_path(key);

        if ttl.is_zero() {
            match fs::remove_file(&path) {
                Ok(()) => return Ok(()),
                Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
                Err(e) => return Err(e.into()),
            }
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let expires_at = now_secs().saturating_add(ttl.as_secs().max(1));
        let mut buf = Vec::with_capacity(8 + value.len());
        buf.extend_from_slice(&expires_at.to_le_bytes());
        buf.extend_from_slice(value);

        fs::write(&path, &buf)?;
        Ok(())
    }
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs())
}

/// Make `root` hold snapshots for `version` only.
///
/// A stamp file records the build that wrote the snapshots; any other stamp
/// (or none) clears the directory.
fn reset_if_stale(root: &Path, version: &str) {
    let stamp = root.join(VERSION_FILE);
    let stored = fs::read_to_string(&stamp).ok();
    if stored.as_deref() == Some(version) {
        return;
    }
    tracing::info!(
        root = %root.display(),
        stored = stored.as_deref().unwrap_or("none"),
        current = version,
        "resetting sitemap cache"
    );

    let reset = || -> io::Result<()> {
        match fs::remove_dir_all(root) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => return Err(e),
            _ => {}
        }
        fs::create_dir_all(root)?;
        fs::write(&stamp, version)
    };
    if let Err(e) = reset() {
        tracing::warn!(root = %root.display(), error = %e, "cache reset failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const TTL: Duration = Duration::from_secs(3600);

    #[test]
    fn test_put_and_get() {
        let tmp = TempDir::new().unwrap();
        let cache = FileCache::new(tmp.path().join("cache"), "v1");

        cache.put("sitemap.", b"[{\"loc\":\"/\"}]", TTL).unwrap();
        assert_eq!(
            cache.get("sitemap.").unwrap(),
            Some(b"[{\"loc\":\"/\"}]".to_vec())
        );
        assert!(cache.has("sitemap."));
    }

    #[test]
    fn test_get_nonexistent_key() {
        let tmp = TempDir::new().unwrap();
        let cache = FileCache::new(tmp.path().join("cache"), "v1");

        assert_eq!(cache.get("nonexistent").unwrap(), None);
        assert!(!cache.has("nonexistent"));
    }

    #[test]
    fn test_overwrite() {
        let tmp = TempDir::new().unwrap();
        let cache = FileCache::new(tmp.path().join("cache"), "v1");

        cache.put("key", b"first", TTL).unwrap();
        cache.put("key", b"second", TTL).unwrap();

        assert_eq!(cache.get("key").unwrap(), Some(b"second".to_vec()));
    }

    #[test]
    fn test_expired_entry_is_removed() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("cache");
        let cache = FileCache::new(root.clone(), "v1");

        // Hand-write an entry that expired at the epoch
        let mut buf = 0u64.to_le_bytes().to_vec();
        buf.extend_from_slice(b"stale");
        fs::write(root.join("old"), buf).unwrap();

        assert_eq!(cache.get("old").unwrap(), None);
        assert!(!root.join("old").exists());
    }

    #[test]
    fn test_truncated_header_misses() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("cache");
        let cache = FileCache::new(root.clone(), "v1");

        fs::write(root.join("short"), b"abc").unwrap();
        assert_eq!(cache.get("short").unwrap(), None);
    }

    #[test]
    fn test_zero_ttl_removes_entry() {
        let tmp = TempDir::new().unwrap();
        let cache = FileCache::new(tmp.path().join("cache"), "v1");

        cache.put("key", b"value", TTL).unwrap();
        cache.put("key", b"value", Duration::ZERO).unwrap();
        assert_eq!(cache.get("key").unwrap(), None);

        // Removing a missing entry is not an error
        cache.put("never-set", b"", Duration::ZERO).unwrap();
    }

    #[test]
    fn test_nested_key() {
        let tmp = TempDir::new().unwrap();
        let cache = FileCache::new(tmp.path().join("cache"), "v1");

        cache.put("news/sitemap", b"nested", TTL).unwrap();
        assert_eq!(cache.get("news/sitemap").unwrap(), Some(b"nested".to_vec()));
    }

    #[test]
    fn test_reopen_same_version_keeps_snapshots() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("cache");

        FileCache::new(root.clone(), "1.0.0")
            .put("sitemap.", b"kept", TTL)
            .unwrap();

        let reopened = FileCache::new(root, "1.0.0");
        assert_eq!(reopened.get("sitemap.").unwrap(), Some(b"kept".to_vec()));
    }

    #[test]
    fn test_new_version_clears_snapshots() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("a/b/cache");

        FileCache::new(root.clone(), "1.0.0")
            .put("sitemap.", b"old build", TTL)
            .unwrap();
        let upgraded = FileCache::new(root.clone(), "1.1.0");

        assert!(!upgraded.has("sitemap."));
        assert_eq!(fs::read_to_string(root.join(VERSION_FILE)).unwrap(), "1.1.0");
    }
}
