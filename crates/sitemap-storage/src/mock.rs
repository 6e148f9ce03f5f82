//! Mock storage implementation for testing.
//!
//! Provides [`MockStorage`] for unit testing without filesystem access.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::storage::{Storage, StorageError, StorageErrorKind};

/// Mock storage for testing.
///
/// Keeps written payloads in memory, in write order. Use the builder methods
/// to seed pre-existing files (e.g. stylesheets) or to make writes fail.
///
/// # Example
///
/// ```ignore
/// use std::path::Path;
/// use sitemap_storage::{MockStorage, Storage};
///
/// let storage = MockStorage::new().with_file("public/vendor/sitemap/styles/xml.xsl");
/// assert!(storage.exists(Path::new("public/vendor/sitemap/styles/xml.xsl")));
///
/// storage.write(Path::new("public/sitemap.xml"), b"<urlset/>").unwrap();
/// assert_eq!(storage.read(Path::new("public/sitemap.xml")).unwrap(), b"<urlset/>");
/// ```
#[derive(Debug, Default)]
pub struct MockStorage {
    files: RwLock<HashMap<PathBuf, Vec<u8>>>,
    write_order: RwLock<Vec<PathBuf>>,
    failing: RwLock<HashSet<PathBuf>>,
}

impl MockStorage {
    /// Create a new empty mock storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an existing (empty) file at `path`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_file(self, path: impl Into<PathBuf>) -> Self {
        self.files.write().unwrap().insert(path.into(), Vec::new());
        self
    }

    /// Make every write to `path` fail with `PermissionDenied`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_failing_write(self, path: impl Into<PathBuf>) -> Self {
        self.failing.write().unwrap().insert(path.into());
        self
    }

    /// Content last written to `path`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn read(&self, path: &Path) -> Option<Vec<u8>> {
        self.files.read().unwrap().get(path).cloned()
    }

    /// Paths in the order they were written (repeat writes appear repeatedly).
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn written(&self) -> Vec<PathBuf> {
        self.write_order.read().unwrap().clone()
    }
}

impl Storage for MockStorage {
    fn exists(&self, path: &Path) -> bool {
        self.files.read().unwrap().contains_key(path)
    }

    fn write(&self, path: &Path, content: &[u8]) -> Result<(), StorageError> {
        if self.failing.read().unwrap().contains(path) {
            return Err(StorageError::new(StorageErrorKind::PermissionDenied)
                .with_path(path)
                .with_backend("Mock"));
        }
        self.files
            .write()
            .unwrap()
            .insert(path.to_path_buf(), content.to_vec());
        self.write_order.write().unwrap().push(path.to_path_buf());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_seeded_file_exists() {
        let storage = MockStorage::new().with_file("styles/xml.xsl");

        assert!(storage.exists(Path::new("styles/xml.xsl")));
        assert!(!storage.exists(Path::new("styles/txt.xsl")));
    }

    #[test]
    fn test_write_records_order() {
        let storage = MockStorage::new();
        storage.write(Path::new("a-0.xml"), b"0").unwrap();
        storage.write(Path::new("a-1.xml"), b"1").unwrap();
        storage.write(Path::new("a.xml"), b"index").unwrap();

        assert_eq!(
            storage.written(),
            vec![
                PathBuf::from("a-0.xml"),
                PathBuf::from("a-1.xml"),
                PathBuf::from("a.xml"),
            ]
        );
        assert_eq!(storage.read(Path::new("a.xml")), Some(b"index".to_vec()));
    }

    #[test]
    fn test_failing_write() {
        let storage = MockStorage::new().with_failing_write("locked.xml");

        let err = storage.write(Path::new("locked.xml"), b"x").unwrap_err();
        assert_eq!(err.kind, StorageErrorKind::PermissionDenied);
        assert_eq!(err.backend, Some("Mock"));
        assert!(storage.written().is_empty());
    }
}
