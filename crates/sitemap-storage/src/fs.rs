//! Filesystem storage backend.

use std::fs;
use std::path::Path;

use crate::storage::{Storage, StorageError};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// [`Storage`] that writes straight to the local filesystem.
///
/// Parent directories are created on demand.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsStorage;

impl FsStorage {
    /// Create a filesystem storage backend.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Storage for FsStorage {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn write(&self, path: &Path, content: &[u8]) -> Result<(), StorageError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .map_err(|e| StorageError::io(e, Some(parent)).with_backend(BACKEND))?;
        }
        fs::write(path, content)
            .map_err(|e| StorageError::io(e, Some(path)).with_backend(BACKEND))?;
        tracing::debug!(path = %path.display(), bytes = content.len(), "wrote file");
        Ok(())
    }
}
