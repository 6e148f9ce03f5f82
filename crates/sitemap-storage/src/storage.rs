//! Storage trait and error types.
//!
//! Paths passed to a [`Storage`] are fully resolved target paths
//! (e.g. `public/sitemap-0.xml.gz`); the engine decides where files go, the
//! backend only persists bytes.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// What went wrong while persisting a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum StorageErrorKind {
    /// Target directory is missing and could not be created.
    NotFound,
    /// The process may not write the target.
    PermissionDenied,
    /// The target lives on a read-only filesystem.
    ReadOnly,
    /// No space left for the payload.
    StorageFull,
    /// Target path is not usable (e.g. a directory).
    InvalidPath,
    /// The write was interrupted or timed out; retrying may succeed.
    Interrupted,
    Other,
}

impl StorageErrorKind {
    fn from_io(kind: io::ErrorKind) -> Self {
        match kind {
            io::ErrorKind::NotFound => Self::NotFound,
            io::ErrorKind::PermissionDenied => Self::PermissionDenied,
            io::ErrorKind::ReadOnlyFilesystem => Self::ReadOnly,
            io::ErrorKind::StorageFull => Self::StorageFull,
            io::ErrorKind::IsADirectory | io::ErrorKind::InvalidInput => Self::InvalidPath,
            io::ErrorKind::Interrupted | io::ErrorKind::TimedOut => Self::Interrupted,
            _ => Self::Other,
        }
    }

    fn describe(self) -> &'static str {
        match self {
            Self::NotFound => "directory not found",
            Self::PermissionDenied => "permission denied",
            Self::ReadOnly => "read-only filesystem",
            Self::StorageFull => "no space left",
            Self::InvalidPath => "invalid path",
            Self::Interrupted => "interrupted",
            Self::Other => "write failed",
        }
    }
}

/// Error returned when a document cannot be persisted.
#[derive(Debug)]
pub struct StorageError {
    /// Failure category.
    pub kind: StorageErrorKind,
    /// Target path, when known.
    pub path: Option<PathBuf>,
    /// Backend identifier (e.g. `"Fs"`, `"Mock"`).
    pub backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StorageError {
    #[must_use]
    pub fn new(kind: StorageErrorKind) -> Self {
        Self {
            kind,
            path: None,
            backend: None,
            source: None,
        }
    }

    /// Map an I/O failure on `path`.
    #[must_use]
    pub fn io(err: io::Error, path: Option<&Path>) -> Self {
        Self {
            kind: StorageErrorKind::from_io(err.kind()),
            path: path.map(Path::to_path_buf),
            backend: None,
            source: Some(Box::new(err)),
        }
    }

    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Whether repeating the write may succeed.
    ///
    /// The engine never retries; this is guidance for callers.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        self.kind == StorageErrorKind::Interrupted
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // "Fs: cannot write public/sitemap.xml: permission denied (read-only)"
        if let Some(backend) = self.backend {
            write!(f, "{backend}: ")?;
        }
        match &self.path {
            Some(path) => write!(f, "cannot write {}: ", path.display())?,
            None => f.write_str("cannot write: ")?,
        }
        f.write_str(self.kind.describe())?;
        if let Some(source) = &self.source {
            write!(f, " ({source})")?;
        }
        Ok(())
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|s| s as &(dyn std::error::Error + 'static))
    }
}

/// Sink for finished sitemap documents.
///
/// Used for two things: checking whether a stylesheet exists before
/// referencing it, and persisting rendered (possibly gzipped) payloads.
pub trait Storage: Send + Sync {
    /// Check if a file exists at `path`.
    ///
    /// Returns `false` on errors (treats errors as "doesn't exist").
    fn exists(&self, path: &Path) -> bool;

    /// Write `content` to `path`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the payload cannot be persisted.
    fn write(&self, path: &Path, content: &[u8]) -> Result<(), StorageError>;
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn test_io_mapping() {
        let cases = [
            (io::ErrorKind::PermissionDenied, StorageErrorKind::PermissionDenied),
            (io::ErrorKind::NotFound, StorageErrorKind::NotFound),
            (io::ErrorKind::StorageFull, StorageErrorKind::StorageFull),
            (io::ErrorKind::TimedOut, StorageErrorKind::Interrupted),
            (io::ErrorKind::UnexpectedEof, StorageErrorKind::Other),
        ];
        for (io_kind, expected) in cases {
            let err = StorageError::io(io::Error::new(io_kind, "boom"), None);
            assert_eq!(err.kind, expected, "{io_kind:?}");
        }
    }

    #[test]
    fn test_io_keeps_path_and_source() {
        let err = StorageError::io(
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
            Some(Path::new("public/sitemap.xml")),
        );

        assert_eq!(err.path.as_deref(), Some(Path::new("public/sitemap.xml")));
        assert!(err.source().is_some());
        assert!(!err.is_transient());
    }

    #[test]
    fn test_interrupted_is_transient() {
        let err = StorageError::io(io::Error::from(io::ErrorKind::Interrupted), None);
        assert!(err.is_transient());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            StorageError::new(StorageErrorKind::PermissionDenied).to_string(),
            "cannot write: permission denied"
        );

        let err = StorageError::io(
            io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
            Some(Path::new("public/sitemap.xml")),
        )
        .with_backend("Fs");
        assert_eq!(
            err.to_string(),
            "Fs: cannot write public/sitemap.xml: permission denied (read-only)"
        );
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<StorageError>();
    }
}
