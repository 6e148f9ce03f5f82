//! Engine error type.

use sitemap_cache::CacheError;
use sitemap_render::RenderError;
use sitemap_storage::StorageError;

/// Error returned by sitemap generation and storage.
#[derive(Debug, thiserror::Error)]
pub enum SitemapError {
    /// Cache backend failed.
    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),
    /// Output could not be written.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    /// Template failed to render.
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
    /// Render context could not be built.
    #[error("Context error: {0}")]
    Context(#[from] serde_json::Error),
    /// Gzip compression failed.
    #[error("Compression error: {0}")]
    Compress(#[source] std::io::Error),
}
