//! Handler error type.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use sitemap_core::SitemapError;

/// Error returned by request handlers.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ServerError {
    /// No sitemap at the requested path.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Generation failed.
    #[error("{0}")]
    Sitemap(#[from] SitemapError),

    /// The rendering task panicked or was cancelled.
    #[error("Render task failed: {0}")]
    Task(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Sitemap(_) | Self::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, self.to_string()).into_response()
    }
}
