//! HTTP server for rendered sitemaps.
//!
//! Every request builds a fresh [`Sitemap`] from the loaded entries and the
//! shared collaborators, so requests never see each other's state. With
//! caching enabled the shared cache serves the collection snapshot.
//!
//! # Routes
//!
//! - `GET /sitemap.{xml,txt,html}`: sitemap in the format named by the
//!   extension
//! - `GET /sitemap/{format}`: sitemap in any format

mod error;
mod handlers;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use sitemap_cache::Cache;
use sitemap_config::{ConfigSource, SitemapConfig};
use sitemap_core::{EntryParams, Sitemap, SitemapRef};
use sitemap_render::Renderer;
use sitemap_storage::Storage;

use crate::error::CliError;

/// State shared by all request handlers.
pub(crate) struct AppState {
    pub(crate) entries: Vec<EntryParams>,
    pub(crate) sitemaps: Vec<SitemapRef>,
    pub(crate) options: SitemapConfig,
    pub(crate) config: Arc<dyn ConfigSource>,
    pub(crate) public_dir: PathBuf,
    pub(crate) cache: Arc<dyn Cache>,
    pub(crate) storage: Arc<dyn Storage>,
    pub(crate) renderer: Arc<dyn Renderer>,
}

impl AppState {
    /// Build a request-scoped engine holding every loaded entry.
    pub(crate) fn engine(&self) -> Sitemap {
        let mut sitemap = Sitemap::new(
            self.options.clone(),
            Arc::clone(&self.config),
            self.public_dir.clone(),
        )
        .with_cache(Arc::clone(&self.cache))
        .with_storage(Arc::clone(&self.storage))
        .with_renderer(Arc::clone(&self.renderer));

        sitemap.add_many(self.entries.iter().cloned());
        for sitemap_ref in &self.sitemaps {
            sitemap.add_sitemap(
                sitemap_ref.location.clone(),
                sitemap_ref.last_modified.clone(),
            );
        }
        sitemap
    }
}

/// Create the application router.
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/sitemap/{format}", get(handlers::get_sitemap_format))
        .route("/{file}", get(handlers::get_sitemap_file))
        .with_state(state)
}

/// Run the server until Ctrl-C.
pub(crate) async fn run_server(state: AppState, host: &str, port: u16) -> Result<(), CliError> {
    let app = create_router(Arc::new(state));

    let addr = SocketAddr::from_str(&format!("{host}:{port}"))
        .map_err(|e| CliError::Server(format!("Invalid address {host}:{port}: {e}")))?;
    tracing::info!(address = %addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        return;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}
