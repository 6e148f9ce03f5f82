//! Sitemap endpoints.

use std::sync::Arc;

use axum::extract::{Path, State};
use sitemap_core::SitemapResponse;

use super::AppState;
use super::error::ServerError;

/// Handle `GET /{file}`, answering only `sitemap.{xml,txt,html}`.
pub(crate) async fn get_sitemap_file(
    State(state): State<Arc<AppState>>,
    Path(file): Path<String>,
) -> Result<SitemapResponse, ServerError> {
    let format = match file.strip_prefix("sitemap.") {
        Some(ext @ ("xml" | "txt" | "html")) => ext.to_owned(),
        _ => return Err(ServerError::NotFound(file)),
    };
    render(state, format).await
}

/// Handle `GET /sitemap/{format}`.
pub(crate) async fn get_sitemap_format(
    State(state): State<Arc<AppState>>,
    Path(format): Path<String>,
) -> Result<SitemapResponse, ServerError> {
    render(state, format).await
}

async fn render(state: Arc<AppState>, format: String) -> Result<SitemapResponse, ServerError> {
    tokio::task::spawn_blocking(move || state.engine().render(&format, None))
        .await
        .map_err(|e| ServerError::Task(e.to_string()))?
        .map_err(ServerError::from)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use sitemap_cache::{Cache, MemoryCache, NullCache};
    use sitemap_config::SitemapConfig;
    use sitemap_core::EntryParams;
    use sitemap_render::TemplateRenderer;
    use sitemap_storage::FsStorage;

    use super::*;
    use pretty_assertions::assert_eq;

    fn state(cache: Arc<dyn Cache>, use_cache: bool) -> Arc<AppState> {
        let config = HashMap::from([(
            "app.url".to_owned(),
            "https://example.com".to_owned(),
        )]);
        Arc::new(AppState {
            entries: vec![
                EntryParams::new("https://example.com/"),
                EntryParams::new("https://example.com/about"),
            ],
            sitemaps: Vec::new(),
            options: SitemapConfig {
                use_cache,
                ..SitemapConfig::default()
            },
            config: Arc::new(config),
            public_dir: "public".into(),
            cache,
            storage: Arc::new(FsStorage::new()),
            renderer: Arc::new(TemplateRenderer::new()),
        })
    }

    #[tokio::test]
    async fn test_sitemap_file_by_extension() {
        let response = get_sitemap_file(
            State(state(Arc::new(NullCache), false)),
            Path("sitemap.txt".to_owned()),
        )
        .await
        .unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.content_type, "text/plain; charset=utf-8");
        assert_eq!(
            response.body,
            "https://example.com/\nhttps://example.com/about\n"
        );
    }

    #[tokio::test]
    async fn test_unknown_file_is_not_found() {
        let err = get_sitemap_file(
            State(state(Arc::new(NullCache), false)),
            Path("robots.txt".to_owned()),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ServerError::NotFound(ref file) if file == "robots.txt"));
    }

    #[tokio::test]
    async fn test_sitemap_by_format() {
        let response = get_sitemap_format(
            State(state(Arc::new(NullCache), false)),
            Path("ror-rss".to_owned()),
        )
        .await
        .unwrap();

        assert_eq!(response.content_type, "text/rss+xml; charset=utf-8");
        assert!(response.body.contains("<title>Sitemap for https://example.com</title>"));
    }

    #[tokio::test]
    async fn test_requests_share_cache() {
        let cache = Arc::new(MemoryCache::new());
        let shared = state(Arc::clone(&cache) as Arc<dyn Cache>, true);

        let first = get_sitemap_format(State(Arc::clone(&shared)), Path("xml".to_owned()))
            .await
            .unwrap();
        assert!(cache.has("sitemap."));
        let second = get_sitemap_format(State(shared), Path("xml".to_owned()))
            .await
            .unwrap();

        assert_eq!(first, second);
    }
}
