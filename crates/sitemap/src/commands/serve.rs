//! `sitemap serve` command implementation.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use sitemap_cache::{Cache, FileCache, MemoryCache};
use sitemap_config::{CliSettings, Config};
use sitemap_render::TemplateRenderer;
use sitemap_storage::FsStorage;

use crate::error::CliError;
use crate::input;
use crate::output::Output;
use crate::server::{AppState, run_server};

/// Application version from Cargo.toml, used to invalidate the file cache.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Entry list (JSON, or YAML with a .yaml/.yml extension).
    #[arg(short, long)]
    input: PathBuf,

    /// Path to configuration file (default: auto-discover sitemap.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host to bind to.
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to bind to.
    #[arg(short, long, default_value_t = 8080)]
    port: u16,

    /// Site base URL (overrides config).
    #[arg(long, env = "SITEMAP_URL")]
    url: Option<String>,

    /// Enable the persistent file cache (overrides config).
    #[arg(long)]
    cache: Option<bool>,

    /// Disable the persistent file cache.
    #[arg(long, conflicts_with = "cache")]
    no_cache: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or input cannot be loaded, or the
    /// server fails to start.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            url: self.url.clone(),
            cache_enabled: self.resolve_cache_enabled(),
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let input = input::load(&self.input)?;

        output.info(&format!("Starting server on {}:{}", self.host, self.port));
        output.info(&format!(
            "Entries: {} ({})",
            input.entries.len(),
            self.input.display()
        ));

        let cache: Arc<dyn Cache> = if config.cache.enabled {
            output.info(&format!("Cache directory: {}", config.cache.dir.display()));
            Arc::new(FileCache::new(config.cache.dir.clone(), VERSION))
        } else {
            Arc::new(MemoryCache::new())
        };
        if !config.sitemap.use_cache {
            output.info("Collection cache: disabled");
        }

        let state = AppState {
            entries: input.entries,
            sitemaps: input.sitemaps,
            options: config.sitemap.clone(),
            public_dir: config.app.public_dir.clone(),
            config: Arc::new(config),
            cache,
            storage: Arc::new(FsStorage::new()),
            renderer: Arc::new(TemplateRenderer::new()),
        };

        run_server(state, &self.host, self.port).await
    }

    /// Resolve `cache_enabled` from --cache/--no-cache flags.
    fn resolve_cache_enabled(&self) -> Option<bool> {
        self.no_cache.then_some(false).or(self.cache)
    }
}
