//! `sitemap build` command implementation.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use sitemap_config::{CliSettings, Config};
use sitemap_core::Sitemap;

use crate::error::CliError;
use crate::input;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Entry list (JSON, or YAML with a .yaml/.yml extension).
    #[arg(short, long)]
    input: PathBuf,

    /// Output format (xml, google-news, ror-rss, ror-rdf, html, txt, sitemapindex).
    #[arg(short, long, default_value = "xml")]
    format: String,

    /// Base filename, without extension.
    #[arg(long, default_value = "sitemap")]
    filename: String,

    /// Output directory (default: the configured public directory).
    ///
    /// Index documents reference chunk files relative to this directory.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Site base URL (overrides config).
    #[arg(long, env = "SITEMAP_URL")]
    url: Option<String>,

    /// Stylesheet href to reference instead of the built-in lookup.
    #[arg(long)]
    style: Option<String>,

    /// Gzip written files.
    #[arg(long)]
    gzip: bool,

    /// Maximum number of entries per file (overrides config).
    #[arg(long)]
    max_size: Option<usize>,

    /// Truncate oversized collections instead of splitting them.
    #[arg(long)]
    limit_size: bool,

    /// Path to configuration file (default: auto-discover sitemap.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or input cannot be loaded, or if a
    /// file cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            url: self.url,
            use_gzip: self.gzip.then_some(true),
            max_size: self.max_size,
            use_limit_size: self.limit_size.then_some(true),
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let input = input::load(&self.input)?;

        let target_dir = self
            .output
            .clone()
            .unwrap_or_else(|| config.app.public_dir.clone());
        output.info(&format!("Input: {}", self.input.display()));
        output.info(&format!("Output: {}", target_dir.display()));

        let options = config.sitemap.clone();
        let public_dir = config.app.public_dir.clone();
        let mut sitemap = Sitemap::new(options, Arc::new(config), public_dir);
        sitemap.add_many(input.entries);
        for sitemap_ref in input.sitemaps {
            sitemap.add_sitemap(sitemap_ref.location, sitemap_ref.last_modified);
        }

        let report = sitemap.store(
            &self.format,
            &self.filename,
            self.output.as_deref(),
            self.style.as_deref(),
        )?;

        output.report(&report);
        Ok(())
    }
}
