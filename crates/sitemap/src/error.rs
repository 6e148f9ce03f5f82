use sitemap_config::ConfigError;
use sitemap_core::SitemapError;

#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Sitemap(#[from] SitemapError),

    #[error("Invalid input {path}: {message}")]
    Input { path: String, message: String },

    #[error("Server error: {0}")]
    Server(String),
}
