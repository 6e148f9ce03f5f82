//! Configuration management for sitemap generation.
//!
//! Parses `sitemap.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `app.url`
//! - `sitemap.cache_key`
//! - `sitemap.styles_location`
//!
//! ## Example
//!
//! ```toml
//! [app]
//! url = "https://example.com"
//! public_dir = "public"
//!
//! [sitemap]
//! use_gzip = true
//! max_size = 10000
//!
//! [cache]
//! enabled = true
//! dir = ".sitemap/cache"
//! ```

mod expand;

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

/// Key under which the site's base URL is exposed by a [`ConfigSource`].
pub const APP_URL_KEY: &str = "app.url";

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "sitemap.toml";

/// Read-only key lookup used by the engine for ambient settings.
///
/// The engine only ever asks for [`APP_URL_KEY`]; implementors may expose
/// more keys.
pub trait ConfigSource: Send + Sync {
    /// Look up a dotted configuration key (e.g. `"app.url"`).
    fn get(&self, key: &str) -> Option<String>;
}

impl ConfigSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the site's base URL.
    pub url: Option<String>,
    /// Override the public output directory.
    pub public_dir: Option<PathBuf>,
    /// Override gzip output.
    pub use_gzip: Option<bool>,
    /// Override the custom size ceiling.
    pub max_size: Option<usize>,
    /// Override truncation (instead of partitioning).
    pub use_limit_size: Option<bool>,
    /// Override the persistent cache flag.
    pub cache_enabled: Option<bool>,
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Raw application section (paths as strings).
    #[serde(rename = "app")]
    app_raw: AppConfigRaw,
    /// Sitemap engine options.
    pub sitemap: SitemapConfig,
    /// Raw cache section (paths as strings).
    #[serde(rename = "cache")]
    cache_raw: CacheConfigRaw,

    /// Resolved application configuration (set after loading).
    #[serde(skip)]
    pub app: AppConfig,
    /// Resolved cache configuration (set after loading).
    #[serde(skip)]
    pub cache: CacheConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

impl ConfigSource for Config {
    fn get(&self, key: &str) -> Option<String> {
        match key {
            APP_URL_KEY => self.app.url.clone(),
            "app.public_dir" => Some(self.app.public_dir.display().to_string()),
            "sitemap.cache_key" => Some(self.sitemap.cache_key.clone()),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct AppConfigRaw {
    url: Option<String>,
    public_dir: Option<String>,
}

/// Resolved application configuration.
#[derive(Debug, Default)]
pub struct AppConfig {
    /// Base URL of the site (e.g. `https://example.com`).
    pub url: Option<String>,
    /// Directory sitemap files are written to when no path is given.
    pub public_dir: PathBuf,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct CacheConfigRaw {
    enabled: Option<bool>,
    dir: Option<String>,
}

/// Resolved persistent cache configuration.
#[derive(Debug, Default)]
pub struct CacheConfig {
    /// Whether a file-backed cache should be used.
    pub enabled: bool,
    /// Cache directory.
    pub dir: PathBuf,
}

/// Sitemap engine options.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SitemapConfig {
    /// Whether generated collections are cached between renders.
    pub use_cache: bool,
    /// Cache key for the collection snapshot.
    pub cache_key: String,
    /// Cache lifetime in seconds.
    pub cache_duration: u64,
    /// Whether entry text fields are XML-escaped on insertion.
    pub escaping: bool,
    /// Truncate oversized collections instead of partitioning them.
    pub use_limit_size: bool,
    /// Custom per-document item ceiling.
    pub max_size: Option<usize>,
    /// Whether XSL stylesheets are referenced.
    pub use_styles: bool,
    /// Public path prefix of the stylesheets (`{prefix}{format}.xsl`).
    pub styles_location: Option<String>,
    /// Whether stored files are gzip-compressed.
    pub use_gzip: bool,
    /// Marks the engine as running under a test harness.
    pub testing: bool,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            use_cache: false,
            cache_key: "sitemap.".to_owned(),
            cache_duration: 3600,
            escaping: true,
            use_limit_size: false,
            max_size: None,
            use_styles: true,
            styles_location: Some("/vendor/sitemap/styles/".to_owned()),
            use_gzip: false,
            testing: false,
        }
    }
}

impl SitemapConfig {
    /// Cache lifetime as a [`Duration`].
    #[must_use]
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_duration)
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`app.url`").
        field: String,
        /// Error message (e.g., "${`SITE_URL`} not set").
        message: String,
    },
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::Validation(message.into())
}

impl Config {
    /// Load `sitemap.toml` and layer CLI overrides on top.
    ///
    /// With no explicit path the nearest `sitemap.toml` in the working
    /// directory or its ancestors is used; with none found, defaults rooted
    /// at the working directory apply. Relative paths in the file resolve
    /// against the file's directory.
    ///
    /// # Errors
    ///
    /// Fails when an explicit `config_path` is missing, the file cannot be
    /// read or parsed, an env reference cannot be expanded, or the merged
    /// configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let file = match config_path {
            Some(path) if !path.exists() => {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Some(path) => Some(path.to_path_buf()),
            None => Self::find_upwards(),
        };

        let mut config = match file {
            Some(path) => Self::read(&path)?,
            None => {
                let cwd = std::env::current_dir().unwrap_or_default();
                Self::default_with_base(&cwd)
            }
        };
        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }
        config.validate()?;

        tracing::debug!(
            path = ?config.config_path,
            public_dir = %config.app.public_dir.display(),
            "configuration loaded"
        );
        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(url) = &settings.url {
            self.app.url = Some(url.clone());
        }
        if let Some(public_dir) = &settings.public_dir {
            self.app.public_dir.clone_from(public_dir);
        }
        self.sitemap.use_gzip = settings.use_gzip.unwrap_or(self.sitemap.use_gzip);
        self.sitemap.max_size = settings.max_size.or(self.sitemap.max_size);
        self.sitemap.use_limit_size = settings
            .use_limit_size
            .unwrap_or(self.sitemap.use_limit_size);
        self.cache.enabled = settings.cache_enabled.unwrap_or(self.cache.enabled);
    }

    fn find_upwards() -> Option<PathBuf> {
        let cwd = std::env::current_dir().ok()?;
        cwd.ancestors()
            .map(|dir| dir.join(CONFIG_FILENAME))
            .find(|candidate| candidate.is_file())
    }

    fn default_with_base(base: &Path) -> Self {
        Self {
            app_raw: AppConfigRaw::default(),
            sitemap: SitemapConfig::default(),
            cache_raw: CacheConfigRaw::default(),
            app: AppConfig {
                url: None,
                public_dir: base.join("public"),
            },
            cache: CacheConfig {
                enabled: false,
                dir: base.join(".sitemap").join("cache"),
            },
            config_path: None,
        }
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(&std::fs::read_to_string(path)?)?;
        config.expand_env_vars()?;
        config.resolve(path.parent().unwrap_or(Path::new(".")));
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Check the merged configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(url) = &self.app.url {
            if url.is_empty() {
                return Err(invalid("app.url cannot be empty"));
            }
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(invalid("app.url must start with http:// or https://"));
            }
        }
        if self.sitemap.cache_key.is_empty() {
            return Err(invalid("sitemap.cache_key cannot be empty"));
        }
        if self.sitemap.max_size == Some(0) {
            return Err(invalid("sitemap.max_size must be greater than 0"));
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref url) = self.app_raw.url {
            self.app_raw.url = Some(expand::expand_env(url, "app.url")?);
        }
        self.sitemap.cache_key = expand::expand_env(&self.sitemap.cache_key, "sitemap.cache_key")?;
        if let Some(ref location) = self.sitemap.styles_location {
            self.sitemap.styles_location =
                Some(expand::expand_env(location, "sitemap.styles_location")?);
        }
        Ok(())
    }

    /// Resolve raw sections into their final form relative to the config directory.
    fn resolve(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.app = AppConfig {
            url: self.app_raw.url.clone(),
            public_dir: resolve(self.app_raw.public_dir.as_deref(), "public"),
        };
        self.cache = CacheConfig {
            enabled: self.cache_raw.enabled.unwrap_or(false),
            dir: resolve(self.cache_raw.dir.as_deref(), ".sitemap/cache"),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/site"));
        assert_eq!(config.app.url, None);
        assert_eq!(config.app.public_dir, PathBuf::from("/site/public"));
        assert_eq!(config.cache.dir, PathBuf::from("/site/.sitemap/cache"));
        assert!(!config.cache.enabled);
        assert_eq!(config.sitemap, SitemapConfig::default());
    }

    #[test]
    fn test_sitemap_defaults() {
        let sitemap = SitemapConfig::default();
        assert!(!sitemap.use_cache);
        assert_eq!(sitemap.cache_key, "sitemap.");
        assert_eq!(sitemap.cache_ttl(), Duration::from_secs(3600));
        assert!(sitemap.escaping);
        assert!(!sitemap.use_limit_size);
        assert_eq!(sitemap.max_size, None);
        assert!(sitemap.use_styles);
        assert_eq!(
            sitemap.styles_location.as_deref(),
            Some("/vendor/sitemap/styles/")
        );
        assert!(!sitemap.use_gzip);
        assert!(!sitemap.testing);
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.sitemap, SitemapConfig::default());
    }

    #[test]
    fn test_parse_sitemap_section() {
        let toml = r#"
[sitemap]
use_cache = true
cache_key = "news."
cache_duration = 60
escaping = false
use_limit_size = true
max_size = 500
use_styles = false
use_gzip = true
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert!(config.sitemap.use_cache);
        assert_eq!(config.sitemap.cache_key, "news.");
        assert_eq!(config.sitemap.cache_ttl(), Duration::from_secs(60));
        assert!(!config.sitemap.escaping);
        assert!(config.sitemap.use_limit_size);
        assert_eq!(config.sitemap.max_size, Some(500));
        assert!(!config.sitemap.use_styles);
        assert!(config.sitemap.use_gzip);
        // Unset fields keep their defaults
        assert_eq!(
            config.sitemap.styles_location.as_deref(),
            Some("/vendor/sitemap/styles/")
        );
    }

    #[test]
    fn test_load_resolves_paths_relative_to_config() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILENAME);
        std::fs::write(
            &path,
            r#"
[app]
url = "https://example.com"
public_dir = "www"

[cache]
enabled = true
dir = "tmp/cache"
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(config.app.url.as_deref(), Some("https://example.com"));
        assert_eq!(config.app.public_dir, tmp.path().join("www"));
        assert!(config.cache.enabled);
        assert_eq!(config.cache.dir, tmp.path().join("tmp/cache"));
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Some(Path::new("/nonexistent/sitemap.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_expands_env_default() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILENAME);
        std::fs::write(
            &path,
            "[app]\nurl = \"${SITEMAP_TEST_SURELY_UNSET_URL:-https://fallback.test}\"\n",
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(config.app.url.as_deref(), Some("https://fallback.test"));
    }

    #[test]
    fn test_validate_rejects_non_http_url() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[app]\nurl = \"ftp://example.com\"\n").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(err.to_string().contains("app.url must start with http"));
    }

    #[test]
    fn test_validate_rejects_zero_max_size() {
        let mut config = Config::default_with_base(Path::new("/site"));
        config.sitemap.max_size = Some(0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_rejects_empty_cache_key() {
        let mut config = Config::default_with_base(Path::new("/site"));
        config.sitemap.cache_key = String::new();
        let err = config.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: sitemap.cache_key cannot be empty"
        );
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default_with_base(Path::new("/site"));
        config.apply_cli_settings(&CliSettings {
            url: Some("https://cli.test".to_owned()),
            public_dir: Some(PathBuf::from("/out")),
            use_gzip: Some(true),
            max_size: Some(10),
            use_limit_size: Some(true),
            cache_enabled: Some(true),
        });

        assert_eq!(config.app.url.as_deref(), Some("https://cli.test"));
        assert_eq!(config.app.public_dir, PathBuf::from("/out"));
        assert!(config.sitemap.use_gzip);
        assert_eq!(config.sitemap.max_size, Some(10));
        assert!(config.sitemap.use_limit_size);
        assert!(config.cache.enabled);
    }

    #[test]
    fn test_apply_cli_settings_none_keeps_values() {
        let mut config = Config::default_with_base(Path::new("/site"));
        config.apply_cli_settings(&CliSettings::default());
        assert_eq!(config.sitemap, SitemapConfig::default());
        assert_eq!(config.app.public_dir, PathBuf::from("/site/public"));
    }

    #[test]
    fn test_config_source_lookup() {
        let mut config = Config::default_with_base(Path::new("/site"));
        config.app.url = Some("https://example.com".to_owned());

        assert_eq!(
            ConfigSource::get(&config, APP_URL_KEY).as_deref(),
            Some("https://example.com")
        );
        assert_eq!(ConfigSource::get(&config, "unknown.key"), None);
    }

    #[test]
    fn test_hash_map_config_source() {
        let source = HashMap::from([(APP_URL_KEY.to_owned(), "https://map.test".to_owned())]);
        assert_eq!(
            ConfigSource::get(&source, APP_URL_KEY).as_deref(),
            Some("https://map.test")
        );
    }
}
