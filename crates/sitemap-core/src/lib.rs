//! Sitemap generation and partitioning engine.
//!
//! [`Sitemap`] collects URL entries and serializes them into sitemap
//! documents (`xml`, `google-news`, `ror-rss`, `ror-rdf`, `html`, `txt`,
//! `sitemapindex`). Collections larger than a document may hold are either
//! truncated or split into numbered chunk files linked by an index.
//!
//! # Collaborators
//!
//! The engine does no I/O of its own. It is wired to:
//! - a [`Cache`] for collection snapshots on the render path
//! - a [`ConfigSource`] for the site's base URL
//! - a [`Storage`] sink for stored files and stylesheet lookups
//! - a [`Renderer`] that turns the collection into markup
//!
//! # Example
//!
//! ```ignore
//! use std::collections::HashMap;
//! use std::sync::Arc;
//! use sitemap_config::SitemapConfig;
//! use sitemap_core::{EntryParams, Sitemap};
//!
//! let config = HashMap::from([("app.url".to_owned(), "https://example.com".to_owned())]);
//! let mut sitemap = Sitemap::new(SitemapConfig::default(), Arc::new(config), "public");
//!
//! sitemap.add(EntryParams::new("https://example.com/"));
//! let report = sitemap.store("xml", "sitemap", None, None)?;
//! ```
//!
//! # Concurrency
//!
//! An engine is meant for one request or one build. Share the collaborators
//! between engines, not the engine itself.

mod cache_gate;
mod entry;
mod error;
mod escape;
mod format;
mod generator;
mod model;
pub mod partition;
mod response;
mod store;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use sitemap_cache::{Cache, NullCache};
use sitemap_config::{ConfigSource, SitemapConfig};
use sitemap_render::{Renderer, TemplateRenderer};
use sitemap_storage::{FsStorage, Storage};

pub use entry::{
    Attributes, DEFAULT_LOCATION, Entry, EntryParams, NewsMeta, NewsParams, SitemapRef,
};
pub use error::SitemapError;
pub use escape::escape;
pub use format::{DEFAULT_CEILING, Format, GOOGLE_NEWS_CEILING};
pub use generator::Document;
pub use model::Model;
pub use response::SitemapResponse;
pub use store::{StoreReport, StoredFile};

/// Sitemap engine.
pub struct Sitemap {
    model: Model,
    cache: Arc<dyn Cache>,
    config: Arc<dyn ConfigSource>,
    storage: Arc<dyn Storage>,
    renderer: Arc<dyn Renderer>,
    public_dir: PathBuf,
}

impl Sitemap {
    /// Create an engine.
    ///
    /// Files without an explicit path are written to `public_dir`, and
    /// stylesheets are looked up below it. The engine starts with a
    /// [`NullCache`], [`FsStorage`] and the built-in [`TemplateRenderer`].
    #[must_use]
    pub fn new(
        options: SitemapConfig,
        config: Arc<dyn ConfigSource>,
        public_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            model: Model::new(options),
            cache: Arc::new(NullCache),
            config,
            storage: Arc::new(FsStorage::new()),
            renderer: Arc::new(TemplateRenderer::new()),
            public_dir: public_dir.into(),
        }
    }

    /// Use `cache` for collection snapshots.
    #[must_use]
    pub fn with_cache(mut self, cache: Arc<dyn Cache>) -> Self {
        self.cache = cache;
        self
    }

    /// Use `storage` for written files and stylesheet lookups.
    #[must_use]
    pub fn with_storage(mut self, storage: Arc<dyn Storage>) -> Self {
        self.storage = storage;
        self
    }

    /// Use `renderer` to produce document markup.
    #[must_use]
    pub fn with_renderer(mut self, renderer: Arc<dyn Renderer>) -> Self {
        self.renderer = renderer;
        self
    }

    /// Entry collection and options.
    #[must_use]
    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Mutable access to the collection and options.
    pub fn model_mut(&mut self) -> &mut Model {
        &mut self.model
    }

    /// Directory files are stored in when `store` gets no path.
    #[must_use]
    pub fn public_dir(&self) -> &Path {
        &self.public_dir
    }

    /// Append an entry. See [`Model::add`].
    pub fn add(&mut self, params: EntryParams) {
        self.model.add(params);
    }

    /// Append one entry per element of `params`.
    pub fn add_many(&mut self, params: impl IntoIterator<Item = EntryParams>) {
        self.model.add_many(params);
    }

    /// Append a sub-sitemap reference for `sitemapindex` output.
    pub fn add_sitemap(&mut self, location: impl Into<String>, last_modified: Option<String>) {
        self.model.add_sitemap(location, last_modified);
    }

    /// Replace all entries. No escaping is applied.
    pub fn reset_items(&mut self, items: Vec<Entry>) {
        self.model.reset_items(items);
    }

    /// Replace all sub-sitemap references.
    pub fn reset_sitemaps(&mut self, sitemaps: Vec<SitemapRef>) {
        self.model.reset_sitemaps(sitemaps);
    }

    /// Configure caching. `None` keeps the current key or duration.
    pub fn set_cache(&mut self, key: Option<&str>, duration: Option<Duration>, use_cache: bool) {
        if let Some(key) = key {
            self.model.set_cache_key(key);
        }
        if let Some(duration) = duration {
            self.model.set_cache_duration(duration);
        }
        self.model.set_use_cache(use_cache);
    }

    /// Whether caching is enabled and a snapshot is stored under the key.
    #[must_use]
    pub fn is_cached(&self) -> bool {
        cache_gate::is_cached(self.cache.as_ref(), &self.model)
    }
}
