//! In-memory collection of entries and sub-sitemap references.

use std::time::Duration;

use sitemap_config::SitemapConfig;

use crate::entry::{Entry, EntryParams, SitemapRef};
use crate::escape::escape_entry;

/// Entries, sub-sitemap references and generation options of one engine.
#[derive(Debug, Clone, Default)]
pub struct Model {
    pub(crate) items: Vec<Entry>,
    pub(crate) sitemaps: Vec<SitemapRef>,
    pub(crate) title: Option<String>,
    pub(crate) link: Option<String>,
    pub(crate) options: SitemapConfig,
}

impl Model {
    /// Create an empty model with `options`.
    #[must_use]
    pub fn new(options: SitemapConfig) -> Self {
        let mut model = Self {
            options,
            ..Self::default()
        };
        // Normalize a zero ceiling loaded from elsewhere
        model.set_max_size(model.options.max_size);
        model
    }

    /// Append an entry built from `params`.
    ///
    /// Text fields are escaped when escaping is enabled.
    pub fn add(&mut self, params: EntryParams) {
        let entry = Entry::from_params(params);
        let entry = if self.options.escaping {
            escape_entry(entry)
        } else {
            entry
        };
        self.items.push(entry);
    }

    /// Append one entry per element of `params`, in order.
    pub fn add_many(&mut self, params: impl IntoIterator<Item = EntryParams>) {
        for p in params {
            self.add(p);
        }
    }

    /// Append a sub-sitemap reference.
    pub fn add_sitemap(&mut self, location: impl Into<String>, last_modified: Option<String>) {
        self.sitemaps.push(SitemapRef::new(location, last_modified));
    }

    /// Replace all entries. No escaping is applied.
    pub fn reset_items(&mut self, items: Vec<Entry>) {
        self.items = items;
    }

    /// Replace all sub-sitemap references.
    pub fn reset_sitemaps(&mut self, sitemaps: Vec<SitemapRef>) {
        self.sitemaps = sitemaps;
    }

    #[must_use]
    pub fn items(&self) -> &[Entry] {
        &self.items
    }

    #[must_use]
    pub fn sitemaps(&self) -> &[SitemapRef] {
        &self.sitemaps
    }

    /// Drop every entry after the first `n`.
    pub fn limit_size(&mut self, n: usize) {
        self.items.truncate(n);
    }

    #[must_use]
    pub fn options(&self) -> &SitemapConfig {
        &self.options
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    #[must_use]
    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    pub fn set_link(&mut self, link: impl Into<String>) {
        self.link = Some(link.into());
    }

    pub fn set_use_cache(&mut self, use_cache: bool) {
        self.options.use_cache = use_cache;
    }

    pub fn set_cache_key(&mut self, key: impl Into<String>) {
        self.options.cache_key = key.into();
    }

    pub fn set_cache_duration(&mut self, duration: Duration) {
        self.options.cache_duration = duration.as_secs();
    }

    pub fn set_escaping(&mut self, escaping: bool) {
        self.options.escaping = escaping;
    }

    pub fn set_use_limit_size(&mut self, use_limit_size: bool) {
        self.options.use_limit_size = use_limit_size;
    }

    /// Set the custom item ceiling. `Some(0)` clears it.
    pub fn set_max_size(&mut self, max_size: Option<usize>) {
        self.options.max_size = max_size.filter(|max| *max > 0);
    }

    pub fn set_use_styles(&mut self, use_styles: bool) {
        self.options.use_styles = use_styles;
    }

    pub fn set_styles_location(&mut self, location: Option<String>) {
        self.options.styles_location = location;
    }

    pub fn set_use_gzip(&mut self, use_gzip: bool) {
        self.options.use_gzip = use_gzip;
    }

    pub fn set_testing(&mut self, testing: bool) {
        self.options.testing = testing;
    }
}
