//! Document generation.

use serde::Serialize;
use sitemap_config::APP_URL_KEY;

use crate::entry::{Entry, SitemapRef};
use crate::error::SitemapError;
use crate::format::Format;
use crate::response::SitemapResponse;
use crate::{Sitemap, cache_gate, partition};

/// A rendered sitemap document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Document markup.
    pub content: String,
    /// `Content-Type` header value (e.g. `text/xml; charset=utf-8`).
    pub content_type: String,
}

/// Title and link of the sitemap, for feed and HTML formats.
#[derive(Debug, Serialize)]
struct Channel<'a> {
    title: &'a str,
    link: &'a str,
}

/// Variables handed to the template.
#[derive(Serialize)]
struct RenderContext<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    items: Option<&'a [Entry]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sitemaps: Option<&'a [SitemapRef]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    channel: Option<Channel<'a>>,
    style: Option<&'a str>,
}

impl Sitemap {
    /// Render the collection as a single `format` document.
    ///
    /// Collections above the applicable ceiling are truncated, never split.
    /// With caching enabled the first call snapshots the collection and later
    /// calls render the snapshot instead.
    ///
    /// `style` replaces the stylesheet lookup while styles are enabled.
    pub fn generate(&mut self, format: &str, style: Option<&str>) -> Result<Document, SitemapError> {
        let format = Format::parse(format);

        // Snapshots hold the uncapped collection; the cap is per format.
        cache_gate::apply(self.cache.as_ref(), &mut self.model, &format)?;

        if let Some(limit) = partition::cap(
            self.model.items.len(),
            &format,
            self.model.options.max_size,
        ) {
            tracing::debug!(%format, limit, count = self.model.items.len(), "truncating items");
            self.model.limit_size(limit);
        }

        self.resolve_channel();
        self.render_document(&format, style, &self.model.items, &self.model.sitemaps)
    }

    /// [`Sitemap::generate`] wrapped in an HTTP response.
    pub fn render(
        &mut self,
        format: &str,
        style: Option<&str>,
    ) -> Result<SitemapResponse, SitemapError> {
        let document = self.generate(format, style)?;
        Ok(SitemapResponse::ok(document))
    }

    /// Fill in the default link and title.
    ///
    /// The link defaults to the configured site URL, the title to
    /// `Sitemap for {link}`.
    pub(crate) fn resolve_channel(&mut self) {
        if self.model.link.as_deref().is_none_or(str::is_empty) {
            self.model.link = self.config.get(APP_URL_KEY);
        }
        if self.model.title.as_deref().is_none_or(str::is_empty) {
            let link = self.model.link.as_deref().unwrap_or_default();
            self.model.title = Some(format!("Sitemap for {link}"));
        }
    }

    /// Render `items` or `sitemaps` as one `format` document.
    ///
    /// No truncation or caching happens here. Call
    /// [`Sitemap::resolve_channel`] first.
    pub(crate) fn render_document(
        &self,
        format: &Format,
        style: Option<&str>,
        items: &[Entry],
        sitemaps: &[SitemapRef],
    ) -> Result<Document, SitemapError> {
        let style = self.resolve_style(format, style);

        let context = RenderContext {
            items: (!format.is_index()).then_some(items),
            sitemaps: format.is_index().then_some(sitemaps),
            channel: format.has_channel().then(|| Channel {
                title: self.model.title.as_deref().unwrap_or_default(),
                link: self.model.link.as_deref().unwrap_or_default(),
            }),
            style: style.as_deref(),
        };
        let context = serde_json::to_value(&context)?;

        let content = self.renderer.render(format.template_name(), &context)?;
        Ok(Document {
            content,
            content_type: format.content_type_header(),
        })
    }

    /// Stylesheet href for `format`, if styles are enabled and one exists.
    ///
    /// A caller-supplied `style` is used as is. Otherwise the stylesheet is
    /// `{styles_location}{format}.xsl`, looked up below the public directory.
    /// The override wins over the lookup even when no stylesheet exists
    /// under `styles_location`; only `use_styles = false` discards it.
    fn resolve_style(&self, format: &Format, style: Option<&str>) -> Option<String> {
        if !self.model.options.use_styles {
            return None;
        }
        if let Some(style) = style {
            return Some(style.to_owned());
        }

        let location = self.model.options.styles_location.as_deref()?;
        let href = format!("{location}{format}.xsl");
        let file = self.public_dir.join(href.trim_start_matches('/'));
        if self.storage.exists(&file) {
            Some(href)
        } else {
            tracing::debug!(path = %file.display(), "no stylesheet");
            None
        }
    }
}
