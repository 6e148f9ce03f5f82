//! Output formats.

use std::fmt;

/// Item ceiling of a `google-news` document.
pub const GOOGLE_NEWS_CEILING: usize = 1000;

/// Item ceiling of every other document.
pub const DEFAULT_CEILING: usize = 50_000;

/// Sitemap output format.
///
/// Parsed from its name with [`Format::parse`]; names without a variant of
/// their own are kept as [`Format::Other`] and rendered as generic XML.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Format {
    Xml,
    GoogleNews,
    RorRss,
    RorRdf,
    Html,
    Txt,
    SitemapIndex,
    Other(String),
}

impl Format {
    /// Parse a format name (`"xml"`, `"google-news"`, `"sitemapindex"`, ...).
    #[must_use]
    pub fn parse(name: &str) -> Self {
        match name {
            "xml" => Self::Xml,
            "google-news" => Self::GoogleNews,
            "ror-rss" => Self::RorRss,
            "ror-rdf" => Self::RorRdf,
            "html" => Self::Html,
            "txt" => Self::Txt,
            "sitemapindex" => Self::SitemapIndex,
            other => Self::Other(other.to_owned()),
        }
    }

    /// Format name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Xml => "xml",
            Self::GoogleNews => "google-news",
            Self::RorRss => "ror-rss",
            Self::RorRdf => "ror-rdf",
            Self::Html => "html",
            Self::Txt => "txt",
            Self::SitemapIndex => "sitemapindex",
            Self::Other(name) => name,
        }
    }

    /// Name of the template that renders this format.
    #[must_use]
    pub fn template_name(&self) -> &str {
        self.as_str()
    }

    /// MIME type of the rendered document.
    #[must_use]
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::RorRss => "text/rss+xml",
            Self::RorRdf => "text/rdf+xml",
            Self::Html => "text/html",
            Self::Txt => "text/plain",
            _ => "text/xml",
        }
    }

    /// `Content-Type` header value, with charset.
    #[must_use]
    pub fn content_type_header(&self) -> String {
        format!("{}; charset=utf-8", self.content_type())
    }

    /// File extension of stored documents, `.gz` suffixed when gzipped.
    #[must_use]
    pub fn extension(&self, gzip: bool) -> String {
        let ext = match self {
            Self::Txt => "txt",
            Self::Html => "html",
            _ => "xml",
        };
        if gzip { format!("{ext}.gz") } else { ext.to_owned() }
    }

    /// Built-in maximum number of items per document.
    #[must_use]
    pub fn ceiling(&self) -> usize {
        match self {
            Self::GoogleNews => GOOGLE_NEWS_CEILING,
            _ => DEFAULT_CEILING,
        }
    }

    /// Whether the template receives `channel` (title and link).
    pub(crate) fn has_channel(&self) -> bool {
        matches!(self, Self::RorRss | Self::RorRdf | Self::Html)
    }

    pub(crate) fn is_index(&self) -> bool {
        matches!(self, Self::SitemapIndex)
    }
}

impl From<&str> for Format {
    fn from(name: &str) -> Self {
        Self::parse(name)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
