//! Sitemap entries and sub-sitemap references.
//!
//! [`Entry`] is the stored form of one URL record. Its serde names (`loc`,
//! `lastmod`, `freq`, `googlenews`, ...) are what templates see and what
//! cache snapshots contain. [`EntryParams`] is the caller-facing input with
//! every field optional; [`Entry::from_params`] applies the defaults.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Location used for entries added without one.
pub const DEFAULT_LOCATION: &str = "/";

/// Default news publication language.
pub const DEFAULT_NEWS_LANGUAGE: &str = "en";

/// Format of the default news publication date.
const PUBLICATION_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Attribute map of an image, translation, alternate or video.
///
/// Keys are template-facing (`url`, `caption`, `language`, `media`, ...).
pub type Attributes = BTreeMap<String, String>;

/// One URL record of a sitemap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Page URL.
    #[serde(rename = "loc")]
    pub location: String,
    /// Last modification time, passed through verbatim.
    #[serde(rename = "lastmod")]
    pub last_modified: Option<String>,
    /// Crawl priority (e.g. `"0.8"`).
    pub priority: Option<String>,
    /// Change frequency (e.g. `"daily"`).
    #[serde(rename = "freq")]
    pub change_frequency: Option<String>,
    /// Page title.
    pub title: Option<String>,
    #[serde(default)]
    pub images: Vec<Attributes>,
    #[serde(default)]
    pub translations: Vec<Attributes>,
    #[serde(default)]
    pub alternates: Vec<Attributes>,
    #[serde(default)]
    pub videos: Vec<Attributes>,
    /// Google News publication metadata.
    #[serde(rename = "googlenews", default)]
    pub news: NewsMeta,
}

/// Google News publication metadata of an [`Entry`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsMeta {
    /// Publication name.
    #[serde(rename = "sitename")]
    pub site_name: String,
    /// Publication language (ISO 639).
    pub language: String,
    /// Publication date (`YYYY-MM-DD HH:MM:SS` unless supplied).
    pub publication_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genres: Option<String>,
}

impl Default for NewsMeta {
    fn default() -> Self {
        Self::from_params(NewsParams::default())
    }
}

impl NewsMeta {
    fn from_params(params: NewsParams) -> Self {
        Self {
            site_name: params.site_name.unwrap_or_default(),
            language: params
                .language
                .unwrap_or_else(|| DEFAULT_NEWS_LANGUAGE.to_owned()),
            publication_date: params.publication_date.unwrap_or_else(|| {
                chrono::Local::now()
                    .format(PUBLICATION_DATE_FORMAT)
                    .to_string()
            }),
            keywords: params.keywords,
            genres: params.genres,
        }
    }
}

/// One `<sitemap>` reference of a sitemap index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SitemapRef {
    /// Location of the referenced sitemap.
    #[serde(rename = "loc")]
    pub location: String,
    #[serde(rename = "lastmod")]
    pub last_modified: Option<String>,
}

impl SitemapRef {
    /// Create a reference to the sitemap at `location`.
    #[must_use]
    pub fn new(location: impl Into<String>, last_modified: Option<String>) -> Self {
        Self {
            location: location.into(),
            last_modified,
        }
    }
}

/// Input fields of one entry.
///
/// Deserializes from the same names an [`Entry`] serializes to; the longer
/// field names are accepted as aliases.
///
/// ```
/// use sitemap_core::EntryParams;
///
/// let params = EntryParams {
///     priority: Some("0.8".to_owned()),
///     ..EntryParams::new("https://example.com/about")
/// };
/// assert_eq!(params.location.as_deref(), Some("https://example.com/about"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EntryParams {
    #[serde(rename = "loc", alias = "location")]
    pub location: Option<String>,
    #[serde(rename = "lastmod", alias = "last_modified")]
    pub last_modified: Option<String>,
    pub priority: Option<String>,
    #[serde(rename = "freq", alias = "change_frequency")]
    pub change_frequency: Option<String>,
    pub title: Option<String>,
    pub images: Vec<Attributes>,
    pub translations: Vec<Attributes>,
    pub alternates: Vec<Attributes>,
    pub videos: Vec<Attributes>,
    #[serde(rename = "googlenews", alias = "news")]
    pub news: NewsParams,
}

impl EntryParams {
    /// Params with only a location set.
    #[must_use]
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: Some(location.into()),
            ..Self::default()
        }
    }
}

/// Input fields of an entry's news metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NewsParams {
    #[serde(rename = "sitename", alias = "site_name")]
    pub site_name: Option<String>,
    pub language: Option<String>,
    pub publication_date: Option<String>,
    pub keywords: Option<String>,
    pub genres: Option<String>,
}

impl Entry {
    /// Build an entry from `params`, filling in defaults.
    ///
    /// A missing location becomes [`DEFAULT_LOCATION`].
    #[must_use]
    pub fn from_params(params: EntryParams) -> Self {
        let location = params.location.unwrap_or_else(|| {
            tracing::warn!("entry without location, using {DEFAULT_LOCATION}");
            DEFAULT_LOCATION.to_owned()
        });

        Self {
            location,
            last_modified: params.last_modified,
            priority: params.priority,
            change_frequency: params.change_frequency,
            title: params.title,
            images: params.images,
            translations: params.translations,
            alternates: params.alternates,
            videos: params.videos,
            news: NewsMeta::from_params(params.news),
        }
    }
}

impl From<EntryParams> for Entry {
    fn from(params: EntryParams) -> Self {
        Self::from_params(params)
    }
}
