//! Collection snapshots in the cache.
//!
//! With caching enabled, the first generation writes the live entry list (or
//! the reference list, for index documents) under the configured key. Later
//! generations substitute that snapshot for the live collection until it
//! expires.

use serde::{Deserialize, Serialize};
use sitemap_cache::{Cache, CacheError, CacheExt};

use crate::entry::{Entry, SitemapRef};
use crate::error::SitemapError;
use crate::format::Format;
use crate::model::Model;

/// Cached collection, tagged with what it holds.
///
/// One key serves every format, so an entry snapshot must never be read
/// back as a reference list or the other way round.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Snapshot {
    Items(Vec<Entry>),
    Sitemaps(Vec<SitemapRef>),
}

#[derive(Serialize)]
#[serde(rename_all = "lowercase")]
enum SnapshotRef<'a> {
    Items(&'a [Entry]),
    Sitemaps(&'a [SitemapRef]),
}

/// Substitute the cached snapshot for `format`, or store one on a miss.
///
/// A snapshot of the other kind counts as a miss and is replaced. Does
/// nothing while caching is disabled.
pub(crate) fn apply(cache: &dyn Cache, model: &mut Model, format: &Format) -> Result<(), SitemapError> {
    if !model.options.use_cache {
        return Ok(());
    }

    let key = model.options.cache_key.clone();
    let ttl = model.options.cache_ttl();

    match (read(cache, &key)?, format.is_index()) {
        (Some(Snapshot::Sitemaps(sitemaps)), true) => {
            tracing::debug!(key = %key, "sitemap index served from cache");
            model.sitemaps = sitemaps;
        }
        (Some(Snapshot::Items(items)), false) => {
            tracing::debug!(key = %key, "sitemap items served from cache");
            model.items = items;
        }
        (_, true) => {
            tracing::debug!(key = %key, count = model.sitemaps.len(), "caching sitemap index");
            cache.put_json(&key, &SnapshotRef::Sitemaps(&model.sitemaps), ttl)?;
        }
        (_, false) => {
            tracing::debug!(key = %key, count = model.items.len(), "caching sitemap items");
            cache.put_json(&key, &SnapshotRef::Items(&model.items), ttl)?;
        }
    }

    Ok(())
}

/// Whether caching is enabled and a snapshot is present.
pub(crate) fn is_cached(cache: &dyn Cache, model: &Model) -> bool {
    model.options.use_cache && cache.has(&model.options.cache_key)
}

/// Read a snapshot, treating an undecodable one as a miss.
fn read(cache: &dyn Cache, key: &str) -> Result<Option<Snapshot>, CacheError> {
    match cache.get_json(key) {
        Err(CacheError::Serialize(e)) => {
            tracing::warn!(key, error = %e, "unreadable cache snapshot, regenerating");
            Ok(None)
        }
        other => other,
    }
}
