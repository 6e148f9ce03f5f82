//! Writing sitemaps to storage.
//!
//! Storing runs the partitioner first. A collection that fits is written as
//! one file. An oversized one is either truncated or split into
//! `{filename}-{k}` chunk files, each stored through the same pipeline,
//! followed by a `sitemapindex` under the original filename that lists them.

use std::io::Write;
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::write::GzEncoder;
use sitemap_config::APP_URL_KEY;

use crate::entry::{Entry, SitemapRef};
use crate::error::SitemapError;
use crate::format::Format;
use crate::partition::{self, Plan};
use crate::Sitemap;

/// Files written by one [`Sitemap::store`] call, in write order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreReport {
    pub files: Vec<StoredFile>,
}

impl StoreReport {
    /// The last file written: the index when the collection was split.
    #[must_use]
    pub fn root(&self) -> Option<&StoredFile> {
        self.files.last()
    }

    /// Chunk files listed by the index, empty unless the collection was split.
    #[must_use]
    pub fn chunks(&self) -> &[StoredFile] {
        match self.files.split_last() {
            Some((root, chunks)) if root.format == Format::SitemapIndex.as_str() => chunks,
            _ => &[],
        }
    }
}

/// One written file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    /// Target path handed to the storage backend.
    pub path: PathBuf,
    /// Format of the document.
    pub format: String,
    /// Number of entries (or references, for an index) in the document.
    pub items: usize,
}

impl Sitemap {
    /// Write the collection as `format` to `{path}/{filename}.{ext}`.
    ///
    /// Without `path` files go to the public directory. The extension is
    /// `txt` or `html` for those formats and `xml` otherwise, with `.gz`
    /// appended when gzip is enabled.
    ///
    /// Caching is bypassed. Entries are cleared afterwards; references are
    /// cleared too when `format` is `sitemapindex`.
    pub fn store(
        &mut self,
        format: &str,
        filename: &str,
        path: Option<&Path>,
        style: Option<&str>,
    ) -> Result<StoreReport, SitemapError> {
        let format = Format::parse(format);
        let items = std::mem::take(&mut self.model.items);
        let sitemaps = if format.is_index() {
            std::mem::take(&mut self.model.sitemaps)
        } else {
            Vec::new()
        };

        let mut report = StoreReport::default();
        self.store_collection(&format, filename, path, style, items, &sitemaps, &mut report)?;
        Ok(report)
    }

    /// Write `items` (or `sitemaps`, for an index) and record the files.
    #[allow(clippy::too_many_arguments)]
    fn store_collection(
        &mut self,
        format: &Format,
        filename: &str,
        path: Option<&Path>,
        style: Option<&str>,
        mut items: Vec<Entry>,
        sitemaps: &[SitemapRef],
        report: &mut StoreReport,
    ) -> Result<(), SitemapError> {
        let ext = format.extension(self.model.options.use_gzip);
        let plan = partition::plan(
            items.len(),
            format,
            self.model.options.max_size,
            self.model.options.use_limit_size,
        );

        self.resolve_channel();

        let index_format = Format::SitemapIndex;
        let (document, written, count) = match plan {
            Plan::Single | Plan::Truncate(_) => {
                if let Plan::Truncate(limit) = plan {
                    tracing::info!(%format, limit, count = items.len(), "truncating sitemap");
                    items.truncate(limit);
                }
                let count = if format.is_index() {
                    sitemaps.len()
                } else {
                    items.len()
                };
                let document = self.render_document(format, style, &items, sitemaps)?;
                (document, format.as_str(), count)
            }
            Plan::Split { chunk_size } => {
                if chunk_size > format.ceiling() {
                    tracing::warn!(
                        %format,
                        chunk_size,
                        ceiling = format.ceiling(),
                        "max_size exceeds the format ceiling, chunks will be indexes of indexes"
                    );
                }
                let chunks = partition::split(items, chunk_size);
                tracing::info!(
                    %format,
                    chunks = chunks.len(),
                    chunk_size,
                    "splitting sitemap"
                );

                let mut index = Vec::with_capacity(chunks.len());
                for (k, chunk) in chunks.into_iter().enumerate() {
                    let name = partition::chunk_name(filename, k);
                    tracing::debug!(chunk = k, items = chunk.len(), "storing chunk");
                    self.store_collection(format, &name, path, style, chunk, &[], report)?;
                    index.push(SitemapRef::new(
                        self.chunk_location(&name, &ext, path.is_some()),
                        None,
                    ));
                }

                let document = self.render_document(&index_format, style, &[], &index)?;
                (document, index_format.as_str(), index.len())
            }
        };

        let target = path
            .unwrap_or(&self.public_dir)
            .join(format!("{filename}.{ext}"));
        let content = if self.model.options.use_gzip {
            gzip(document.content.as_bytes())?
        } else {
            document.content.into_bytes()
        };
        self.storage.write(&target, &content)?;
        tracing::info!(path = %target.display(), items = count, "wrote sitemap");

        report.files.push(StoredFile {
            path: target,
            format: written.to_owned(),
            items: count,
        });
        Ok(())
    }

    /// Index location of chunk file `{name}.{ext}`.
    ///
    /// Relative to the index when stored under a custom path, otherwise an
    /// absolute URL below the site's base URL.
    fn chunk_location(&self, name: &str, ext: &str, custom_path: bool) -> String {
        let file = format!("{name}.{ext}");
        if custom_path {
            return file;
        }
        match self.config.get(APP_URL_KEY) {
            Some(url) => format!("{}/{file}", url.trim_end_matches('/')),
            None => format!("/{file}"),
        }
    }
}

/// Gzip `content` at the highest compression level.
fn gzip(content: &[u8]) -> Result<Vec<u8>, SitemapError> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(content).map_err(SitemapError::Compress)?;
    encoder.finish().map_err(SitemapError::Compress)
}
