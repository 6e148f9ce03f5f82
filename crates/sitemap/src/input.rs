//! Entry list files.
//!
//! An input file is either a bare list of entries or a mapping with
//! `entries` and `sitemaps` lists. Files ending in `.yaml`/`.yml` are read as
//! YAML, everything else as JSON.
//!
//! ```yaml
//! entries:
//!   - loc: https://example.com/
//!     priority: "1.0"
//!     freq: daily
//! sitemaps:
//!   - loc: https://example.com/blog/sitemap.xml
//! ```

use std::path::Path;

use serde::Deserialize;
use sitemap_core::{EntryParams, SitemapRef};

use crate::error::CliError;

/// Entries and sub-sitemap references read from an input file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Input {
    pub(crate) entries: Vec<EntryParams>,
    pub(crate) sitemaps: Vec<SitemapRef>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum InputFile {
    List(Vec<EntryParams>),
    Document {
        #[serde(default)]
        entries: Vec<EntryParams>,
        #[serde(default)]
        sitemaps: Vec<SitemapRef>,
    },
}

impl From<InputFile> for Input {
    fn from(file: InputFile) -> Self {
        match file {
            InputFile::List(entries) => Self {
                entries,
                sitemaps: Vec::new(),
            },
            InputFile::Document { entries, sitemaps } => Self { entries, sitemaps },
        }
    }
}

/// Read an input file.
pub(crate) fn load(path: &Path) -> Result<Input, CliError> {
    let content = std::fs::read_to_string(path)?;
    let invalid = |message: String| CliError::Input {
        path: path.display().to_string(),
        message,
    };

    let file: InputFile = match path.extension().and_then(|e| e.to_str()) {
        Some("yaml" | "yml") => {
            serde_yaml::from_str(&content).map_err(|e| invalid(e.to_string()))?
        }
        _ => serde_json::from_str(&content).map_err(|e| invalid(e.to_string()))?,
    };
    let input = Input::from(file);
    tracing::debug!(
        path = %path.display(),
        entries = input.entries.len(),
        sitemaps = input.sitemaps.len(),
        "loaded input"
    );
    Ok(input)
}
