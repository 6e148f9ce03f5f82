//! Partitioning of oversized collections.
//!
//! A custom `max_size` wins over the format ceiling whenever the item count
//! exceeds it. Above the applicable ceiling the collection is either
//! truncated (`use_limit_size`) or split into equal chunks plus an index.

use crate::format::Format;

/// How a collection of a given size is written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plan {
    /// One document with every item.
    Single,
    /// One document with only the first `n` items.
    Truncate(usize),
    /// Chunk documents of at most `chunk_size` items, plus an index.
    Split { chunk_size: usize },
}

/// Decide how `count` items of `format` are written.
///
/// Index documents are never partitioned. A `max_size` of zero counts as
/// unset.
#[must_use]
pub fn plan(count: usize, format: &Format, max_size: Option<usize>, use_limit_size: bool) -> Plan {
    if format.is_index() {
        return Plan::Single;
    }

    let ceiling = match max_size.filter(|max| *max > 0) {
        Some(max) if count > max => max,
        _ => format.ceiling(),
    };

    if count <= ceiling {
        Plan::Single
    } else if use_limit_size {
        Plan::Truncate(ceiling)
    } else {
        Plan::Split {
            chunk_size: ceiling,
        }
    }
}

/// Item count a single rendered document is capped at, if `count` exceeds
/// the applicable ceiling.
#[must_use]
pub fn cap(count: usize, format: &Format, max_size: Option<usize>) -> Option<usize> {
    match plan(count, format, max_size, true) {
        Plan::Truncate(n) => Some(n),
        Plan::Single | Plan::Split { .. } => None,
    }
}

/// Base filename of chunk `index` (`sitemap` -> `sitemap-0`).
#[must_use]
pub fn chunk_name(filename: &str, index: usize) -> String {
    format!("{filename}-{index}")
}

/// Split `items` into consecutive chunks of at most `chunk_size`, keeping
/// order.
pub(crate) fn split<T>(items: Vec<T>, chunk_size: usize) -> Vec<Vec<T>> {
    let chunk_size = chunk_size.max(1);
    let mut chunks = Vec::with_capacity(items.len().div_ceil(chunk_size));
    let mut rest = items.into_iter().peekable();
    while rest.peek().is_some() {
        chunks.push(rest.by_ref().take(chunk_size).collect());
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_within_ceiling_is_single() {
        assert_eq!(plan(50_000, &Format::Xml, None, false), Plan::Single);
        assert_eq!(plan(1000, &Format::GoogleNews, None, false), Plan::Single);
        assert_eq!(plan(0, &Format::Txt, None, false), Plan::Single);
    }

    #[test]
    fn test_builtin_ceiling() {
        assert_eq!(
            plan(50_001, &Format::Xml, None, false),
            Plan::Split { chunk_size: 50_000 }
        );
        assert_eq!(
            plan(1001, &Format::GoogleNews, None, false),
            Plan::Split { chunk_size: 1000 }
        );
        assert_eq!(plan(1001, &Format::GoogleNews, None, true), Plan::Truncate(1000));
        assert_eq!(plan(1001, &Format::Html, None, true), Plan::Single);
    }

    #[test]
    fn test_max_size_wins_over_ceiling() {
        assert_eq!(
            plan(11, &Format::Xml, Some(5), false),
            Plan::Split { chunk_size: 5 }
        );
        assert_eq!(plan(11, &Format::GoogleNews, Some(5), true), Plan::Truncate(5));
        assert_eq!(
            plan(2000, &Format::GoogleNews, Some(1500), false),
            Plan::Split { chunk_size: 1500 }
        );
    }

    #[test]
    fn test_max_size_not_exceeded_falls_back_to_ceiling() {
        assert_eq!(
            plan(60_000, &Format::Xml, Some(100_000), false),
            Plan::Split { chunk_size: 50_000 }
        );
        assert_eq!(plan(5, &Format::Xml, Some(5), false), Plan::Single);
    }

    #[test]
    fn test_zero_max_size_is_unset() {
        assert_eq!(plan(10, &Format::Xml, Some(0), false), Plan::Single);
    }

    #[test]
    fn test_index_never_partitioned() {
        assert_eq!(plan(60_000, &Format::SitemapIndex, Some(5), false), Plan::Single);
        assert_eq!(cap(60_000, &Format::SitemapIndex, None), None);
    }

    #[test]
    fn test_cap() {
        assert_eq!(cap(120_001, &Format::Xml, None), Some(50_000));
        assert_eq!(cap(1500, &Format::GoogleNews, None), Some(1000));
        assert_eq!(cap(30, &Format::Xml, Some(10)), Some(10));
        assert_eq!(cap(10, &Format::Xml, Some(10)), None);
    }

    #[test]
    fn test_chunk_name() {
        assert_eq!(chunk_name("sitemap", 0), "sitemap-0");
        assert_eq!(chunk_name("sitemap-1", 2), "sitemap-1-2");
    }

    #[test]
    fn test_split_preserves_order() {
        let chunks = split((0..11).collect(), 5);

        assert_eq!(chunks, vec![vec![0, 1, 2, 3, 4], vec![5, 6, 7, 8, 9], vec![10]]);
    }

    #[test]
    fn test_split_empty() {
        assert!(split(Vec::<u8>::new(), 5).is_empty());
    }
}
