//! XML escaping of entry text fields.

use quick_xml::escape::partial_escape;

use crate::entry::{Attributes, Entry};

/// Escape `&`, `<` and `>` in `value`.
///
/// Quotes are left alone.
///
/// ```
/// assert_eq!(sitemap_core::escape("<a>&b"), "&lt;a&gt;&amp;b");
/// ```
#[must_use]
pub fn escape(value: &str) -> String {
    partial_escape(value).into_owned()
}

/// Escape every text field of `entry` that ends up inside markup.
pub(crate) fn escape_entry(mut entry: Entry) -> Entry {
    entry.location = escape(&entry.location);
    entry.title = entry.title.as_deref().map(escape);

    for attributes in entry
        .images
        .iter_mut()
        .chain(&mut entry.translations)
        .chain(&mut entry.alternates)
    {
        escape_all(attributes);
    }

    for video in &mut entry.videos {
        for key in ["title", "description"] {
            if let Some(value) = video.get_mut(key)
                && !value.is_empty()
            {
                *value = escape(value);
            }
        }
    }

    entry.news.site_name = escape(&entry.news.site_name);
    entry
}

fn escape_all(attributes: &mut Attributes) {
    for value in attributes.values_mut() {
        *value = escape(value);
    }
}
