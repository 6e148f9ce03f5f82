//! Template rendering for sitemap documents.
//!
//! The sitemap engine builds a JSON context (`items`, `sitemaps`, `channel`,
//! `style`) and asks a [`Renderer`] to turn it into markup for a named
//! template. [`TemplateRenderer`] ships one built-in template per output
//! format:
//!
//! | Template       | Document                                   |
//! |----------------|--------------------------------------------|
//! | `xml`          | `<urlset>` with image, video, xhtml links  |
//! | `google-news`  | `<urlset>` with `news:news` blocks         |
//! | `ror-rss`      | ROR feed as RSS 2.0                        |
//! | `ror-rdf`      | ROR feed as RDF                            |
//! | `html`         | Human-readable link list                   |
//! | `txt`          | One location per line                      |
//! | `sitemapindex` | `<sitemapindex>` of sub-sitemaps           |
//!
//! Unknown template names fall back to `xml`. Output is never auto-escaped:
//! values are escaped when entries are added, not when they are rendered.

use std::collections::HashMap;

use minijinja::{AutoEscape, Environment, ErrorKind};

/// Template used for names without a template of their own.
pub const FALLBACK_TEMPLATE: &str = "xml";

const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    ("xml", include_str!("../templates/xml.j2")),
    ("google-news", include_str!("../templates/google-news.j2")),
    ("ror-rss", include_str!("../templates/ror-rss.j2")),
    ("ror-rdf", include_str!("../templates/ror-rdf.j2")),
    ("html", include_str!("../templates/html.j2")),
    ("txt", include_str!("../templates/txt.j2")),
    ("sitemapindex", include_str!("../templates/sitemapindex.j2")),
];

/// Error returned when a document cannot be rendered.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Template failed to compile or evaluate.
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),
}

/// Turns a render context into document markup.
pub trait Renderer: Send + Sync {
    /// Render `template` with `context`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if the template cannot be evaluated.
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String, RenderError>;
}

/// [`Renderer`] backed by minijinja and the built-in sitemap templates.
///
/// Individual templates can be replaced with [`TemplateRenderer::with_template`].
pub struct TemplateRenderer {
    env: Environment<'static>,
    overrides: HashMap<String, String>,
}

impl TemplateRenderer {
    /// Create a renderer with the built-in templates.
    #[must_use]
    pub fn new() -> Self {
        Self::with_overrides(HashMap::new())
    }

    /// Replace (or add) the template called `name`.
    #[must_use]
    pub fn with_template(mut self, name: &str, source: &str) -> Self {
        self.overrides.insert(name.to_owned(), source.to_owned());
        Self::with_overrides(self.overrides)
    }

    fn with_overrides(overrides: HashMap<String, String>) -> Self {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);

        let sources = overrides.clone();
        env.set_loader(move |name| {
            if let Some(source) = sources.get(name) {
                return Ok(Some(source.clone()));
            }
            Ok(builtin_template(name).map(str::to_owned))
        });

        Self { env, overrides }
    }
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for TemplateRenderer {
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String, RenderError> {
        let tmpl = match self.env.get_template(template) {
            Ok(tmpl) => tmpl,
            Err(e) if e.kind() == ErrorKind::TemplateNotFound => {
                tracing::debug!(template, "no template for format, using {FALLBACK_TEMPLATE}");
                self.env.get_template(FALLBACK_TEMPLATE)?
            }
            Err(e) => return Err(e.into()),
        };
        let ctx = minijinja::Value::from_serialize(context);
        Ok(tmpl.render(ctx)?)
    }
}

fn builtin_template(name: &str) -> Option<&'static str> {
    BUILTIN_TEMPLATES
        .iter()
        .find(|(builtin, _)| *builtin == name)
        .map(|(_, source)| *source)
}
