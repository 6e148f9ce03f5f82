//! Terminal messages for the CLI.
//!
//! Everything goes to stderr so that stdout stays clean for piping.

use console::{Style, Term};
use sitemap_core::{StoreReport, StoredFile};

pub(crate) struct Output {
    term: Term,
    ok: Style,
    failure: Style,
    muted: Style,
}

impl Output {
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            ok: Style::new().green().bold(),
            failure: Style::new().red(),
            muted: Style::new().dim(),
        }
    }

    pub(crate) fn info(&self, msg: &str) {
        self.line(msg);
    }

    pub(crate) fn error(&self, msg: &str) {
        self.line(&self.failure.apply_to(msg).to_string());
    }

    /// Summarize the files written by a `store` call, root document first.
    pub(crate) fn report(&self, report: &StoreReport) {
        let count = report.files.len();
        let noun = if count == 1 { "file" } else { "files" };
        self.line(&format!("{} {count} {noun}", self.ok.apply_to("Wrote")));

        if let Some(root) = report.root() {
            self.line(&describe(root));
        }
        for chunk in report.chunks() {
            self.line(&self.muted.apply_to(describe(chunk)).to_string());
        }
    }

    // A closed terminal only loses messages.
    fn line(&self, text: &str) {
        if let Err(e) = self.term.write_line(text) {
            tracing::debug!(error = %e, "failed to write to terminal");
        }
    }
}

fn describe(file: &StoredFile) -> String {
    format!("  {} [{}] {} items", file.path.display(), file.format, file.items)
}
