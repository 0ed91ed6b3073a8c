//! Types shared across extractors and the harvester.

use datesift::{ConfigError, DateFormat};
use thiserror::Error;

/// A substring suspected to be a date, before parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub text: String,
    /// Character offset for text and URL sources, element index for DOM
    /// sources, header index for HTTP headers.
    pub offset: usize,
    /// Where the candidate came from: a meta name, element, or header.
    pub label: Option<String>,
    /// Format already recognized while scanning, if any.
    pub format_hint: Option<DateFormat>,
}

impl Candidate {
    pub fn new(text: impl Into<String>, offset: usize) -> Self {
        Self {
            text: text.into(),
            offset,
            label: None,
            format_hint: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_format_hint(mut self, format: DateFormat) -> Self {
        self.format_hint = Some(format);
        self
    }
}

/// Already-fetched material describing one document.
///
/// Every part is optional; extractors skip what is missing.
#[derive(Debug, Clone, Default)]
pub struct DateSource {
    pub url: Option<String>,
    pub html: Option<String>,
    /// Plain body text; takes precedence over `html` for content scanning.
    pub text: Option<String>,
    /// HTTP response headers as (name, value) pairs.
    pub headers: Vec<(String, String)>,
    /// Archive snapshot banners, isolated by the caller.
    pub archive_snippets: Vec<String>,
    /// Reference labels such as "last modified ...", isolated by the caller.
    pub reference_snippets: Vec<String>,
}

impl DateSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.html = Some(html.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_archive_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.archive_snippets.push(snippet.into());
        self
    }

    pub fn with_reference_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.reference_snippets.push(snippet.into());
        self
    }
}

/// Errors setting up extractors.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("invalid CSS selector: {0}")]
    InvalidSelector(String),

    #[error("pattern bank has day_first={bank_day_first} but the parser config has day_first={config_day_first}")]
    BankMismatch {
        bank_day_first: bool,
        config_day_first: bool,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}
