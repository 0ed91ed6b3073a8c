//! Dates from HTTP response headers.

use datesift::DateType;

use super::extractor::DateExtractor;
use crate::config::DEFAULT_HTTP_HEADERS;
use crate::types::{Candidate, DateSource};

/// Reads configured headers such as `Last-Modified`.
///
/// Header dates describe the response rather than the document, so they
/// are tagged [`DateType::Meta`]. The offset is the header's index in the
/// source; the label is its configured name.
#[derive(Debug, Clone)]
pub struct HttpHeaderExtractor {
    names: Vec<String>,
}

impl Default for HttpHeaderExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_HTTP_HEADERS.iter().copied())
    }
}

impl HttpHeaderExtractor {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            names: names
                .into_iter()
                .map(|n| n.as_ref().trim().to_ascii_lowercase())
                .filter(|n| !n.is_empty())
                .collect(),
        }
    }
}

impl DateExtractor for HttpHeaderExtractor {
    fn name(&self) -> &str {
        "http-header"
    }

    fn provenance(&self) -> DateType {
        DateType::Meta
    }

    fn extract(&self, source: &DateSource) -> Vec<Candidate> {
        source
            .headers
            .iter()
            .enumerate()
            .filter_map(|(index, (name, value))| {
                let name = self
                    .names
                    .iter()
                    .find(|n| n.eq_ignore_ascii_case(name.trim()))?;
                let value = value.trim();
                (!value.is_empty()).then(|| Candidate::new(value, index).with_label(name.as_str()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_headers() {
        let source = DateSource::new()
            .with_header("Content-Type", "text/html")
            .with_header("Last-Modified", "Wed, 30 Jun 2010 08:15:00 GMT")
            .with_header("DATE", " Thu, 01 Jul 2010 00:00:00 GMT ")
            .with_header("Expires", "Fri, 02 Jul 2010 00:00:00 GMT")
            .with_header("Server", "nginx");
        let found = HttpHeaderExtractor::default().extract(&source);
        assert_eq!(found.len(), 3);
        assert_eq!(found[0].text, "Wed, 30 Jun 2010 08:15:00 GMT");
        assert_eq!(found[0].offset, 1);
        assert_eq!(found[0].label.as_deref(), Some("last-modified"));
        assert_eq!(found[1].text, "Thu, 01 Jul 2010 00:00:00 GMT");
        assert_eq!(found[1].label.as_deref(), Some("date"));
        assert_eq!(found[2].offset, 3);
    }

    #[test]
    fn test_custom_names() {
        let source = DateSource::new().with_header("X-Archived-At", "Fri, 02 Jul 2010 00:00:00 GMT");
        assert_eq!(HttpHeaderExtractor::new(["x-archived-at"]).extract(&source).len(), 1);
        assert!(HttpHeaderExtractor::new(Vec::<String>::new()).extract(&source).is_empty());
    }
}
