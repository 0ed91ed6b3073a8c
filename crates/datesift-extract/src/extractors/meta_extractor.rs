//! Publication dates from HTML `<meta>` tags.

use std::sync::LazyLock;

use datesift::{DateType, PatternBank};
use scraper::{Html, Selector};
use tracing::trace;

use super::extractor::DateExtractor;
use crate::config::DEFAULT_META_TAGS;
use crate::types::{Candidate, DateSource};

static META: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("meta[content]").expect("meta selector should compile"));

/// Attributes that may carry the meta key.
const KEY_ATTRS: [&str; 4] = ["property", "name", "itemprop", "http-equiv"];

/// Picks the single most trusted `<meta>` tag whose content matches a
/// known date format.
///
/// Tags whose content no pattern recognizes (epoch seconds, free text)
/// are passed over so a less trusted tag can still supply the date.
#[derive(Debug, Clone)]
pub struct MetaTagExtractor<'a> {
    bank: &'a PatternBank,
    /// Lowercased keys, most trusted first.
    tags: Vec<String>,
}

impl<'a> MetaTagExtractor<'a> {
    pub fn new<I, S>(bank: &'a PatternBank, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            bank,
            tags: tags
                .into_iter()
                .map(|t| t.as_ref().trim().to_lowercase())
                .filter(|t| !t.is_empty())
                .collect(),
        }
    }

    /// Extractor reading [`DEFAULT_META_TAGS`].
    pub fn with_default_tags(bank: &'a PatternBank) -> Self {
        Self::new(bank, DEFAULT_META_TAGS.iter().copied())
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Best candidate in a parsed document.
    ///
    /// The offset is the index of the tag among `<meta>` elements with
    /// content; the label is the matched key and the format hint is the
    /// pattern its content matched.
    pub fn extract_from_document(&self, document: &Html) -> Option<Candidate> {
        let mut best: Option<(usize, Candidate)> = None;
        for (index, element) in document.select(&META).enumerate() {
            let Some(content) = element.value().attr("content").map(str::trim) else {
                continue;
            };
            if content.is_empty() {
                continue;
            }
            let Some((rank, key)) = KEY_ATTRS
                .iter()
                .filter_map(|attr| element.value().attr(attr))
                .find_map(|key| {
                    let key = key.trim().to_lowercase();
                    self.rank(&key).map(|rank| (rank, key))
                })
            else {
                continue;
            };
            if !best.as_ref().map_or(true, |(best_rank, _)| rank < *best_rank) {
                continue;
            }
            let Some(entry) = self.bank.find_matching_pattern(content) else {
                trace!(key = %key, content, "meta tag content is not a date");
                continue;
            };
            trace!(key = %key, content, "meta date tag");
            let candidate = Candidate::new(content, index)
                .with_label(key)
                .with_format_hint(entry.format());
            best = Some((rank, candidate));
        }
        best.map(|(_, candidate)| candidate)
    }

    fn rank(&self, key: &str) -> Option<usize> {
        self.tags.iter().position(|t| t == key)
    }
}

impl DateExtractor for MetaTagExtractor<'_> {
    fn name(&self) -> &str {
        "meta"
    }

    fn provenance(&self) -> DateType {
        DateType::Meta
    }

    fn extract(&self, source: &DateSource) -> Vec<Candidate> {
        let Some(html) = &source.html else {
            return Vec::new();
        };
        let document = Html::parse_document(html);
        self.extract_from_document(&document).into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use datesift::{BankOptions, DateFormat};

    use super::*;

    const PAGE: &str = r#"<html><head>
        <meta name="description" content="Launched 2001-01-01">
        <meta name="date" content="2010-06-29">
        <meta property="article:modified_time" content="2011-02-03T10:00:00Z">
        <meta property="og:published_time" content=" 2010-06-30T08:15:00+02:00 ">
        <meta name="pubdate" content="">
    </head><body></body></html>"#;

    fn bank() -> &'static PatternBank {
        PatternBank::shared(BankOptions::default())
    }

    #[test]
    fn test_most_trusted_tag_wins() {
        let document = Html::parse_document(PAGE);
        let candidate = MetaTagExtractor::with_default_tags(bank())
            .extract_from_document(&document)
            .unwrap();
        assert_eq!(candidate.text, "2010-06-30T08:15:00+02:00");
        assert_eq!(candidate.label.as_deref(), Some("og:published_time"));
        assert_eq!(candidate.offset, 3);
        assert_eq!(candidate.format_hint, Some(DateFormat::IsoDateTime));
    }

    #[test]
    fn test_unrecognized_content_falls_back() {
        let document = Html::parse_document(
            r#"<meta property="article:published_time" content="1277885700">
            <meta name="dc.date" content="2010-06-30">"#,
        );
        let candidate = MetaTagExtractor::with_default_tags(bank())
            .extract_from_document(&document)
            .unwrap();
        assert_eq!(candidate.text, "2010-06-30");
        assert_eq!(candidate.label.as_deref(), Some("dc.date"));
        assert_eq!(candidate.offset, 1);

        let only_epoch = Html::parse_document(r#"<meta name="pubdate" content="1277885700">"#);
        assert!(MetaTagExtractor::with_default_tags(bank())
            .extract_from_document(&only_epoch)
            .is_none());
    }

    #[test]
    fn test_custom_tags_are_case_insensitive() {
        let document = Html::parse_document(r#"<meta NAME="DC.Date" content="2009-09-09">"#);
        let extractor = MetaTagExtractor::new(bank(), ["dc.date"]);
        let candidate = extractor.extract_from_document(&document).unwrap();
        assert_eq!(candidate.text, "2009-09-09");
        assert_eq!(candidate.label.as_deref(), Some("dc.date"));
    }

    #[test]
    fn test_no_known_tags() {
        let extractor = MetaTagExtractor::with_default_tags(bank());
        let source = DateSource::new().with_html(r#"<meta name="author" content="Staff">"#);
        assert!(extractor.extract(&source).is_empty());
        assert!(extractor.extract(&DateSource::new()).is_empty());
    }
}
