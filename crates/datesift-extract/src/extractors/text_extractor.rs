//! Dates mentioned in free text: page content, archive banners and
//! reference labels.

use datesift::{DateFormat, DateType, PatternBank, PatternEntry};
use scraper::Html;
use tracing::debug;

use super::extractor::DateExtractor;
use crate::config::DEFAULT_MAX_TEXT_LEN;
use crate::html::visible_text;
use crate::types::{Candidate, DateSource};

/// Scans text with the pattern bank's searchable formats.
///
/// The content flavor reads `DateSource::text`, or the visible text of
/// `DateSource::html` when no plain text is given. The archive and
/// reference flavors scan each caller-supplied snippet separately and
/// label candidates with the snippet index.
#[derive(Debug, Clone)]
pub struct TextDateExtractor<'a> {
    bank: &'a PatternBank,
    provenance: DateType,
    include_year_only: bool,
    max_text_len: usize,
}

impl<'a> TextDateExtractor<'a> {
    pub fn content(bank: &'a PatternBank) -> Self {
        Self::with_provenance(bank, DateType::Content)
    }

    pub fn archive(bank: &'a PatternBank) -> Self {
        Self::with_provenance(bank, DateType::Archive)
    }

    pub fn reference(bank: &'a PatternBank) -> Self {
        Self::with_provenance(bank, DateType::Reference)
    }

    fn with_provenance(bank: &'a PatternBank, provenance: DateType) -> Self {
        Self {
            bank,
            provenance,
            include_year_only: false,
            max_text_len: DEFAULT_MAX_TEXT_LEN,
        }
    }

    /// Also report bare four-digit years.
    pub fn with_year_only(mut self, include: bool) -> Self {
        self.include_year_only = include;
        self
    }

    pub fn with_max_text_len(mut self, max_text_len: usize) -> Self {
        self.max_text_len = max_text_len;
        self
    }

    /// Candidates in `text`, offsets in characters.
    pub fn extract_from_text(&self, text: &str) -> Vec<Candidate> {
        let text = truncate_at_char_boundary(text, self.max_text_len);
        let include = |entry: &PatternEntry| {
            entry.is_searchable() || (self.include_year_only && entry.format() == DateFormat::Year)
        };

        let mut candidates = Vec::new();
        let (mut byte_cursor, mut char_cursor) = (0, 0);
        for found in self.bank.find_all(text, include) {
            char_cursor += text[byte_cursor..found.start].chars().count();
            byte_cursor = found.start;
            candidates.push(Candidate::new(found.text, char_cursor).with_format_hint(found.entry.format()));
        }
        candidates
    }

    fn snippets<'s>(&self, source: &'s DateSource) -> &'s [String] {
        match self.provenance {
            DateType::Archive => &source.archive_snippets,
            DateType::Reference => &source.reference_snippets,
            _ => &[],
        }
    }
}

impl DateExtractor for TextDateExtractor<'_> {
    fn name(&self) -> &str {
        self.provenance.as_str()
    }

    fn provenance(&self) -> DateType {
        self.provenance
    }

    fn extract(&self, source: &DateSource) -> Vec<Candidate> {
        if self.provenance != DateType::Content {
            return self
                .snippets(source)
                .iter()
                .enumerate()
                .flat_map(|(i, snippet)| {
                    self.extract_from_text(snippet)
                        .into_iter()
                        .map(move |c| c.with_label(i.to_string()))
                })
                .collect();
        }

        match (&source.text, &source.html) {
            (Some(text), _) => self.extract_from_text(text),
            (None, Some(html)) => {
                let text = visible_text(&Html::parse_document(html));
                self.extract_from_text(&text)
            }
            (None, None) => Vec::new(),
        }
    }
}

fn truncate_at_char_boundary(text: &str, max_len: usize) -> &str {
    if text.len() <= max_len {
        return text;
    }
    let mut end = max_len;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    debug!(len = text.len(), kept = end, "truncating scanned text");
    &text[..end]
}

#[cfg(test)]
mod tests {
    use datesift::BankOptions;

    use super::*;

    fn bank() -> &'static PatternBank {
        PatternBank::shared(BankOptions::default())
    }

    #[test]
    fn test_content_text() {
        let extractor = TextDateExtractor::content(bank());
        let found = extractor.extract_from_text("Über uns: published June 30, 2010, updated 2010-07-02.");
        let texts: Vec<&str> = found.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["June 30, 2010", "2010-07-02"]);
        assert_eq!(found[0].offset, 20);
        assert_eq!(found[0].format_hint, Some(DateFormat::UsTextual));
        assert_eq!(found[1].format_hint, Some(DateFormat::IsoDate));
    }

    #[test]
    fn test_year_only_is_opt_in() {
        let text = "Founded in 1998.";
        assert!(TextDateExtractor::content(bank()).extract_from_text(text).is_empty());
        let found = TextDateExtractor::content(bank())
            .with_year_only(true)
            .extract_from_text(text);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].text, "1998");
        assert_eq!(found[0].offset, 11);
    }

    #[test]
    fn test_html_fallback_and_text_precedence() {
        let extractor = TextDateExtractor::content(bank());
        let html = "<body><script>x = '1999-01-01'</script><p>On 2010-06-30</p></body>";
        let found = extractor.extract(&DateSource::new().with_html(html));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].text, "2010-06-30");

        let found = extractor.extract(&DateSource::new().with_html(html).with_text("2011-01-01"));
        assert_eq!(found[0].text, "2011-01-01");
    }

    #[test]
    fn test_snippets_are_labelled() {
        let source = DateSource::new()
            .with_text("2001-01-01")
            .with_archive_snippet("Captured 2010-06-30")
            .with_archive_snippet("nothing here")
            .with_archive_snippet("Saved July 1, 2010");
        let found = TextDateExtractor::archive(bank()).extract(&source);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].label.as_deref(), Some("0"));
        assert_eq!(found[1].label.as_deref(), Some("2"));
        assert!(TextDateExtractor::reference(bank()).extract(&source).is_empty());
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        let text = "éé 2010-06-30";
        assert_eq!(truncate_at_char_boundary(text, 3), "é");
        let found = TextDateExtractor::content(bank())
            .with_max_text_len(8)
            .extract_from_text(text);
        assert!(found.is_empty());
    }
}
