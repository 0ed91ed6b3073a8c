//! Harvesting: run every extractor over a source, parse the candidates and
//! tag each date with where it came from.

use datesift::{order_dates, DateComparator, DateParser, DateType, ExtractedDate, PatternBank};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, trace};

use crate::config::ExtractConfig;
use crate::extractors::{
    DateExtractor, HttpHeaderExtractor, MetaTagExtractor, StructureExtractor,
    TextDateExtractor, UrlDateExtractor,
};
use crate::types::{DateSource, ExtractError};

/// Dates harvested from one source.
#[derive(Debug, Clone, Default, Serialize)]
pub struct HarvestResult {
    /// Parsed dates in extractor order, then source order.
    pub dates: Vec<ExtractedDate>,
    /// Candidates offered by the extractors.
    pub candidates_seen: usize,
    /// Candidates that did not parse into a valid date.
    pub rejected: usize,
}

impl HarvestResult {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Dates sorted oldest first, or newest first with `descending`.
    pub fn ordered(&self, descending: bool) -> Vec<ExtractedDate> {
        order_dates(&self.dates, descending)
    }

    pub fn by_provenance(&self, provenance: DateType) -> impl Iterator<Item = &ExtractedDate> {
        self.dates
            .iter()
            .filter(move |d| d.provenance() == Some(provenance))
    }

    pub fn oldest(&self) -> Option<&ExtractedDate> {
        DateComparator::default().oldest(&self.dates)
    }

    pub fn youngest(&self) -> Option<&ExtractedDate> {
        DateComparator::default().youngest(&self.dates)
    }
}

/// Runs a set of extractors and parses what they find.
pub struct DateHarvester<'a> {
    parser: DateParser<'a>,
    extractors: Vec<Box<dyn DateExtractor + 'a>>,
}

impl DateHarvester<'static> {
    /// Harvester over the shared bank matching the parser settings.
    pub fn from_config(config: &ExtractConfig) -> Result<Self, ExtractError> {
        let bank = PatternBank::shared(config.parser.bank_options());
        Self::new(bank, config)
    }
}

impl<'a> DateHarvester<'a> {
    /// Harvester with every built-in extractor configured from `config`.
    ///
    /// `bank` must have been built with the options `config.parser` implies,
    /// otherwise text and meta candidates would be matched under one
    /// reading of numeric dates and parsed under another.
    pub fn new(bank: &'a PatternBank, config: &ExtractConfig) -> Result<Self, ExtractError> {
        let expected = config.parser.bank_options();
        if bank.options() != expected {
            return Err(ExtractError::BankMismatch {
                bank_day_first: bank.options().day_first,
                config_day_first: expected.day_first,
            });
        }
        let parser = DateParser::new(bank, config.parser.clone().validated()?);
        let extractors: Vec<Box<dyn DateExtractor + 'a>> = vec![
            Box::new(UrlDateExtractor::new()),
            Box::new(MetaTagExtractor::new(bank, &config.meta_tags)),
            Box::new(StructureExtractor::with_selectors(&config.structure_selectors)?),
            Box::new(
                TextDateExtractor::content(bank)
                    .with_year_only(config.include_year_only_in_text)
                    .with_max_text_len(config.max_text_len),
            ),
            Box::new(TextDateExtractor::archive(bank).with_max_text_len(config.max_text_len)),
            Box::new(TextDateExtractor::reference(bank).with_max_text_len(config.max_text_len)),
            Box::new(HttpHeaderExtractor::new(&config.http_headers)),
        ];
        Ok(Self { parser, extractors })
    }

    /// Harvester with a caller-chosen set of extractors.
    pub fn with_extractors(parser: DateParser<'a>, extractors: Vec<Box<dyn DateExtractor + 'a>>) -> Self {
        Self { parser, extractors }
    }

    pub fn parser(&self) -> &DateParser<'a> {
        &self.parser
    }

    /// Names of the active extractors, in run order.
    pub fn extractor_names(&self) -> Vec<&str> {
        self.extractors.iter().map(|e| e.name()).collect()
    }

    pub fn harvest(&self, source: &DateSource) -> HarvestResult {
        let bank = self.parser.bank();
        let mut result = HarvestResult::default();

        for extractor in &self.extractors {
            let candidates = extractor.extract(source);
            result.candidates_seen += candidates.len();

            for candidate in candidates {
                let hint = candidate.format_hint.and_then(|format| bank.get(format));
                match self.parser.parse(&candidate.text, hint) {
                    Some(date) => result.dates.push(
                        date.with_provenance(extractor.provenance())
                            .with_position(candidate.offset),
                    ),
                    None => {
                        trace!(
                            extractor = extractor.name(),
                            candidate = %candidate.text,
                            "rejected date candidate"
                        );
                        result.rejected += 1;
                    }
                }
            }
        }

        debug!(
            url = source.url.as_deref().unwrap_or(""),
            dates = result.dates.len(),
            candidates = result.candidates_seen,
            rejected = result.rejected,
            "harvested dates"
        );
        result
    }

    /// Harvest many sources in parallel. Results keep the input order.
    pub fn harvest_batch(&self, sources: &[DateSource]) -> Vec<HarvestResult> {
        sources.par_iter().map(|source| self.harvest(source)).collect()
    }
}
