//! datesift-extract - finds date candidates in web documents and turns
//! them into provenance-tagged [`ExtractedDate`](datesift::ExtractedDate)s.
//!
//! Each [`DateExtractor`] looks at one part of a [`DateSource`] (URL, meta
//! tags, structured markup, body text, archive and reference snippets,
//! HTTP headers). A [`DateHarvester`] runs them, parses the candidates
//! with a [`DateParser`](datesift::DateParser) and records provenance and
//! position on every date.

pub mod config;
pub mod extractors;
pub mod harvest;
pub mod html;
pub mod types;

pub use config::ExtractConfig;
pub use extractors::{
    DateExtractor, HttpHeaderExtractor, MetaTagExtractor, StructureExtractor,
    TextDateExtractor, UrlDateExtractor,
};
pub use harvest::{DateHarvester, HarvestResult};
pub use html::{html_to_text, visible_text};
pub use types::{Candidate, DateSource, ExtractError};
