//! datesift - date extraction, normalization and precision-aware comparison.
//!
//! Candidate strings are matched against an ordered [`PatternBank`], turned
//! into [`ExtractedDate`] values by a [`DateParser`], and ranked with the
//! mutual-exactness rules in [`services::compare`].

// Model enums expose `from_str` returning `Option<Self>`, not `FromStr`.
#![allow(clippy::should_implement_trait)]

pub mod config;
pub mod error;
pub mod models;
pub mod patterns;
pub mod services;

pub use config::{load_config_file, ConfigError, ParserConfig};
pub use error::DateError;
pub use models::{
    mutual_exactness, DateBuilder, DateExactness, DateField, DateType, ExtractedDate,
    NormalizeStyle,
};
pub use patterns::{BankOptions, DateFormat, PatternBank, PatternEntry, PatternMatch};
pub use services::compare::{compare, compare_at, order_dates, DateComparator};
pub use services::parser::{expand_two_digit_year, DateParser, TWO_DIGIT_YEAR_PIVOT};
