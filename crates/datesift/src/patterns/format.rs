//! Identifiers for the recognized date formats.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A recognized date format.
///
/// Variants are listed in the order the pattern bank tries them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateFormat {
    IsoDateTime,
    IsoBasicDateTime,
    IsoDate,
    IsoWeekDate,
    IsoOrdinalDate,
    YearFirstSlash,
    YearFirstDot,
    YearFirstUnderscore,
    YearFirstMonthName,
    Rfc1123,
    Rfc1036,
    AnsiC,
    UsTextual,
    EuTextual,
    UsNumeric,
    EuNumericDot,
    EuNumericSlash,
    EuNumericDash,
    UsNumericShortYear,
    EuNumericDotShortYear,
    EuNumericSlashShortYear,
    CompactDate,
    TextualMonthYear,
    IsoYearMonth,
    YearFirstSlashMonth,
    YearFirstDotMonth,
    YearFirstUnderscoreMonth,
    NumericMonthYearSlash,
    NumericMonthYearDot,
    Year,
}

impl DateFormat {
    pub const ALL: [DateFormat; 30] = [
        DateFormat::IsoDateTime,
        DateFormat::IsoBasicDateTime,
        DateFormat::IsoDate,
        DateFormat::IsoWeekDate,
        DateFormat::IsoOrdinalDate,
        DateFormat::YearFirstSlash,
        DateFormat::YearFirstDot,
        DateFormat::YearFirstUnderscore,
        DateFormat::YearFirstMonthName,
        DateFormat::Rfc1123,
        DateFormat::Rfc1036,
        DateFormat::AnsiC,
        DateFormat::UsTextual,
        DateFormat::EuTextual,
        DateFormat::UsNumeric,
        DateFormat::EuNumericDot,
        DateFormat::EuNumericSlash,
        DateFormat::EuNumericDash,
        DateFormat::UsNumericShortYear,
        DateFormat::EuNumericDotShortYear,
        DateFormat::EuNumericSlashShortYear,
        DateFormat::CompactDate,
        DateFormat::TextualMonthYear,
        DateFormat::IsoYearMonth,
        DateFormat::YearFirstSlashMonth,
        DateFormat::YearFirstDotMonth,
        DateFormat::YearFirstUnderscoreMonth,
        DateFormat::NumericMonthYearSlash,
        DateFormat::NumericMonthYearDot,
        DateFormat::Year,
    ];

    /// Human-readable shape of the format.
    pub fn template(&self) -> &'static str {
        match self {
            Self::IsoDateTime => "YYYY-MM-DDTHH:MM:SS+TZ",
            Self::IsoBasicDateTime => "YYYYMMDDTHHMMSS",
            Self::IsoDate => "YYYY-MM-DD",
            Self::IsoWeekDate => "YYYY-Www-D",
            Self::IsoOrdinalDate => "YYYY-DDD",
            Self::YearFirstSlash => "YYYY/MM/DD",
            Self::YearFirstDot => "YYYY.MM.DD",
            Self::YearFirstUnderscore => "YYYY_MM_DD",
            Self::YearFirstMonthName => "YYYY/MMM/DD",
            Self::Rfc1123 => "EEE, DD MMM YYYY HH:MM:SS z",
            Self::Rfc1036 => "EEEE, DD-MMM-YY HH:MM:SS z",
            Self::AnsiC => "EEE MMM D HH:MM:SS YYYY",
            Self::UsTextual => "MMMM DD, YYYY",
            Self::EuTextual => "DD. MMMM YYYY",
            Self::UsNumeric => "MM/DD/YYYY",
            Self::EuNumericDot => "DD.MM.YYYY",
            Self::EuNumericSlash => "DD/MM/YYYY",
            Self::EuNumericDash => "DD-MM-YYYY",
            Self::UsNumericShortYear => "MM/DD/YY",
            Self::EuNumericDotShortYear => "DD.MM.YY",
            Self::EuNumericSlashShortYear => "DD/MM/YY",
            Self::CompactDate => "YYYYMMDD",
            Self::TextualMonthYear => "MMMM YYYY",
            Self::IsoYearMonth => "YYYY-MM",
            Self::YearFirstSlashMonth => "YYYY/MM",
            Self::YearFirstDotMonth => "YYYY.MM",
            Self::YearFirstUnderscoreMonth => "YYYY_MM",
            Self::NumericMonthYearSlash => "MM/YYYY",
            Self::NumericMonthYearDot => "MM.YYYY",
            Self::Year => "YYYY",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IsoDateTime => "iso_date_time",
            Self::IsoBasicDateTime => "iso_basic_date_time",
            Self::IsoDate => "iso_date",
            Self::IsoWeekDate => "iso_week_date",
            Self::IsoOrdinalDate => "iso_ordinal_date",
            Self::YearFirstSlash => "year_first_slash",
            Self::YearFirstDot => "year_first_dot",
            Self::YearFirstUnderscore => "year_first_underscore",
            Self::YearFirstMonthName => "year_first_month_name",
            Self::Rfc1123 => "rfc1123",
            Self::Rfc1036 => "rfc1036",
            Self::AnsiC => "ansi_c",
            Self::UsTextual => "us_textual",
            Self::EuTextual => "eu_textual",
            Self::UsNumeric => "us_numeric",
            Self::EuNumericDot => "eu_numeric_dot",
            Self::EuNumericSlash => "eu_numeric_slash",
            Self::EuNumericDash => "eu_numeric_dash",
            Self::UsNumericShortYear => "us_numeric_short_year",
            Self::EuNumericDotShortYear => "eu_numeric_dot_short_year",
            Self::EuNumericSlashShortYear => "eu_numeric_slash_short_year",
            Self::CompactDate => "compact_date",
            Self::TextualMonthYear => "textual_month_year",
            Self::IsoYearMonth => "iso_year_month",
            Self::YearFirstSlashMonth => "year_first_slash_month",
            Self::YearFirstDotMonth => "year_first_dot_month",
            Self::YearFirstUnderscoreMonth => "year_first_underscore_month",
            Self::NumericMonthYearSlash => "numeric_month_year_slash",
            Self::NumericMonthYearDot => "numeric_month_year_dot",
            Self::Year => "year",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|format| format.as_str() == s)
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
