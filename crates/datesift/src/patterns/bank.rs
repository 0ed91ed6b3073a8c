//! Ordered bank of date format patterns.
//!
//! Entries are tried in bank order and the first full match wins, so more
//! specific formats sit ahead of the formats they contain (a timestamp
//! before a bare date, a day-level date before a month-level one).

use std::collections::{BTreeMap, HashSet};
use std::ops::Range;
use std::sync::LazyLock;

use regex::{Regex, RegexBuilder, RegexSet, RegexSetBuilder};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::format::DateFormat;
use super::names;
use crate::models::DateExactness;

/// Candidates longer than this are never dates and are rejected unmatched.
pub const MAX_CANDIDATE_LEN: usize = 160;

/// Compiled size limit; the month and weekday alternations are large once
/// case folding is applied.
const REGEX_SIZE_LIMIT: usize = 64 << 20;

const YEAR: &str = r"(?P<year>\d{4})";
const SHORT_YEAR: &str = r"(?P<yy>\d{2})";
const MONTH: &str = r"(?P<month>1[0-2]|0?[1-9])";
const MONTH_2: &str = r"(?P<month>0[1-9]|1[0-2])";
const DAY: &str = r"(?P<day>3[01]|[12]\d|0?[1-9])";
const DAY_2: &str = r"(?P<day>0[1-9]|[12]\d|3[01])";
const WEEK: &str = r"(?P<week>0[1-9]|[1-4]\d|5[0-3])";
const YEAR_DAY: &str = r"(?P<yday>36[0-6]|3[0-5]\d|[12]\d\d|0[1-9]\d|00[1-9])";
const TIME: &str =
    r"(?P<hour>2[0-3]|[01]?\d):(?P<minute>[0-5]\d)(?::(?P<second>[0-5]\d)(?:[.,]\d{1,9})?)?";
const BASIC_TIME: &str = r"(?P<hour>2[0-3]|[01]\d)(?P<minute>[0-5]\d)(?P<second>[0-5]\d)?";
const AM_PM: &str = r"(?:\s?(?P<ampm>[ap]m(?-u:\b)|[ap]\.m\.))?";
const UHR: &str = r"(?:\s?uhr(?-u:\b))?";
const ORDINAL: &str = r"(?:st|nd|rd|th|er|\.)?";
const TIME_LEAD: &str = r"(?:,?\s+(?:(?:at|um|à|a\s+las|@|-)\s+)?)";
const NUMERIC_TZ: &str = r"(?:utc|gmt|ut)?\s?[+-][01]?\d(?::?[0-5]\d)?";

/// Options that change how ambiguous numeric dates are read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct BankOptions {
    /// Read `05/06/2010` as 5 June instead of May 6.
    pub day_first: bool,
}

static MONTH_FIRST_BANK: LazyLock<PatternBank> =
    LazyLock::new(|| PatternBank::new(BankOptions::default()));

static DAY_FIRST_BANK: LazyLock<PatternBank> =
    LazyLock::new(|| PatternBank::new(BankOptions { day_first: true }));

/// One compiled format.
#[derive(Debug, Clone)]
pub struct PatternEntry {
    format: DateFormat,
    exactness: DateExactness,
    searchable: bool,
    anchored: Regex,
    unanchored: Regex,
}

impl PatternEntry {
    fn new(format: DateFormat, pattern: &str, searchable: bool) -> Result<Self, regex::Error> {
        let anchored = compile(&format!("^(?:{pattern})$"))?;
        let unanchored = compile(pattern)?;
        let exactness = implied_exactness(&anchored);
        Ok(Self {
            format,
            exactness,
            searchable,
            anchored,
            unanchored,
        })
    }

    pub fn format(&self) -> DateFormat {
        self.format
    }

    pub fn template(&self) -> &'static str {
        self.format.template()
    }

    /// Finest level this format can express when every optional part is present.
    pub fn exactness(&self) -> DateExactness {
        self.exactness
    }

    /// Whether the format is distinctive enough to scan free text for.
    pub fn is_searchable(&self) -> bool {
        self.searchable
    }

    /// Whole-candidate match.
    pub fn captures<'t>(&self, candidate: &'t str) -> Option<regex::Captures<'t>> {
        self.anchored.captures(candidate)
    }
}

/// A format occurrence found inside a longer text.
#[derive(Debug, Clone, Copy)]
pub struct PatternMatch<'a> {
    pub entry: &'a PatternEntry,
    /// Byte offset of the match start.
    pub start: usize,
    /// Byte offset one past the match end.
    pub end: usize,
    pub text: &'a str,
}

impl PatternMatch<'_> {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Ordered, immutable collection of compiled date formats.
#[derive(Debug, Clone)]
pub struct PatternBank {
    entries: Vec<PatternEntry>,
    anchored: RegexSet,
    options: BankOptions,
}

impl PatternBank {
    /// Compile the built-in formats.
    ///
    /// Compilation is costly; prefer [`PatternBank::shared`] unless a
    /// private copy is needed.
    pub fn new(options: BankOptions) -> Self {
        let entries: Vec<PatternEntry> = pattern_sources(options)
            .into_iter()
            .map(|(format, pattern, searchable)| {
                PatternEntry::new(format, &pattern, searchable)
                    .expect("built-in date pattern should compile")
            })
            .collect();
        let anchored = RegexSetBuilder::new(entries.iter().map(|e| e.anchored.as_str()))
            .case_insensitive(true)
            .size_limit(REGEX_SIZE_LIMIT)
            .dfa_size_limit(REGEX_SIZE_LIMIT)
            .build()
            .expect("built-in date pattern set should compile");
        debug!(
            patterns = entries.len(),
            day_first = options.day_first,
            "compiled date pattern bank"
        );
        Self {
            entries,
            anchored,
            options,
        }
    }

    /// Process-wide bank for the given options, compiled on first use.
    pub fn shared(options: BankOptions) -> &'static PatternBank {
        if options.day_first {
            &DAY_FIRST_BANK
        } else {
            &MONTH_FIRST_BANK
        }
    }

    pub fn options(&self) -> BankOptions {
        self.options
    }

    /// Entries in the order they are tried.
    pub fn entries(&self) -> &[PatternEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, format: DateFormat) -> Option<&PatternEntry> {
        self.entries.iter().find(|e| e.format == format)
    }

    /// First entry, in bank order, that matches the whole candidate.
    ///
    /// Surrounding whitespace is ignored. Empty and oversized candidates
    /// never match.
    pub fn find_matching_pattern(&self, candidate: &str) -> Option<&PatternEntry> {
        let candidate = candidate.trim();
        if candidate.is_empty() || candidate.len() > MAX_CANDIDATE_LEN {
            return None;
        }
        let index = self.anchored.matches(candidate).into_iter().next()?;
        self.entries.get(index)
    }

    /// Non-overlapping occurrences of the selected formats inside `text`,
    /// ordered by position.
    ///
    /// Earlier entries claim text first. A match must sit on token
    /// boundaries: it may not start inside a word or number, nor end in
    /// the middle of one.
    pub fn find_all<'a>(
        &'a self,
        text: &'a str,
        include: impl Fn(&PatternEntry) -> bool,
    ) -> Vec<PatternMatch<'a>> {
        // Claimed spans keyed by start. They never overlap, so ends ascend too.
        let mut claims: BTreeMap<usize, PatternMatch<'a>> = BTreeMap::new();
        for entry in self.entries.iter().filter(|e| include(*e)) {
            let mut at = 0;
            while at < text.len() {
                let Some(m) = entry.unanchored.find_at(text, at) else {
                    break;
                };
                let blocking = claims
                    .range(..m.end())
                    .next_back()
                    .map(|(_, c)| (c.start, c.end))
                    .filter(|&(_, end)| end > m.start());
                match blocking {
                    // Every match starting inside the claim overlaps it.
                    Some((start, end)) if start <= m.start() => at = end,
                    None if on_token_boundary(text, m.start(), m.end()) => {
                        claims.insert(
                            m.start(),
                            PatternMatch {
                                entry,
                                start: m.start(),
                                end: m.end(),
                                text: m.as_str(),
                            },
                        );
                        at = m.end();
                    }
                    _ => {
                        at = m.start() + text[m.start()..].chars().next().map_or(1, char::len_utf8);
                    }
                }
            }
        }
        claims.into_values().collect()
    }
}

impl Default for PatternBank {
    fn default() -> Self {
        Self::new(BankOptions::default())
    }
}

fn compile(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .size_limit(REGEX_SIZE_LIMIT)
        .dfa_size_limit(REGEX_SIZE_LIMIT)
        .build()
}

fn implied_exactness(regex: &Regex) -> DateExactness {
    let groups: HashSet<&str> = regex.capture_names().flatten().collect();
    let has = |names: &[&str]| names.iter().any(|n| groups.contains(n));
    if has(&["second"]) {
        DateExactness::Second
    } else if has(&["minute"]) {
        DateExactness::Minute
    } else if has(&["hour"]) {
        DateExactness::Hour
    } else if has(&["day", "wday", "yday"]) {
        DateExactness::Day
    } else if has(&["month", "mname"]) {
        DateExactness::Month
    } else if has(&["year", "yy"]) {
        DateExactness::Year
    } else {
        DateExactness::Unset
    }
}

fn on_token_boundary(text: &str, start: usize, end: usize) -> bool {
    if text[..start].chars().next_back().is_some_and(char::is_alphanumeric) {
        return false;
    }
    let ends_in_word = text[start..end].chars().next_back().is_some_and(char::is_alphanumeric);
    let runs_on = text[end..].chars().next().is_some_and(char::is_alphanumeric);
    !(ends_in_word && runs_on)
}

/// Pattern source for every format, in bank order.
fn pattern_sources(options: BankOptions) -> Vec<(DateFormat, String, bool)> {
    let weekday = format!(
        r"(?:(?:{})\p{{L}}*\.?,?\s+)?",
        names::weekday_alternation()
    );
    let month = format!(r"(?P<mname>{})(?-u:\b)\.?", names::month_alternation());
    let tz = format!(
        r"(?P<tz>z(?-u:\b)|\s?(?:{NUMERIC_TZ}|(?:{})(?-u:\b)))",
        names::timezone_alternation()
    );
    let time_tail = format!(r"(?:{TIME_LEAD}{TIME}{AM_PM}{UHR}{tz}?)?");
    // Year-first dates also take an ISO-style `T` before the time.
    let iso_time_tail = format!(r"(?:(?:t|{TIME_LEAD}){TIME}{AM_PM}{UHR}{tz}?)?");

    use DateFormat::*;
    let mut sources = vec![
        (IsoDateTime, format!(r"{YEAR}-{MONTH_2}-{DAY_2}(?:t|\s+){TIME}{tz}?"), true),
        (IsoBasicDateTime, format!(r"{YEAR}{MONTH_2}{DAY_2}t{BASIC_TIME}{tz}?"), true),
        (IsoDate, format!(r"{YEAR}-{MONTH}-{DAY}"), true),
        (IsoWeekDate, format!(r"{YEAR}-?w{WEEK}-?(?P<wday>[1-7])"), true),
        (IsoOrdinalDate, format!(r"{YEAR}-{YEAR_DAY}"), false),
        (YearFirstSlash, format!(r"{YEAR}/{MONTH}/{DAY}{iso_time_tail}"), true),
        (YearFirstDot, format!(r"{YEAR}\.{MONTH}\.{DAY}{iso_time_tail}"), true),
        (YearFirstUnderscore, format!(r"{YEAR}_{MONTH}_{DAY}{iso_time_tail}"), true),
        (YearFirstMonthName, format!(r"{YEAR}[-/._]{month}(?:[-/._]{DAY})?"), true),
        (Rfc1123, format!(r"{weekday}{DAY}\s+{month}\s+{YEAR}\s+{TIME}{tz}?"), true),
        (Rfc1036, format!(r"{weekday}{DAY}-{month}-{SHORT_YEAR}\s+{TIME}{tz}?"), true),
        (AnsiC, format!(r"{weekday}{month}\s+{DAY}\s+{TIME}\s+{YEAR}"), true),
        (
            UsTextual,
            format!(r"{weekday}{month}\s*{DAY}{ORDINAL},?\s+{YEAR}{time_tail}"),
            true,
        ),
        (
            EuTextual,
            format!(
                r"{weekday}{DAY}{ORDINAL}(?:\s*|-)(?:(?:of|de)\s+)?{month}(?:,?\s+(?:de\s+)?|-){YEAR}{time_tail}"
            ),
            true,
        ),
        (UsNumeric, format!(r"{MONTH}/{DAY}/{YEAR}{time_tail}"), true),
        (EuNumericDot, format!(r"{DAY}\.\s?{MONTH}\.\s?{YEAR}{time_tail}"), true),
        (EuNumericSlash, format!(r"{DAY}/{MONTH}/{YEAR}{time_tail}"), true),
        (EuNumericDash, format!(r"{DAY}-{MONTH}-{YEAR}{time_tail}"), true),
        (UsNumericShortYear, format!(r"{MONTH}/{DAY}/{SHORT_YEAR}"), true),
        (EuNumericDotShortYear, format!(r"{DAY}\.{MONTH}\.{SHORT_YEAR}"), true),
        (EuNumericSlashShortYear, format!(r"{DAY}/{MONTH}/{SHORT_YEAR}"), true),
        (CompactDate, format!(r"{YEAR}{MONTH_2}{DAY_2}"), false),
        (TextualMonthYear, format!(r"{month},?\s+{YEAR}"), true),
        (IsoYearMonth, format!(r"{YEAR}-{MONTH}"), true),
        (YearFirstSlashMonth, format!(r"{YEAR}/{MONTH}"), true),
        (YearFirstDotMonth, format!(r"{YEAR}\.{MONTH}"), false),
        (YearFirstUnderscoreMonth, format!(r"{YEAR}_{MONTH}"), false),
        (NumericMonthYearSlash, format!(r"{MONTH}/{YEAR}"), true),
        (NumericMonthYearDot, format!(r"{MONTH}\.{YEAR}"), false),
        (Year, YEAR.to_string(), false),
    ];

    if options.day_first {
        swap_formats(&mut sources, UsNumeric, EuNumericSlash);
        swap_formats(&mut sources, UsNumericShortYear, EuNumericSlashShortYear);
    }
    sources
}

fn swap_formats(sources: &mut [(DateFormat, String, bool)], a: DateFormat, b: DateFormat) {
    let position = |format: DateFormat| sources.iter().position(|(f, _, _)| *f == format);
    if let (Some(i), Some(j)) = (position(a), position(b)) {
        sources.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;

    fn matched(bank: &PatternBank, candidate: &str) -> Option<DateFormat> {
        bank.find_matching_pattern(candidate).map(|e| e.format())
    }

    #[test]
    fn test_bank_covers_every_format_in_order() {
        let bank = PatternBank::shared(BankOptions::default());
        let formats: Vec<DateFormat> = bank.entries().iter().map(|e| e.format()).collect();
        assert_eq!(formats, DateFormat::ALL.to_vec());
        assert_eq!(bank.len(), DateFormat::ALL.len());
    }

    #[test]
    fn test_day_first_reorders_ambiguous_numeric_formats() {
        let bank = PatternBank::shared(BankOptions { day_first: true });
        let index = |format| bank.entries().iter().position(|e| e.format() == format);
        assert!(index(DateFormat::EuNumericSlash) < index(DateFormat::UsNumeric));
        assert!(index(DateFormat::EuNumericSlashShortYear) < index(DateFormat::UsNumericShortYear));
        assert_eq!(bank.len(), DateFormat::ALL.len());
    }

    #[test]
    fn test_implied_exactness() {
        let bank = PatternBank::shared(BankOptions::default());
        let level = |format| bank.get(format).unwrap().exactness();
        assert_eq!(level(DateFormat::IsoDateTime), DateExactness::Second);
        assert_eq!(level(DateFormat::IsoDate), DateExactness::Day);
        assert_eq!(level(DateFormat::YearFirstSlash), DateExactness::Second);
        assert_eq!(level(DateFormat::IsoWeekDate), DateExactness::Day);
        assert_eq!(level(DateFormat::IsoOrdinalDate), DateExactness::Day);
        assert_eq!(level(DateFormat::TextualMonthYear), DateExactness::Month);
        assert_eq!(level(DateFormat::IsoYearMonth), DateExactness::Month);
        assert_eq!(level(DateFormat::Year), DateExactness::Year);
    }

    #[test]
    fn test_find_matching_pattern_formats() {
        let bank = PatternBank::shared(BankOptions::default());
        let cases = [
            ("2010-06-30", DateFormat::IsoDate),
            ("2010-06-30T14:00:00+02:00", DateFormat::IsoDateTime),
            ("2010-06-30 14:00", DateFormat::IsoDateTime),
            ("20100630T140000Z", DateFormat::IsoBasicDateTime),
            ("2010-W26-3", DateFormat::IsoWeekDate),
            ("2010-181", DateFormat::IsoOrdinalDate),
            ("2010/06/30", DateFormat::YearFirstSlash),
            ("2010.06.30", DateFormat::YearFirstDot),
            ("2010_06_30", DateFormat::YearFirstUnderscore),
            ("2010/06/30 14:00:00", DateFormat::YearFirstSlash),
            ("2010/06/30T14:00Z", DateFormat::YearFirstSlash),
            ("2010.06.30 14:00", DateFormat::YearFirstDot),
            ("2010_06_30 2:15 pm", DateFormat::YearFirstUnderscore),
            ("2010/jun/30", DateFormat::YearFirstMonthName),
            ("Wed, 30 Jun 2010 14:00:00 GMT", DateFormat::Rfc1123),
            ("Wednesday, 30-Jun-10 14:00:00 GMT", DateFormat::Rfc1036),
            ("Wed Jun 30 14:00:00 2010", DateFormat::AnsiC),
            ("June 30, 2010", DateFormat::UsTextual),
            ("Jun. 30th, 2010 at 2:30 pm", DateFormat::UsTextual),
            ("30. Juni 2010", DateFormat::EuTextual),
            ("30 de junio de 2010", DateFormat::EuTextual),
            ("30 June 2010", DateFormat::EuTextual),
            ("06/30/2010", DateFormat::UsNumeric),
            ("30.06.2010", DateFormat::EuNumericDot),
            ("30.06.2010 um 14:00 Uhr", DateFormat::EuNumericDot),
            ("30/06/2010", DateFormat::EuNumericSlash),
            ("30-06-2010", DateFormat::EuNumericDash),
            ("06/30/10", DateFormat::UsNumericShortYear),
            ("30.06.10", DateFormat::EuNumericDotShortYear),
            ("30/06/10", DateFormat::EuNumericSlashShortYear),
            ("20100630", DateFormat::CompactDate),
            ("June 2010", DateFormat::TextualMonthYear),
            ("2010-06", DateFormat::IsoYearMonth),
            ("2010/06", DateFormat::YearFirstSlashMonth),
            ("2010.06", DateFormat::YearFirstDotMonth),
            ("2010_06", DateFormat::YearFirstUnderscoreMonth),
            ("06/2010", DateFormat::NumericMonthYearSlash),
            ("06.2010", DateFormat::NumericMonthYearDot),
            ("2010", DateFormat::Year),
        ];
        for (candidate, expected) in cases {
            assert_eq!(matched(bank, candidate), Some(expected), "{candidate}");
        }
    }

    #[test]
    fn test_ambiguous_slash_dates_follow_options() {
        let month_first = PatternBank::shared(BankOptions::default());
        let day_first = PatternBank::shared(BankOptions { day_first: true });
        assert_eq!(matched(month_first, "05/06/2010"), Some(DateFormat::UsNumeric));
        assert_eq!(matched(day_first, "05/06/2010"), Some(DateFormat::EuNumericSlash));
        // Unambiguous either way.
        assert_eq!(matched(day_first, "06/30/2010"), Some(DateFormat::UsNumeric));
        assert_eq!(matched(month_first, "30/06/2010"), Some(DateFormat::EuNumericSlash));
    }

    #[test]
    fn test_non_dates_do_not_match() {
        let bank = PatternBank::shared(BankOptions::default());
        for candidate in ["", "   ", "no date here", "201006", "2010-13", "32/13/2010", "14:00"] {
            assert_eq!(matched(bank, candidate), None, "{candidate}");
        }
    }

    #[test]
    fn test_candidate_is_trimmed() {
        let bank = PatternBank::shared(BankOptions::default());
        assert_eq!(matched(bank, "  2010-06-30\n"), Some(DateFormat::IsoDate));
    }

    #[test]
    fn test_find_all_prefers_longest_format() {
        let bank = PatternBank::shared(BankOptions::default());
        let text = "Posted on June 30, 2010 and updated 2010-07-02T09:15:00Z.";
        let found = bank.find_all(text, PatternEntry::is_searchable);
        let formats: Vec<DateFormat> = found.iter().map(|m| m.entry.format()).collect();
        assert_eq!(formats, vec![DateFormat::UsTextual, DateFormat::IsoDateTime]);
        assert_eq!(found[0].text, "June 30, 2010");
        assert_eq!(found[1].text, "2010-07-02T09:15:00Z");
    }

    #[test]
    fn test_find_all_respects_token_boundaries() {
        let bank = PatternBank::shared(BankOptions::default());
        let found = bank.find_all("id=a2010-06-30 ref 12010-06-30x", PatternEntry::is_searchable);
        assert!(found.is_empty(), "{found:?}");

        let found = bank.find_all("(2010-06-30)", PatternEntry::is_searchable);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].range(), 1..11);
    }

    #[test]
    fn test_pathological_input_is_fast() {
        let bank = PatternBank::shared(BankOptions::default());
        let noise = "12/12/12-".repeat(2_000) + &"9".repeat(5_000);
        let started = Instant::now();
        let _ = bank.find_all(&noise, PatternEntry::is_searchable);
        assert!(bank.find_matching_pattern(&noise).is_none());
        assert!(started.elapsed() < Duration::from_secs(10));
    }

    #[test]
    fn test_dense_matches_scale() {
        let bank = PatternBank::shared(BankOptions::default());
        let count = 20_000;
        for (unit, format) in [
            ("2010-06-30 ", DateFormat::IsoDate),
            ("1/1/2010 ", DateFormat::UsNumeric),
            ("June 30, 2010; ", DateFormat::UsTextual),
        ] {
            let text = unit.repeat(count);
            let started = Instant::now();
            let found = bank.find_all(&text, PatternEntry::is_searchable);
            assert!(started.elapsed() < Duration::from_secs(10), "{unit:?} took too long");
            assert_eq!(found.len(), count, "{unit:?}");
            assert!(found.iter().all(|m| m.entry.format() == format));
            assert!(found.windows(2).all(|w| w[0].end <= w[1].start));
            assert_eq!(found[1].start, unit.len());
        }
    }
}
