//! Date parser: candidate string to [`ExtractedDate`].
//!
//! A candidate is matched against the pattern bank (or a single hinted
//! pattern), its named capture groups are mapped onto date fields, and the
//! result is validated. Anything that does not describe a real calendar
//! date is rejected with `None`.

use chrono::{Datelike, NaiveDate, Weekday};
use regex::Captures;
use tracing::trace;

use crate::config::ParserConfig;
use crate::models::ExtractedDate;
use crate::patterns::{names, DateFormat, PatternBank, PatternEntry, MAX_CANDIDATE_LEN};

/// Two-digit years below this are read as 20xx, the rest as 19xx.
pub const TWO_DIGIT_YEAR_PIVOT: i32 = 50;

/// Expand a two-digit year around [`TWO_DIGIT_YEAR_PIVOT`].
pub fn expand_two_digit_year(yy: i32) -> i32 {
    if yy < TWO_DIGIT_YEAR_PIVOT {
        2000 + yy
    } else {
        1900 + yy
    }
}

/// Parses candidate strings against a pattern bank.
#[derive(Debug, Clone)]
pub struct DateParser<'a> {
    bank: &'a PatternBank,
    config: ParserConfig,
}

impl DateParser<'static> {
    /// Parser over the shared bank matching the config's options.
    pub fn from_config(config: ParserConfig) -> Self {
        let bank = PatternBank::shared(config.bank_options());
        Self { bank, config }
    }
}

impl Default for DateParser<'static> {
    fn default() -> Self {
        Self::from_config(ParserConfig::default())
    }
}

impl<'a> DateParser<'a> {
    pub fn new(bank: &'a PatternBank, config: ParserConfig) -> Self {
        Self { bank, config }
    }

    pub fn bank(&self) -> &'a PatternBank {
        self.bank
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse a candidate.
    ///
    /// With a hint only that pattern is tried; otherwise the first bank
    /// entry that fully matches decides the format.
    pub fn parse(&self, candidate: &str, format_hint: Option<&PatternEntry>) -> Option<ExtractedDate> {
        let candidate = candidate.trim();
        if candidate.is_empty() || candidate.len() > MAX_CANDIDATE_LEN {
            return None;
        }
        let entry = match format_hint {
            Some(entry) => entry,
            None => self.bank.find_matching_pattern(candidate)?,
        };
        let Some(captures) = entry.captures(candidate) else {
            trace!(candidate, format = %entry.format(), "candidate does not match format");
            return None;
        };

        let date = self.build(candidate, entry.format(), &captures)?;
        if self.config.normalize_to_utc && date.timezone().is_some() {
            return Some(date.to_utc());
        }
        Some(date)
    }

    /// Parse a candidate as one specific format.
    pub fn parse_with_format(&self, candidate: &str, format: DateFormat) -> Option<ExtractedDate> {
        let entry = self.bank.get(format)?;
        self.parse(candidate, Some(entry))
    }

    /// First date found in free text.
    pub fn find_date(&self, text: &str) -> Option<ExtractedDate> {
        self.find_all_dates(text).into_iter().next()
    }

    /// Every date found in free text, in order of appearance.
    ///
    /// Positions are character offsets into `text`.
    pub fn find_all_dates(&self, text: &str) -> Vec<ExtractedDate> {
        let mut dates = Vec::new();
        let (mut byte_cursor, mut char_cursor) = (0, 0);
        for found in self.bank.find_all(text, PatternEntry::is_searchable) {
            char_cursor += text[byte_cursor..found.start].chars().count();
            byte_cursor = found.start;
            if let Some(date) = self.parse(found.text, Some(found.entry)) {
                dates.push(date.with_position(char_cursor));
            }
        }
        dates
    }

    fn build(&self, original: &str, format: DateFormat, captures: &Captures) -> Option<ExtractedDate> {
        let number = |name: &str| {
            captures
                .name(name)
                .and_then(|m| m.as_str().parse::<u32>().ok())
        };

        let year = match (captures.name("year"), captures.name("yy")) {
            (Some(year), _) => year.as_str().parse::<i32>().ok()?,
            (None, Some(yy)) => expand_two_digit_year(yy.as_str().parse().ok()?),
            (None, None) => return None,
        };

        let (year, month, day) = if let Some(yday) = number("yday") {
            let date = NaiveDate::from_yo_opt(year, yday)?;
            (date.year(), Some(date.month()), Some(date.day()))
        } else if let (Some(week), Some(wday)) = (number("week"), number("wday")) {
            let date = NaiveDate::from_isoywd_opt(year, week, iso_weekday(wday)?)?;
            (date.year(), Some(date.month()), Some(date.day()))
        } else {
            let month = captures
                .name("mname")
                .and_then(|m| names::month_from_name(m.as_str()))
                .or_else(|| number("month"));
            (year, month, number("day"))
        };

        if !(self.config.min_year..=self.config.max_year).contains(&year) {
            trace!(candidate = original, year, "year outside configured window");
            return None;
        }

        let hour = match (number("hour"), captures.name("ampm")) {
            (Some(hour), Some(marker)) => Some(twelve_hour_clock(hour, marker.as_str())?),
            (hour, _) => hour,
        };
        let timezone = captures
            .name("tz")
            .and_then(|m| names::timezone_offset(m.as_str()));

        let mut builder = ExtractedDate::builder(original, format).year(year);
        if let Some(month) = month {
            builder = builder.month(month);
        }
        if let Some(day) = day {
            builder = builder.day(day);
        }
        if let Some(hour) = hour {
            builder = builder.hour(hour);
        }
        if let Some(minute) = number("minute") {
            builder = builder.minute(minute);
        }
        if let Some(second) = number("second") {
            builder = builder.second(second);
        }
        if let Some(offset) = timezone.filter(|_| hour.is_some()) {
            builder = builder.timezone(offset);
        }

        match builder.build() {
            Ok(date) => Some(date),
            Err(err) => {
                trace!(candidate = original, %err, "rejected date candidate");
                None
            }
        }
    }
}

fn iso_weekday(day: u32) -> Option<Weekday> {
    match day {
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        7 => Some(Weekday::Sun),
        _ => None,
    }
}

/// Convert a 12-hour clock reading; hours outside 1-12 are rejected.
fn twelve_hour_clock(hour: u32, marker: &str) -> Option<u32> {
    if !(1..=12).contains(&hour) {
        return None;
    }
    let pm = marker.trim().starts_with(['p', 'P']);
    Some(match (hour, pm) {
        (12, false) => 0,
        (12, true) => 12,
        (hour, false) => hour,
        (hour, true) => hour + 12,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DateExactness;
    use crate::patterns::BankOptions;

    fn parser() -> DateParser<'static> {
        DateParser::new(PatternBank::shared(BankOptions::default()), ParserConfig::base_default())
    }

    fn parse(candidate: &str) -> Option<ExtractedDate> {
        parser().parse(candidate, None)
    }

    fn normalized(candidate: &str) -> Option<String> {
        parse(candidate).and_then(|d| d.normalized_string())
    }

    #[test]
    fn test_two_digit_year_pivot() {
        assert_eq!(expand_two_digit_year(0), 2000);
        assert_eq!(expand_two_digit_year(49), 2049);
        assert_eq!(expand_two_digit_year(50), 1950);
        assert_eq!(expand_two_digit_year(99), 1999);
    }

    #[test]
    fn test_iso_date() {
        let date = parse("2010-06-30").unwrap();
        assert_eq!(date.exactness(), DateExactness::Day);
        assert_eq!(date.normalized_string().as_deref(), Some("2010-06-30"));
        assert_eq!(date.original(), "2010-06-30");
        assert_eq!(date.format(), DateFormat::IsoDate);
    }

    #[test]
    fn test_iso_date_time_with_offset() {
        let date = parse("2010-06-30T14:00:00.250+02:00").unwrap();
        assert_eq!(date.exactness(), DateExactness::Second);
        assert_eq!(date.timezone(), Some(120));
        assert_eq!(
            date.normalized_string().as_deref(),
            Some("2010-06-30T14:00:00+02:00")
        );
    }

    #[test]
    fn test_normalize_to_utc() {
        let config = ParserConfig {
            normalize_to_utc: true,
            ..ParserConfig::base_default()
        };
        let parser = DateParser::new(PatternBank::shared(BankOptions::default()), config);
        let date = parser.parse("2010-06-30T01:00:00+02:00", None).unwrap();
        assert_eq!(
            date.normalized_string().as_deref(),
            Some("2010-06-29T23:00:00Z")
        );
        // No timezone, nothing to shift.
        let local = parser.parse("2010-06-30 01:00", None).unwrap();
        assert_eq!(local.timezone(), None);
        assert_eq!(local.hour(), Some(1));
    }

    #[test]
    fn test_http_date_formats() {
        for candidate in [
            "Wed, 30 Jun 2010 14:00:00 GMT",
            "Wednesday, 30-Jun-10 14:00:00 GMT",
        ] {
            assert_eq!(
                normalized(candidate).as_deref(),
                Some("2010-06-30T14:00:00Z"),
                "{candidate}"
            );
        }
        let asctime = parse("Wed Jun 30 14:00:00 2010").unwrap();
        assert_eq!(asctime.timezone(), None);
        assert_eq!(
            asctime.normalized_string().as_deref(),
            Some("2010-06-30T14:00:00")
        );
    }

    #[test]
    fn test_named_timezones() {
        let date = parse("June 30, 2010 at 14:00 CEST").unwrap();
        assert_eq!(date.timezone(), Some(120));
        let date = parse("June 30, 2010 at 9:00 PST").unwrap();
        assert_eq!(date.timezone(), Some(-480));
        assert_eq!(date.to_utc().hour(), Some(17));
    }

    #[test]
    fn test_textual_months_across_locales() {
        let cases = [
            ("June 30, 2010", "2010-06-30"),
            ("Jun. 30th, 2010", "2010-06-30"),
            ("Wednesday, June 30, 2010", "2010-06-30"),
            ("30th of June 2010", "2010-06-30"),
            ("30. März 2010", "2010-03-30"),
            ("1er janvier 2010", "2010-01-01"),
            ("15 août 2010", "2010-08-15"),
            ("30 de junio de 2010", "2010-06-30"),
            ("2010/jun/30", "2010-06-30"),
        ];
        for (candidate, expected) in cases {
            assert_eq!(normalized(candidate).as_deref(), Some(expected), "{candidate}");
        }
        let month = parse("Dezember 2010").unwrap();
        assert_eq!(month.exactness(), DateExactness::Month);
        assert_eq!(month.month(), Some(12));
    }

    #[test]
    fn test_twelve_hour_clock() {
        let afternoon = parse("June 30, 2010 at 2:30 pm").unwrap();
        assert_eq!((afternoon.hour(), afternoon.minute()), (Some(14), Some(30)));
        assert_eq!(afternoon.exactness(), DateExactness::Minute);

        let midnight = parse("June 30, 2010 12:05 a.m.").unwrap();
        assert_eq!(midnight.hour(), Some(0));

        let noon = parse("06/30/2010 12:00 PM").unwrap();
        assert_eq!(noon.hour(), Some(12));

        assert_eq!(parse("June 30, 2010 13:05 pm"), None);
    }

    #[test]
    fn test_year_first_date_times() {
        let slash = parse("2010/06/30 14:00:00").unwrap();
        assert_eq!(slash.format(), DateFormat::YearFirstSlash);
        assert_eq!(slash.normalized_string().as_deref(), Some("2010-06-30T14:00:00"));
        assert_eq!(slash.exactness(), DateExactness::Second);

        let dot = parse("2010.06.30 14:00").unwrap();
        assert_eq!(dot.format(), DateFormat::YearFirstDot);
        assert_eq!(dot.exactness(), DateExactness::Minute);

        let iso_t = parse("2010/06/30T14:00+02:00").unwrap();
        assert_eq!(iso_t.normalized_string().as_deref(), Some("2010-06-30T14:00:00+02:00"));

        let underscore = parse("2010_06_30 2:15 pm").unwrap();
        assert_eq!((underscore.hour(), underscore.minute()), (Some(14), Some(15)));

        // A bare date keeps day precision.
        assert_eq!(parse("2010/06/30").unwrap().exactness(), DateExactness::Day);
    }

    #[test]
    fn test_german_time_suffix() {
        let date = parse("30.06.2010 um 14:00 Uhr").unwrap();
        assert_eq!(date.normalized_string().as_deref(), Some("2010-06-30T14:00:00"));
        assert_eq!(date.exactness(), DateExactness::Minute);
    }

    #[test]
    fn test_short_years_use_pivot() {
        assert_eq!(parse("06/30/10").unwrap().year(), Some(2010));
        assert_eq!(parse("06/30/75").unwrap().year(), Some(1975));
        assert_eq!(parse("30.06.49").unwrap().year(), Some(2049));
        assert_eq!(parse("30.06.50").unwrap().year(), Some(1950));
    }

    #[test]
    fn test_week_and_ordinal_dates() {
        assert_eq!(normalized("2010-W26-3").as_deref(), Some("2010-06-30"));
        assert_eq!(normalized("2010W263").as_deref(), Some("2010-06-30"));
        assert_eq!(normalized("2010-181").as_deref(), Some("2010-06-30"));
        // Week-year and calendar year differ at the edges.
        assert_eq!(normalized("2009-W53-7").as_deref(), Some("2010-01-03"));
        assert_eq!(parse("2010-W53-1"), None);
        assert_eq!(parse("2010-366"), None);
    }

    #[test]
    fn test_month_and_year_precision() {
        let month = parse("2010/06").unwrap();
        assert_eq!(month.exactness(), DateExactness::Month);
        assert_eq!(month.normalized_string().as_deref(), Some("2010-06-01"));

        let year = parse("2010").unwrap();
        assert_eq!(year.exactness(), DateExactness::Year);
        assert_eq!(year.normalized_string().as_deref(), Some("2010-01-01"));
    }

    #[test]
    fn test_out_of_range_is_rejected() {
        assert_eq!(parse("2010-02-30"), None);
        assert_eq!(parse("31.04.2010"), None);
        assert_eq!(parse("13/13/2010"), None);
        assert_eq!(parse("0999-01-01"), None);
        assert!(parse("2012-02-29").is_some());
    }

    #[test]
    fn test_year_window_is_configurable() {
        let config = ParserConfig {
            min_year: 1990,
            max_year: 2030,
            ..ParserConfig::base_default()
        };
        let parser = DateParser::new(PatternBank::shared(BankOptions::default()), config);
        assert!(parser.parse("2010-06-30", None).is_some());
        assert_eq!(parser.parse("1985-06-30", None), None);
        assert_eq!(parser.parse("2031", None), None);
    }

    #[test]
    fn test_format_hint_restricts_matching() {
        let parser = parser();
        let iso = parser.bank().get(DateFormat::IsoDate).unwrap();
        assert_eq!(parser.parse("June 30, 2010", Some(iso)), None);
        assert!(parser.parse("2010-06-30", Some(iso)).is_some());

        let eu = parser.parse_with_format("05/06/2010", DateFormat::EuNumericSlash).unwrap();
        assert_eq!((eu.month(), eu.day()), (Some(6), Some(5)));
        let us = parser.parse("05/06/2010", None).unwrap();
        assert_eq!((us.month(), us.day()), (Some(5), Some(6)));
    }

    #[test]
    fn test_day_first_parser() {
        let config = ParserConfig {
            day_first: true,
            ..ParserConfig::base_default()
        };
        let parser = DateParser::from_config(config);
        let date = parser.parse("05/06/2010", None).unwrap();
        assert_eq!((date.month(), date.day()), (Some(6), Some(5)));
    }

    #[test]
    fn test_empty_and_garbage_candidates() {
        assert_eq!(parse(""), None);
        assert_eq!(parse("   "), None);
        assert_eq!(parse("yesterday"), None);
        assert_eq!(parse(&"2010-06-30 ".repeat(40)), None);
    }

    #[test]
    fn test_find_all_dates_reports_char_offsets() {
        let text = "Stand: 3. März 2010, geändert 01.07.2010";
        let dates = parser().find_all_dates(text);
        assert_eq!(dates.len(), 2);
        assert_eq!(dates[0].normalized_string().as_deref(), Some("2010-03-03"));
        assert_eq!(dates[0].position(), Some(7));
        assert_eq!(dates[1].normalized_string().as_deref(), Some("2010-07-01"));
        assert_eq!(dates[1].position(), Some(30));
    }

    #[test]
    fn test_find_date() {
        let parser = parser();
        let date = parser.find_date("Updated on 2010-06-30 by staff").unwrap();
        assert_eq!(date.normalized_string().as_deref(), Some("2010-06-30"));
        assert_eq!(date.position(), Some(11));
        assert_eq!(parser.find_date("nothing to see"), None);
    }
}
