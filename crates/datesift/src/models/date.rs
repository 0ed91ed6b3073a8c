//! The canonical extracted date value.

use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveDateTime, TimeDelta, Timelike};
use serde::{Deserialize, Serialize};

use super::exactness::{mutual_exactness, DateExactness};
use super::field::DateField;
use super::provenance::DateType;
use crate::error::DateError;
use crate::patterns::DateFormat;

/// Largest timezone offset accepted, in minutes (UTC+14:00).
const MAX_TIMEZONE_OFFSET: i32 = 14 * 60;

/// Rendering used by [`ExtractedDate::normalized_string_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalizeStyle {
    /// `YYYY-MM-DD`, or `YYYY-MM-DDTHH:MM:SS[±HH:MM]` once a time is known.
    /// Unset month/day default to 1.
    #[default]
    Calendar,
    /// Only the fields the source specified: `2010`, `2010-06`, `2010-06-30T14`.
    Truncated,
    /// Always `YYYY-MM-DD HH:MM:SS`, defaults filled in.
    Spaced,
}

/// A date recognized in some source, with the fields it actually specified.
///
/// Unset fields are `None`. A field is only ever set when every coarser
/// field is set too; [`DateBuilder::build`] enforces this. Values are
/// immutable: `with_provenance` and `with_position` return tagged copies.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ExtractedDate {
    original: String,
    format: DateFormat,
    year: Option<i32>,
    month: Option<u32>,
    day: Option<u32>,
    hour: Option<u32>,
    minute: Option<u32>,
    second: Option<u32>,
    timezone: Option<i32>,
    provenance: Option<DateType>,
    position: Option<usize>,
}

impl ExtractedDate {
    /// Start building a date for the given matched text and format.
    pub fn builder(original: impl Into<String>, format: DateFormat) -> DateBuilder {
        DateBuilder {
            date: ExtractedDate {
                original: original.into(),
                format,
                year: None,
                month: None,
                day: None,
                hour: None,
                minute: None,
                second: None,
                timezone: None,
                provenance: None,
                position: None,
            },
        }
    }

    /// The substring this date was parsed from.
    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn format(&self) -> DateFormat {
        self.format
    }

    pub fn year(&self) -> Option<i32> {
        self.year
    }

    pub fn month(&self) -> Option<u32> {
        self.month
    }

    pub fn day(&self) -> Option<u32> {
        self.day
    }

    pub fn hour(&self) -> Option<u32> {
        self.hour
    }

    pub fn minute(&self) -> Option<u32> {
        self.minute
    }

    pub fn second(&self) -> Option<u32> {
        self.second
    }

    /// Offset from UTC in minutes.
    pub fn timezone(&self) -> Option<i32> {
        self.timezone
    }

    pub fn provenance(&self) -> Option<DateType> {
        self.provenance
    }

    /// Offset of the candidate within its source: a character offset for
    /// text and URLs, an element index for DOM sources.
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    /// Value of a single field.
    pub fn get(&self, field: DateField) -> Option<i32> {
        match field {
            DateField::Year => self.year,
            DateField::Month => self.month.map(|v| v as i32),
            DateField::Day => self.day.map(|v| v as i32),
            DateField::Hour => self.hour.map(|v| v as i32),
            DateField::Minute => self.minute.map(|v| v as i32),
            DateField::Second => self.second.map(|v| v as i32),
            DateField::Timezone => self.timezone,
        }
    }

    /// Finest level for which this field and all coarser fields are set.
    pub fn exactness(&self) -> DateExactness {
        let mut level = DateExactness::Unset;
        for (field, next) in DateExactness::field_levels() {
            if self.get(*field).is_none() {
                break;
            }
            level = *next;
        }
        level
    }

    pub fn with_provenance(mut self, provenance: DateType) -> Self {
        self.provenance = Some(provenance);
        self
    }

    pub fn with_position(mut self, position: usize) -> Self {
        self.position = Some(position);
        self
    }

    /// Calendar date with unset month and day defaulted to 1.
    pub fn normalized_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year?, self.month.unwrap_or(1), self.day.unwrap_or(1))
    }

    /// Date and time with unset fields defaulted (month/day to 1, time to 0).
    pub fn normalized_date_time(&self) -> Option<NaiveDateTime> {
        self.normalized_date()?.and_hms_opt(
            self.hour.unwrap_or(0),
            self.minute.unwrap_or(0),
            self.second.unwrap_or(0),
        )
    }

    /// ISO-like rendering, see [`NormalizeStyle::Calendar`].
    pub fn normalized_string(&self) -> Option<String> {
        self.normalized_string_with(NormalizeStyle::Calendar)
    }

    pub fn normalized_string_with(&self, style: NormalizeStyle) -> Option<String> {
        let at = self.normalized_date_time()?;
        let exactness = self.exactness();
        let rendered = match style {
            NormalizeStyle::Calendar if exactness <= DateExactness::Day => {
                at.format("%Y-%m-%d").to_string()
            }
            NormalizeStyle::Calendar => {
                format!("{}{}", at.format("%Y-%m-%dT%H:%M:%S"), self.offset_suffix())
            }
            NormalizeStyle::Spaced => at.format("%Y-%m-%d %H:%M:%S").to_string(),
            NormalizeStyle::Truncated => {
                let pattern = match exactness {
                    DateExactness::Year => "%Y",
                    DateExactness::Month => "%Y-%m",
                    DateExactness::Day => "%Y-%m-%d",
                    DateExactness::Hour => "%Y-%m-%dT%H",
                    DateExactness::Minute => "%Y-%m-%dT%H:%M",
                    _ => "%Y-%m-%dT%H:%M:%S",
                };
                let suffix = if exactness >= DateExactness::Hour {
                    self.offset_suffix()
                } else {
                    String::new()
                };
                format!("{}{}", at.format(pattern), suffix)
            }
        };
        Some(rendered)
    }

    fn offset_suffix(&self) -> String {
        match self.timezone {
            None => String::new(),
            Some(0) => "Z".to_string(),
            Some(offset) => {
                let sign = if offset < 0 { '-' } else { '+' };
                let abs = offset.abs();
                format!("{}{:02}:{:02}", sign, abs / 60, abs % 60)
            }
        }
    }

    /// Copy shifted to UTC when a timezone is known.
    ///
    /// Only fields the source specified are kept, so a half-hour offset on
    /// an hour-precision date loses its minutes.
    pub fn to_utc(&self) -> ExtractedDate {
        let (Some(offset), Some(local)) = (self.timezone, self.normalized_date_time()) else {
            return self.clone();
        };
        let utc = local - TimeDelta::minutes(i64::from(offset));

        let mut shifted = self.clone();
        shifted.year = Some(utc.year());
        shifted.month = Some(utc.month());
        shifted.day = Some(utc.day());
        shifted.hour = Some(utc.hour());
        if self.minute.is_some() {
            shifted.minute = Some(utc.minute());
        }
        if self.second.is_some() {
            shifted.second = Some(utc.second());
        }
        shifted.timezone = Some(0);
        shifted
    }

    /// Signed distance `self - other`, measured at the pair's mutual
    /// exactness. `None` when the dates share no field.
    pub fn difference(&self, other: &ExtractedDate) -> Option<TimeDelta> {
        let level = mutual_exactness(self, other);
        if level == DateExactness::Unset {
            return None;
        }
        Some(self.truncated(level)? - other.truncated(level)?)
    }

    fn truncated(&self, level: DateExactness) -> Option<NaiveDateTime> {
        let keep = |field: DateField, value: Option<u32>, default: u32| {
            if level.includes(field) {
                value.unwrap_or(default)
            } else {
                default
            }
        };
        NaiveDate::from_ymd_opt(
            self.year?,
            keep(DateField::Month, self.month, 1),
            keep(DateField::Day, self.day, 1),
        )?
        .and_hms_opt(
            keep(DateField::Hour, self.hour, 0),
            keep(DateField::Minute, self.minute, 0),
            keep(DateField::Second, self.second, 0),
        )
    }
}

impl fmt::Display for ExtractedDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.normalized_string() {
            Some(normalized) => f.write_str(&normalized),
            None => f.write_str(&self.original),
        }
    }
}

/// Builder validating field data before an [`ExtractedDate`] exists.
#[derive(Debug, Clone)]
pub struct DateBuilder {
    date: ExtractedDate,
}

impl DateBuilder {
    pub fn year(mut self, year: i32) -> Self {
        self.date.year = Some(year);
        self
    }

    pub fn month(mut self, month: u32) -> Self {
        self.date.month = Some(month);
        self
    }

    pub fn day(mut self, day: u32) -> Self {
        self.date.day = Some(day);
        self
    }

    pub fn hour(mut self, hour: u32) -> Self {
        self.date.hour = Some(hour);
        self
    }

    pub fn minute(mut self, minute: u32) -> Self {
        self.date.minute = Some(minute);
        self
    }

    pub fn second(mut self, second: u32) -> Self {
        self.date.second = Some(second);
        self
    }

    /// Offset from UTC in minutes.
    pub fn timezone(mut self, offset_minutes: i32) -> Self {
        self.date.timezone = Some(offset_minutes);
        self
    }

    pub fn provenance(mut self, provenance: DateType) -> Self {
        self.date.provenance = Some(provenance);
        self
    }

    pub fn position(mut self, position: usize) -> Self {
        self.date.position = Some(position);
        self
    }

    pub fn build(self) -> Result<ExtractedDate, DateError> {
        validate(&self.date)?;
        Ok(self.date)
    }
}

fn validate(date: &ExtractedDate) -> Result<(), DateError> {
    for field in [
        DateField::Month,
        DateField::Day,
        DateField::Hour,
        DateField::Minute,
        DateField::Second,
        DateField::Timezone,
    ] {
        if date.get(field).is_none() {
            continue;
        }
        if let Some(parent) = field.parent() {
            if date.get(parent).is_none() {
                return Err(DateError::InconsistentFields {
                    field,
                    missing: parent,
                });
            }
        }
    }

    let out_of_range = |field: DateField, value: i64| DateError::OutOfRange { field, value };

    if let Some(year) = date.year {
        if NaiveDate::from_ymd_opt(year, 1, 1).is_none() {
            return Err(out_of_range(DateField::Year, year.into()));
        }
    }
    if let Some(month) = date.month {
        if !(1..=12).contains(&month) {
            return Err(out_of_range(DateField::Month, month.into()));
        }
    }
    if let (Some(year), Some(month), Some(day)) = (date.year, date.month, date.day) {
        if NaiveDate::from_ymd_opt(year, month, day).is_none() {
            return Err(out_of_range(DateField::Day, day.into()));
        }
    }
    if let Some(hour) = date.hour.filter(|h| *h > 23) {
        return Err(out_of_range(DateField::Hour, hour.into()));
    }
    if let Some(minute) = date.minute.filter(|m| *m > 59) {
        return Err(out_of_range(DateField::Minute, minute.into()));
    }
    if let Some(second) = date.second.filter(|s| *s > 59) {
        return Err(out_of_range(DateField::Second, second.into()));
    }
    if let Some(offset) = date.timezone.filter(|o| o.abs() > MAX_TIMEZONE_OFFSET) {
        return Err(out_of_range(DateField::Timezone, offset.into()));
    }
    Ok(())
}
