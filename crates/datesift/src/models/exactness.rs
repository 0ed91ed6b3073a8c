//! Precision levels and the mutual-exactness rule.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::date::ExtractedDate;
use super::field::DateField;

/// How precisely a date was specified in its source.
///
/// Levels are ordered by specificity (`Year < Month < ... < Second`).
/// `Dynamic` is a sentinel meaning "resolve per comparison"; it sorts after
/// `Second` and should be resolved before being compared by rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateExactness {
    Unset,
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Dynamic,
}

/// Calendar fields paired with the level reached once the field is set.
const FIELD_LEVELS: [(DateField, DateExactness); 6] = [
    (DateField::Year, DateExactness::Year),
    (DateField::Month, DateExactness::Month),
    (DateField::Day, DateExactness::Day),
    (DateField::Hour, DateExactness::Hour),
    (DateField::Minute, DateExactness::Minute),
    (DateField::Second, DateExactness::Second),
];

impl DateExactness {
    /// Exactness of a single date.
    pub fn of(date: &ExtractedDate) -> Self {
        date.exactness()
    }

    /// The coarser of two already-computed levels.
    ///
    /// `Dynamic` defers to the other operand.
    pub fn min(a: Self, b: Self) -> Self {
        match (a, b) {
            (Self::Dynamic, other) | (other, Self::Dynamic) => other,
            (a, b) => std::cmp::min(a, b),
        }
    }

    /// Level reached when `field` is the finest field set.
    pub fn from_field(field: DateField) -> Option<Self> {
        FIELD_LEVELS
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, level)| *level)
    }

    /// The finest calendar field this level covers.
    pub fn field(&self) -> Option<DateField> {
        FIELD_LEVELS
            .iter()
            .find(|(_, level)| level == self)
            .map(|(field, _)| *field)
    }

    /// Calendar fields covered by this level, coarse to fine.
    ///
    /// `Dynamic` covers every field; `Unset` covers none.
    pub fn fields(&self) -> &'static [DateField] {
        let depth = match self {
            Self::Unset => 0,
            Self::Year => 1,
            Self::Month => 2,
            Self::Day => 3,
            Self::Hour => 4,
            Self::Minute => 5,
            Self::Second | Self::Dynamic => 6,
        };
        &DateField::HIERARCHY[..depth]
    }

    /// Whether a comparison at this level looks at `field`.
    pub fn includes(&self, field: DateField) -> bool {
        self.fields().contains(&field)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unset => "unset",
            Self::Year => "year",
            Self::Month => "month",
            Self::Day => "day",
            Self::Hour => "hour",
            Self::Minute => "minute",
            Self::Second => "second",
            Self::Dynamic => "dynamic",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "unset" => Some(Self::Unset),
            "year" => Some(Self::Year),
            "month" => Some(Self::Month),
            "day" => Some(Self::Day),
            "hour" => Some(Self::Hour),
            "minute" => Some(Self::Minute),
            "second" => Some(Self::Second),
            "dynamic" => Some(Self::Dynamic),
            _ => None,
        }
    }

    pub(crate) fn field_levels() -> &'static [(DateField, DateExactness)] {
        &FIELD_LEVELS
    }
}

impl fmt::Display for DateExactness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The finest level at which two dates can be compared fairly.
///
/// Walks the fields coarse to fine and stops at the first field that is not
/// set on both dates, even if finer fields happen to be set on one side.
pub fn mutual_exactness(a: &ExtractedDate, b: &ExtractedDate) -> DateExactness {
    let mut level = DateExactness::Unset;
    for (field, next) in FIELD_LEVELS {
        if a.get(field).is_none() || b.get(field).is_none() {
            break;
        }
        level = next;
    }
    level
}
