//! Calendar fields carried by an extracted date.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single calendar component of a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateField {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    /// Offset from UTC in minutes. Not part of the precision hierarchy.
    Timezone,
}

impl DateField {
    /// Calendar fields ordered from coarsest to finest.
    pub const HIERARCHY: [DateField; 6] = [
        DateField::Year,
        DateField::Month,
        DateField::Day,
        DateField::Hour,
        DateField::Minute,
        DateField::Second,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::Month => "month",
            Self::Day => "day",
            Self::Hour => "hour",
            Self::Minute => "minute",
            Self::Second => "second",
            Self::Timezone => "timezone",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "year" => Some(Self::Year),
            "month" => Some(Self::Month),
            "day" => Some(Self::Day),
            "hour" => Some(Self::Hour),
            "minute" => Some(Self::Minute),
            "second" => Some(Self::Second),
            "timezone" => Some(Self::Timezone),
            _ => None,
        }
    }

    /// The next coarser field in the hierarchy, if any.
    ///
    /// The timezone hangs off the hour: an offset is meaningless without a
    /// time of day.
    pub fn parent(&self) -> Option<DateField> {
        match self {
            Self::Year => None,
            Self::Month => Some(Self::Year),
            Self::Day => Some(Self::Month),
            Self::Hour => Some(Self::Day),
            Self::Minute => Some(Self::Hour),
            Self::Second => Some(Self::Minute),
            Self::Timezone => Some(Self::Hour),
        }
    }
}

impl fmt::Display for DateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hierarchy_parents_chain_to_year() {
        for window in DateField::HIERARCHY.windows(2) {
            assert_eq!(window[1].parent(), Some(window[0]));
        }
        assert_eq!(DateField::Year.parent(), None);
        assert_eq!(DateField::Timezone.parent(), Some(DateField::Hour));
    }

    #[test]
    fn test_field_str_roundtrip() {
        for field in DateField::HIERARCHY {
            assert_eq!(DateField::from_str(field.as_str()), Some(field));
        }
        assert_eq!(DateField::from_str("timezone"), Some(DateField::Timezone));
        assert_eq!(DateField::from_str("week"), None);
    }
}
