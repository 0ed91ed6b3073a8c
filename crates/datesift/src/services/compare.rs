//! Precision-aware comparison and ordering of extracted dates.
//!
//! Two dates are compared only on the fields both of them specify. A
//! year-only `2010` and a full `2010-07-08T14:00:00` are therefore equal:
//! they share nothing finer than the year.

use std::cmp::Ordering;

use crate::models::{mutual_exactness, DateExactness, ExtractedDate};

/// Compare at the pair's mutual exactness.
///
/// Fields are compared coarse to fine and the first difference decides.
/// Timezones are not consulted; parse with `normalize_to_utc` to compare
/// instants across zones. Two unset dates are equal.
pub fn compare(a: &ExtractedDate, b: &ExtractedDate) -> Ordering {
    compare_at(a, b, DateExactness::Dynamic)
}

/// Compare no deeper than `exactness` (and never deeper than the pair's
/// mutual exactness). `Dynamic` behaves like [`compare`].
pub fn compare_at(a: &ExtractedDate, b: &ExtractedDate, exactness: DateExactness) -> Ordering {
    let limit = DateExactness::min(mutual_exactness(a, b), exactness);
    limit
        .fields()
        .iter()
        .map(|field| a.get(*field).cmp(&b.get(*field)))
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// Stable sort with the default comparator.
pub fn order_dates(dates: &[ExtractedDate], descending: bool) -> Vec<ExtractedDate> {
    DateComparator::default().order_dates(dates, descending)
}

/// Comparator with a configurable comparison depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateComparator {
    exactness: DateExactness,
}

impl Default for DateComparator {
    fn default() -> Self {
        Self {
            exactness: DateExactness::Dynamic,
        }
    }
}

impl DateComparator {
    /// Compare at a fixed level instead of the pair's mutual exactness.
    pub fn with_exactness(exactness: DateExactness) -> Self {
        Self { exactness }
    }

    pub fn exactness(&self) -> DateExactness {
        self.exactness
    }

    pub fn compare(&self, a: &ExtractedDate, b: &ExtractedDate) -> Ordering {
        compare_at(a, b, self.exactness)
    }

    /// Sort ascending (or descending) by [`DateComparator::compare`].
    ///
    /// When two dates compare equal but one is less precise, the coarser
    /// one sorts first; dates equal at the same precision keep their input
    /// order. Descending output is the exact reverse rule, still stable.
    pub fn order_dates(&self, dates: &[ExtractedDate], descending: bool) -> Vec<ExtractedDate> {
        let mut ordered = dates.to_vec();
        ordered.sort_by(|a, b| {
            let ordering = self.rank(a, b);
            if descending {
                ordering.reverse()
            } else {
                ordering
            }
        });
        ordered
    }

    /// Earliest date that has at least a year; first one wins ties.
    pub fn oldest<'d>(&self, dates: &'d [ExtractedDate]) -> Option<&'d ExtractedDate> {
        dates
            .iter()
            .filter(|d| d.exactness() > DateExactness::Unset)
            .min_by(|a, b| self.rank(a, b))
    }

    /// Latest date that has at least a year; first one wins ties.
    pub fn youngest<'d>(&self, dates: &'d [ExtractedDate]) -> Option<&'d ExtractedDate> {
        dates
            .iter()
            .filter(|d| d.exactness() > DateExactness::Unset)
            .min_by(|a, b| self.rank(b, a))
    }

    /// Dates specified at least as precisely as `min`, in input order.
    ///
    /// `Dynamic` keeps every date that has a year.
    pub fn filter_by_exactness(&self, dates: &[ExtractedDate], min: DateExactness) -> Vec<ExtractedDate> {
        let min = match min {
            DateExactness::Dynamic => DateExactness::Year,
            level => level,
        };
        dates.iter().filter(|d| d.exactness() >= min).cloned().collect()
    }

    /// Total order used for sorting: `compare`, then coarser-first.
    fn rank(&self, a: &ExtractedDate, b: &ExtractedDate) -> Ordering {
        let depth = |d: &ExtractedDate| DateExactness::min(d.exactness(), self.exactness);
        self.compare(a, b).then_with(|| depth(a).cmp(&depth(b)))
    }
}
