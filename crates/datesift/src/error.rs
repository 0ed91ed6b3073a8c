//! Construction errors for date values.

use thiserror::Error;

use crate::models::DateField;

/// Raised when an [`ExtractedDate`](crate::ExtractedDate) is built from
/// field data that cannot describe a calendar date.
///
/// The parser never surfaces these: it validates before building and maps
/// any rejection to `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("{field} is set but the coarser field {missing} is not")]
    InconsistentFields { field: DateField, missing: DateField },

    #[error("{field} value {value} is out of range")]
    OutOfRange { field: DateField, value: i64 },
}
