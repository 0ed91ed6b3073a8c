//! Date format catalogue and the ordered pattern bank.

mod bank;
mod format;
pub mod names;

pub use bank::{BankOptions, PatternBank, PatternEntry, PatternMatch, MAX_CANDIDATE_LEN};
pub use format::DateFormat;
