//! Date data model: fields, precision levels, provenance tags and the
//! canonical [`ExtractedDate`] value.

mod date;
mod exactness;
mod field;
mod provenance;

pub use date::{DateBuilder, ExtractedDate, NormalizeStyle};
pub use exactness::{mutual_exactness, DateExactness};
pub use field::DateField;
pub use provenance::DateType;
