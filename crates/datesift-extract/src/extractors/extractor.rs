//! The extractor trait.

use datesift::DateType;

use crate::types::{Candidate, DateSource};

/// Produces date candidates from one part of a [`DateSource`].
///
/// Implementations only find substrings. Parsing and provenance tagging
/// happen in the harvester.
pub trait DateExtractor: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Provenance attached to every date this extractor yields.
    fn provenance(&self) -> DateType;

    /// Candidates found in the source, in source order.
    fn extract(&self, source: &DateSource) -> Vec<Candidate>;
}
