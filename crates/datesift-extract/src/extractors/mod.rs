//! Source-specific candidate extractors.

mod extractor;
mod header_extractor;
mod meta_extractor;
mod structure_extractor;
mod text_extractor;
mod url_extractor;

pub use extractor::DateExtractor;
pub use header_extractor::HttpHeaderExtractor;
pub use meta_extractor::MetaTagExtractor;
pub use structure_extractor::StructureExtractor;
pub use text_extractor::TextDateExtractor;
pub use url_extractor::UrlDateExtractor;
