//! Harvester configuration.

use std::path::Path;

use datesift::{load_config_file, ConfigError, ParserConfig};
use serde::{Deserialize, Serialize};

/// Meta tag keys recognized by default, most trusted first.
pub const DEFAULT_META_TAGS: &[&str] = &[
    "article:published_time",
    "og:published_time",
    "og:article:published_time",
    "datepublished",
    "publishdate",
    "publish-date",
    "publish_date",
    "pubdate",
    "dc.date.issued",
    "dcterms.issued",
    "dcterms.created",
    "dc.date.created",
    "dc.date",
    "date",
    "sailthru.date",
    "parsely-pub-date",
    "citation_publication_date",
    "citation_date",
    "originalpublicationdate",
    "article.published",
    "datecreated",
    "article:modified_time",
    "og:updated_time",
    "datemodified",
    "last-modified",
    "dcterms.modified",
];

/// HTTP headers scanned by default.
pub const DEFAULT_HTTP_HEADERS: &[&str] = &["last-modified", "date", "expires"];

/// Default cap on scanned body text, in bytes.
pub const DEFAULT_MAX_TEXT_LEN: usize = 200_000;

/// Settings for [`DateHarvester`](crate::DateHarvester).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    pub parser: ParserConfig,
    /// Accept bare four-digit years found in body text.
    pub include_year_only_in_text: bool,
    /// Meta keys to read, most trusted first. Matched case-insensitively.
    pub meta_tags: Vec<String>,
    /// Extra CSS selectors whose text or `datetime`/`content` attribute
    /// holds a date.
    pub structure_selectors: Vec<String>,
    /// Body text beyond this many bytes is not scanned.
    pub max_text_len: usize,
    /// Response headers that carry dates.
    pub http_headers: Vec<String>,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            parser: ParserConfig::default(),
            include_year_only_in_text: false,
            meta_tags: DEFAULT_META_TAGS.iter().map(|t| t.to_string()).collect(),
            structure_selectors: Vec::new(),
            max_text_len: DEFAULT_MAX_TEXT_LEN,
            http_headers: DEFAULT_HTTP_HEADERS.iter().map(|h| h.to_string()).collect(),
        }
    }
}

impl ExtractConfig {
    /// Load from a JSON, TOML or YAML file. Parser settings still honor
    /// `DATESIFT_*` environment overrides.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let mut config: Self = load_config_file(path)?;
        config.parser = config.parser.with_env_overrides().validated()?;
        Ok(config)
    }
}
