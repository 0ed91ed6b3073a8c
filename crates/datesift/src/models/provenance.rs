//! Provenance tags for extracted dates.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which extraction strategy produced a date.
///
/// Used by downstream ranking only; parsing and comparison ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateType {
    /// Found in the URL path or query.
    Url,
    /// Found in an HTML meta tag or an HTTP header.
    Meta,
    /// Found in a machine-readable structural element (`<time>`, microdata, JSON-LD).
    Structure,
    /// Found in the visible body text.
    Content,
    /// Found in an archive snapshot banner.
    Archive,
    /// Found in a reference label such as "last modified".
    Reference,
}

impl DateType {
    pub const ALL: [DateType; 6] = [
        DateType::Url,
        DateType::Meta,
        DateType::Structure,
        DateType::Content,
        DateType::Archive,
        DateType::Reference,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Url => "url",
            Self::Meta => "meta",
            Self::Structure => "structure",
            Self::Content => "content",
            Self::Archive => "archive",
            Self::Reference => "reference",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "url" => Some(Self::Url),
            "meta" => Some(Self::Meta),
            "structure" => Some(Self::Structure),
            "content" => Some(Self::Content),
            "archive" => Some(Self::Archive),
            "reference" => Some(Self::Reference),
            _ => None,
        }
    }
}

impl fmt::Display for DateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_type_roundtrip() {
        for tag in DateType::ALL {
            assert_eq!(DateType::from_str(tag.as_str()), Some(tag));
        }
        assert_eq!(DateType::from_str("header"), None);
    }

    #[test]
    fn test_date_type_serializes_snake_case() {
        let json = serde_json::to_string(&DateType::Structure).unwrap();
        assert_eq!(json, "\"structure\"");
    }
}
