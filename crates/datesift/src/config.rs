//! Parser configuration.
//!
//! Configuration files may be JSON, TOML or YAML (picked by extension).
//! Environment variables override both defaults and file values:
//!
//! - `DATESIFT_DAY_FIRST=1` reads ambiguous slash dates day-first
//! - `DATESIFT_MIN_YEAR` / `DATESIFT_MAX_YEAR` bound accepted years
//! - `DATESIFT_NORMALIZE_UTC=1` shifts dates with a timezone to UTC

use std::env;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::patterns::BankOptions;

pub const DEFAULT_MIN_YEAR: i32 = 1000;
pub const DEFAULT_MAX_YEAR: i32 = 9999;

/// Errors loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to parse YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to parse JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid year window: min_year {min} is after max_year {max}")]
    InvalidYearWindow { min: i32, max: i32 },
}

/// Read and deserialize a config file, choosing the format by extension
/// (`toml`, `yaml`/`yml`, anything else is JSON).
pub fn load_config_file<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
    let config = match ext {
        "toml" => toml::from_str(&contents)?,
        "yaml" | "yml" => serde_yaml::from_str(&contents)?,
        _ => serde_json::from_str(&contents)?,
    };
    Ok(config)
}

/// Settings for [`DateParser`](crate::DateParser).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Earliest accepted year.
    pub min_year: i32,
    /// Latest accepted year.
    pub max_year: i32,
    /// Shift dates carrying a timezone to UTC.
    pub normalize_to_utc: bool,
    /// Read `05/06/2010` as 5 June.
    pub day_first: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self::base_default().with_env_overrides()
    }
}

impl ParserConfig {
    /// Built-in defaults without environment overrides.
    pub fn base_default() -> Self {
        Self {
            min_year: DEFAULT_MIN_YEAR,
            max_year: DEFAULT_MAX_YEAR,
            normalize_to_utc: false,
            day_first: false,
        }
    }

    /// Load from a file, then apply environment overrides.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let config: Self = load_config_file(path)?;
        config.with_env_overrides().validated()
    }

    /// Apply `DATESIFT_*` environment overrides.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup.
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let flag = |key: &str| {
            lookup(key)
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false)
        };
        let year = |key: &str| {
            let raw = lookup(key)?;
            match raw.trim().parse::<i32>() {
                Ok(year) => Some(year),
                Err(_) => {
                    warn!(key, value = %raw, "ignoring non-numeric year override");
                    None
                }
            }
        };

        if flag("DATESIFT_DAY_FIRST") {
            self.day_first = true;
        }
        if flag("DATESIFT_NORMALIZE_UTC") {
            self.normalize_to_utc = true;
        }
        if let Some(min) = year("DATESIFT_MIN_YEAR") {
            self.min_year = min;
        }
        if let Some(max) = year("DATESIFT_MAX_YEAR") {
            self.max_year = max;
        }
        self
    }

    /// Reject a year window that can never match.
    pub fn validated(self) -> Result<Self, ConfigError> {
        if self.min_year > self.max_year {
            return Err(ConfigError::InvalidYearWindow {
                min: self.min_year,
                max: self.max_year,
            });
        }
        Ok(self)
    }

    pub fn bank_options(&self) -> BankOptions {
        BankOptions {
            day_first: self.day_first,
        }
    }
}
