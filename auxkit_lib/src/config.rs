//! Runtime configuration: an optional TOML file overridden by environment variables.
//!
//! ```toml
//! base_url = "https://api.example.com"
//! page_size = 40
//! max_pages = 200
//! cache_ttl_secs = 300
//! param_style = "short"
//! ```

use std::path::Path;
use std::time::Duration;

use auxkit_api::types::{ParamStyle, DEFAULT_PAGE_SIZE};
use serde::Deserialize;

use crate::error::AuxkitError;
use crate::validation;

pub const ENV_BASE_URL: &str = "AUXKIT_BASE_URL";
pub const ENV_PAGE_SIZE: &str = "AUXKIT_PAGE_SIZE";
pub const ENV_MAX_PAGES: &str = "AUXKIT_MAX_PAGES";
pub const ENV_CACHE_TTL_SECS: &str = "AUXKIT_CACHE_TTL_SECS";
pub const ENV_PARAM_STYLE: &str = "AUXKIT_PARAM_STYLE";

const DEFAULT_CACHE_TTL_SECS: u64 = 300;

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Root of the paginated API. Required by commands that fetch.
    pub base_url: Option<String>,
    pub page_size: u64,
    pub max_pages: Option<u64>,
    /// `0` disables page caching.
    pub cache_ttl_secs: u64,
    pub param_style: ParamStyle,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: None,
            page_size: DEFAULT_PAGE_SIZE,
            max_pages: None,
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
            param_style: ParamStyle::Long,
        }
    }
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self, AuxkitError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path` (when given) and applies environment overrides.
    ///
    /// An explicit path that does not exist is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, AuxkitError> {
        let config = match path {
            Some(path) => {
                let content = std::fs::read_to_string(path).map_err(|e| {
                    AuxkitError::Config(format!("cannot read {}: {}", path.display(), e))
                })?;
                Self::from_toml_str(&content)?
            }
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from `lookup`, keyed by the `AUXKIT_*` variable names.
    pub fn apply_overrides<F>(mut self, lookup: F) -> Result<Self, AuxkitError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_BASE_URL) {
            self.base_url = Some(url);
        }
        if let Some(raw) = lookup(ENV_PAGE_SIZE) {
            self.page_size = parse_env_u64(ENV_PAGE_SIZE, &raw)?;
        }
        if let Some(raw) = lookup(ENV_MAX_PAGES) {
            self.max_pages = Some(parse_env_u64(ENV_MAX_PAGES, &raw)?);
        }
        if let Some(raw) = lookup(ENV_CACHE_TTL_SECS) {
            self.cache_ttl_secs = parse_env_u64(ENV_CACHE_TTL_SECS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_PARAM_STYLE) {
            self.param_style = validation::validate_param_style(&raw)
                .map_err(|e| AuxkitError::Config(format!("{}: {}", ENV_PARAM_STYLE, e)))?;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), AuxkitError> {
        validation::validate_page_size(self.page_size)
            .map_err(|e| AuxkitError::Config(e.to_string()))?;
        if let Some(max_pages) = self.max_pages {
            validation::validate_max_pages(max_pages)
                .map_err(|e| AuxkitError::Config(e.to_string()))?;
        }
        Ok(())
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// The base URL, or a config error naming how to provide one.
    pub fn require_base_url(&self) -> Result<&str, AuxkitError> {
        self.base_url.as_deref().ok_or_else(|| {
            AuxkitError::Config(format!(
                "no base URL configured; set base_url or {}",
                ENV_BASE_URL
            ))
        })
    }
}

fn parse_env_u64(key: &str, raw: &str) -> Result<u64, AuxkitError> {
    raw.trim().parse::<u64>().map_err(|_| {
        AuxkitError::Config(format!(
            "{} must be a non-negative integer, got '{}'",
            key, raw
        ))
    })
}
