//! Runtime configuration, read from the environment.
//!
//! | Variable                    | Default        |
//! |-----------------------------|----------------|
//! | `CATALOG_BIND_ADDR`         | `0.0.0.0:8080` |
//! | `CATALOG_SEARCH_FTS_CONFIG` | `simple`       |
//! | `CATALOG_PAGE_SIZE_DEFAULT` | `20`           |
//! | `CATALOG_PAGE_SIZE_MAX`     | `100`          |

use std::error::Error;
use std::fmt;

use crate::page::{PageLimits, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::search::TextProfile;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
    pub reason: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}={:?}: {}", self.var, self.value, self.reason)
    }
}

impl Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    pub bind_addr: String,
    pub text_profile: TextProfile,
    pub page_limits: PageLimits,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            text_profile: TextProfile::Simple,
            page_limits: PageLimits::default(),
        }
    }
}

impl CatalogConfig {
    /// Read the process environment. Call `dotenvy::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from any variable source; unset or blank variables take their default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|value| !value.trim().is_empty());

        let bind_addr = get("CATALOG_BIND_ADDR")
            .map(|addr| addr.trim().to_string())
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

        let text_profile = match get("CATALOG_SEARCH_FTS_CONFIG") {
            Some(value) => value.parse().map_err(|reason| ConfigError {
                var: "CATALOG_SEARCH_FTS_CONFIG",
                value,
                reason,
            })?,
            None => TextProfile::Simple,
        };

        let default_size = page_size(get("CATALOG_PAGE_SIZE_DEFAULT"), "CATALOG_PAGE_SIZE_DEFAULT", DEFAULT_PAGE_SIZE)?;
        let max_size = page_size(get("CATALOG_PAGE_SIZE_MAX"), "CATALOG_PAGE_SIZE_MAX", MAX_PAGE_SIZE)?;
        if default_size > max_size {
            return Err(ConfigError {
                var: "CATALOG_PAGE_SIZE_DEFAULT",
                value: default_size.to_string(),
                reason: format!("must not exceed CATALOG_PAGE_SIZE_MAX ({})", max_size),
            });
        }

        Ok(Self {
            bind_addr,
            text_profile,
            page_limits: PageLimits {
                default_size,
                max_size,
            },
        })
    }
}

fn page_size(value: Option<String>, var: &'static str, default: usize) -> Result<usize, ConfigError> {
    let Some(value) = value else {
        return Ok(default);
    };
    match value.trim().parse::<usize>() {
        Ok(size) if size >= 1 => Ok(size),
        _ => Err(ConfigError {
            var,
            value,
            reason: "expected a positive integer".into(),
        }),
    }
}
