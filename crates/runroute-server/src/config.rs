//! Server configuration from environment.

use std::env;
use std::str::FromStr;

use runroute_core::RouteDefaults;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value for {var}: '{value}'")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    /// Base URL of the upstream routing API
    pub route_api: String,
    pub enable_cache: bool,
    /// Optional bound on cached responses; `None` keeps every entry
    pub cache_max_entries: Option<usize>,
    pub route_defaults: RouteDefaults,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let route_api = lookup("ROUTE_API")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .ok_or(ConfigError::Missing("ROUTE_API"))?;

        let fallback = RouteDefaults::default();
        let route_defaults = RouteDefaults {
            speed: parse_var(&lookup, "ROUTE_DEFAULT_SPEED")?.unwrap_or(fallback.speed),
            preferences_mask: parse_var(&lookup, "ROUTE_DEFAULT_PREFERENCES")?
                .unwrap_or(fallback.preferences_mask),
            random_seed: parse_var(&lookup, "ROUTE_DEFAULT_RANDOM_SEED")?
                .unwrap_or(fallback.random_seed),
        };

        Ok(Self {
            server_port: parse_var(&lookup, "RUNROUTE_PORT")?.unwrap_or(3000),
            route_api,
            enable_cache: lookup("ENABLE_CACHE")
                .map(|value| parse_flag(&value))
                .unwrap_or(false),
            cache_max_entries: parse_var(&lookup, "ROUTE_CACHE_MAX_ENTRIES")?,
            route_defaults,
        })
    }
}

fn parse_var<F, T>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(var) {
        None => Ok(None),
        Some(value) if value.trim().is_empty() => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { var, value }),
    }
}

/// Any non-empty value enables the flag unless it spells out "off".
fn parse_flag(value: &str) -> bool {
    let value = value.trim().to_ascii_lowercase();
    !matches!(value.as_str(), "" | "0" | "false" | "no" | "off")
}
