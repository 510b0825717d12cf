//! Process configuration from the environment.
//!
//! The provider API key is only ever read from here; it is never compiled
//! into the binary.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::maps::MapsConfig;

/// Environment variable holding the provider API key.
pub const API_KEY_VAR: &str = "MAPS_API_KEY";

/// Environment variable overriding the provider base URL.
pub const BASE_URL_VAR: &str = "MAPS_BASE_URL";

/// Environment variable pointing at a mock fixture file.
pub const MOCK_FIXTURE_VAR: &str = "TRIP_MOCK_FIXTURE";

/// Environment variable for the listen address.
pub const ADDR_VAR: &str = "TRIP_SERVER_ADDR";

/// Default listen address.
pub const DEFAULT_ADDR: &str = "127.0.0.1:5000";

/// Error reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {var} {value:?}: {source}")]
    InvalidAddr {
        var: &'static str,
        value: String,
        source: std::net::AddrParseError,
    },
}

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Provider API key; `None` if unset
    pub api_key: Option<String>,

    /// Provider base URL override
    pub base_url: Option<String>,

    /// Serve canned data from this fixture instead of the live provider
    pub mock_fixture: Option<PathBuf>,

    /// Address to listen on
    pub addr: SocketAddr,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| {
            lookup(var)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let addr_text = get(ADDR_VAR).unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = addr_text
            .parse()
            .map_err(|source| ConfigError::InvalidAddr {
                var: ADDR_VAR,
                value: addr_text.clone(),
                source,
            })?;

        Ok(Self {
            api_key: get(API_KEY_VAR),
            base_url: get(BASE_URL_VAR),
            mock_fixture: get(MOCK_FIXTURE_VAR).map(PathBuf::from),
            addr,
        })
    }

    /// Maps client configuration. An unset key becomes an empty key, which
    /// the provider rejects with `REQUEST_DENIED`.
    pub fn maps_config(&self) -> MapsConfig {
        let config = MapsConfig::new(self.api_key.clone().unwrap_or_default());
        match &self.base_url {
            Some(url) => config.with_base_url(url.clone()),
            None => config,
        }
    }
}
