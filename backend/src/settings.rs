//! Process configuration loaded via OrthoConfig.
//!
//! Values come from environment variables, an optional configuration file,
//! and command-line flags, in increasing order of precedence.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::outbound::openweather::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DB_POOL_SIZE: u32 = 4;

/// Errors raised when a configured value cannot be interpreted.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address '{value}': {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("invalid weather endpoint '{value}': {source}")]
    Endpoint {
        value: String,
        #[source]
        source: url::ParseError,
    },
}

/// Listener and persistence settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "WEATHERDESK")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. Without one the process keeps records in memory.
    pub database_url: Option<String>,
    /// Maximum number of pooled database connections.
    #[ortho_config(default = 4)]
    #[serde(default = "default_db_pool_size")]
    pub db_pool_size: u32,
}

fn default_db_pool_size() -> u32 {
    DEFAULT_DB_POOL_SIZE
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

impl ServerSettings {
    /// Configured listen address, `0.0.0.0:8080` by default.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    /// Database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Pool size, never below one connection.
    pub fn db_pool_size(&self) -> u32 {
        self.db_pool_size.max(1)
    }
}

/// Weather provider settings.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "OPENWEATHER")]
pub struct WeatherSettings {
    pub api_key: Option<String>,
    pub endpoint: Option<String>,
    /// Request timeout in seconds; zero means the default.
    #[ortho_config(default = 10)]
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl std::fmt::Debug for WeatherSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherSettings")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("endpoint", &self.endpoint)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl WeatherSettings {
    /// Move the API key out so only the weather adapter holds it. Blank
    /// keys count as missing.
    pub fn take_api_key(&mut self) -> Option<String> {
        self.api_key.take().filter(|key| !key.trim().is_empty())
    }

    pub fn endpoint(&self) -> Result<Url, SettingsError> {
        let value = self.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT);
        Url::parse(value).map_err(|source| SettingsError::Endpoint {
            value: value.to_owned(),
            source,
        })
    }

    /// Request timeout, ten seconds unless configured.
    pub fn timeout(&self) -> Duration {
        match self.timeout_secs {
            0 => DEFAULT_TIMEOUT,
            secs => Duration::from_secs(secs),
        }
    }
}
