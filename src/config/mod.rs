//! Runtime configuration.
//!
//! Everything comes from environment variables with development defaults, so
//! `Config::from_env` works on a bare checkout. Values that are present but
//! unusable are reported instead of silently replaced.

use std::env;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Environment variable names. Public so tests and deploy scripts can refer
/// to them.
pub const ENV_BIND_ADDR: &str = "BIND_ADDR";
pub const ENV_UPSTREAM_BASE_URL: &str = "UPSTREAM_BASE_URL";
pub const ENV_HOMEPAGE_URL: &str = "HOMEPAGE_URL";
pub const ENV_CACHE_TTL_SECS: &str = "CACHE_TTL_SECS";
pub const ENV_CACHE_SWEEP_SECS: &str = "CACHE_SWEEP_SECS";
pub const ENV_FETCH_CONNECT_TIMEOUT_SECS: &str = "FETCH_CONNECT_TIMEOUT_SECS";
pub const ENV_FETCH_TIMEOUT_SECS: &str = "FETCH_TIMEOUT_SECS";
pub const ENV_LOG_FORMAT: &str = "LOG_FORMAT";

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:14000";
const DEFAULT_UPSTREAM_BASE_URL: &str = "http://www.auboutdufil.com/index.php";
const DEFAULT_HOMEPAGE_URL: &str = "https://github.com/Shywim/auboutdufil-api";
const DEFAULT_CACHE_TTL_SECS: u64 = 60 * 60;
const DEFAULT_CACHE_SWEEP_SECS: u64 = 60;
const DEFAULT_FETCH_CONNECT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Application runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    bind_addr: String,
    upstream_base_url: Url,
    homepage_url: String,
    cache_ttl: Duration,
    cache_sweep_interval: Duration,
    fetch_connect_timeout: Duration,
    fetch_timeout: Duration,
    log_format: LogFormat,
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn secs_var(name: &'static str, default: u64) -> Result<Duration, ConfigError> {
    let Ok(raw) = env::var(name) else {
        return Ok(Duration::from_secs(default));
    };
    match raw.trim().parse::<u64>() {
        Ok(0) => Err(ConfigError::InvalidValue {
            field: name,
            reason: "must be greater than zero".to_string(),
        }),
        Ok(secs) => Ok(Duration::from_secs(secs)),
        Err(e) => Err(ConfigError::InvalidValue {
            field: name,
            reason: e.to_string(),
        }),
    }
}

impl Config {
    /// Load from environment variables, falling back to development defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let upstream_raw = var_or(ENV_UPSTREAM_BASE_URL, DEFAULT_UPSTREAM_BASE_URL);
        let upstream_base_url =
            Url::parse(&upstream_raw).map_err(|e| ConfigError::InvalidValue {
                field: ENV_UPSTREAM_BASE_URL,
                reason: e.to_string(),
            })?;

        let log_format = match var_or(ENV_LOG_FORMAT, "text").to_lowercase().as_str() {
            "text" | "" => LogFormat::Text,
            "json" => LogFormat::Json,
            other => {
                return Err(ConfigError::InvalidValue {
                    field: ENV_LOG_FORMAT,
                    reason: format!("expected 'text' or 'json', got '{other}'"),
                });
            }
        };

        Ok(Self {
            bind_addr: var_or(ENV_BIND_ADDR, DEFAULT_BIND_ADDR),
            upstream_base_url,
            homepage_url: var_or(ENV_HOMEPAGE_URL, DEFAULT_HOMEPAGE_URL),
            cache_ttl: secs_var(ENV_CACHE_TTL_SECS, DEFAULT_CACHE_TTL_SECS)?,
            cache_sweep_interval: secs_var(ENV_CACHE_SWEEP_SECS, DEFAULT_CACHE_SWEEP_SECS)?,
            fetch_connect_timeout: secs_var(
                ENV_FETCH_CONNECT_TIMEOUT_SECS,
                DEFAULT_FETCH_CONNECT_TIMEOUT_SECS,
            )?,
            fetch_timeout: secs_var(ENV_FETCH_TIMEOUT_SECS, DEFAULT_FETCH_TIMEOUT_SECS)?,
            log_format,
        })
    }

    /// TCP bind address (host:port) for the HTTP server.
    pub fn bind_addr(&self) -> &str {
        &self.bind_addr
    }
    /// Catalog endpoint the listing query is appended to.
    pub fn upstream_base_url(&self) -> &Url {
        &self.upstream_base_url
    }
    /// Where `/` redirects to.
    pub fn homepage_url(&self) -> &str {
        &self.homepage_url
    }
    pub fn cache_ttl(&self) -> Duration {
        self.cache_ttl
    }
    pub fn cache_sweep_interval(&self) -> Duration {
        self.cache_sweep_interval
    }
    pub fn fetch_connect_timeout(&self) -> Duration {
        self.fetch_connect_timeout
    }
    pub fn fetch_timeout(&self) -> Duration {
        self.fetch_timeout
    }
    pub fn log_format(&self) -> LogFormat {
        self.log_format
    }
}

/// Errors that can occur while building a configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
}
