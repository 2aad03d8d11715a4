//! Configuration Module
//!
//! Handles loading and validating executor and server configuration from
//! environment variables.

use std::env;
use std::net::IpAddr;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;

/// Default number of operations allowed to run at once.
pub const DEFAULT_MAX_CONCURRENT: usize = 5;

/// Default lifetime of a cached result.
pub const DEFAULT_CACHE_EXPIRY: Duration = Duration::from_secs(30);

// == Executor Config ==
/// Settings fixed at executor construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutorConfig {
    /// Maximum number of operations running at once
    pub max_concurrent: usize,
    /// How long a cached result stays valid
    pub cache_expiry: Duration,
}

impl ExecutorConfig {
    pub fn new(max_concurrent: usize, cache_expiry: Duration) -> Self {
        Self {
            max_concurrent,
            cache_expiry,
        }
    }

    /// Rejects a zero concurrency limit.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_concurrent == 0 {
            return Err(ConfigError::InvalidMaxConcurrent(0));
        }
        Ok(())
    }
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CONCURRENT, DEFAULT_CACHE_EXPIRY)
    }
}

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of concurrent profile store calls
    pub max_concurrent: usize,
    /// Lifetime of cached profile reads in milliseconds
    pub cache_expiry_ms: u64,
    /// Address the HTTP server binds to
    pub server_host: IpAddr,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_CONCURRENT` - Concurrent operation limit (default: 5, must be > 0)
    /// - `CACHE_EXPIRY_MS` - Cached result lifetime in ms (default: 30000)
    /// - `SERVER_HOST` - Bind address (default: 0.0.0.0)
    /// - `SERVER_PORT` - HTTP server port (default: 5000)
    ///
    /// A variable that is set but cannot be parsed is an error, never a
    /// silent fallback to the default.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a Config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let max_concurrent: i64 = parse_var(&lookup, "MAX_CONCURRENT")?
            .unwrap_or(defaults.max_concurrent as i64);
        if max_concurrent <= 0 {
            return Err(ConfigError::InvalidMaxConcurrent(max_concurrent));
        }

        Ok(Self {
            max_concurrent: max_concurrent as usize,
            cache_expiry_ms: parse_var(&lookup, "CACHE_EXPIRY_MS")?
                .unwrap_or(defaults.cache_expiry_ms),
            server_host: parse_var(&lookup, "SERVER_HOST")?.unwrap_or(defaults.server_host),
            server_port: parse_var(&lookup, "SERVER_PORT")?.unwrap_or(defaults.server_port),
        })
    }

    /// Executor settings derived from this configuration.
    pub fn executor(&self) -> ExecutorConfig {
        ExecutorConfig::new(
            self.max_concurrent,
            Duration::from_millis(self.cache_expiry_ms),
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            cache_expiry_ms: DEFAULT_CACHE_EXPIRY.as_millis() as u64,
            server_host: IpAddr::from([0, 0, 0, 0]),
            server_port: 5000,
        }
    }
}

fn parse_var<F, T>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(var) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { var, value }),
    }
}
