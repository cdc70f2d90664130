use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::AppError;

const DEFAULT_MAX_CONNECTIONS: u32 = 20;
const DEFAULT_MIN_CONNECTIONS: u32 = 2;
const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 300;
const DEFAULT_MAX_LIFETIME_SECS: u64 = 1800;

/// URL for a private SQLite memory database.
pub const SQLITE_MEMORY_URL: &str = "sqlite::memory:";

/// Connection pool settings for the relational store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbSettings {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
}

impl DbSettings {
    /// Read pool settings from the environment.
    ///
    /// `DATABASE_URL` is required; the pool knobs fall back to their defaults
    /// when unset but are rejected when present and unparseable.
    pub fn from_env() -> Result<Self, AppError> {
        let url = must_var("DATABASE_URL")?;
        let max_connections = parse_var("DB_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;
        let min_connections = parse_var("DB_MIN_CONNECTIONS", DEFAULT_MIN_CONNECTIONS)?;
        let idle_timeout = parse_var("DB_IDLE_TIMEOUT", DEFAULT_IDLE_TIMEOUT_SECS)?;
        let max_lifetime = parse_var("DB_MAX_LIFETIME", DEFAULT_MAX_LIFETIME_SECS)?;

        let settings = Self {
            url,
            max_connections,
            min_connections,
            idle_timeout: Duration::from_secs(idle_timeout),
            max_lifetime: Duration::from_secs(max_lifetime),
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Single-connection SQLite memory profile.
    ///
    /// A memory database lives exactly as long as its connection, so the pool
    /// is pinned to one connection and the connector skips idle/lifetime reaping.
    pub fn in_memory() -> Self {
        Self {
            url: SQLITE_MEMORY_URL.to_string(),
            max_connections: 1,
            min_connections: 1,
            idle_timeout: Duration::from_secs(DEFAULT_IDLE_TIMEOUT_SECS),
            max_lifetime: Duration::from_secs(DEFAULT_MAX_LIFETIME_SECS),
        }
    }

    pub fn is_sqlite(&self) -> bool {
        self.url.starts_with("sqlite:")
    }

    pub fn is_memory(&self) -> bool {
        self.is_sqlite() && self.url.contains(":memory:")
    }

    fn validate(&self) -> Result<(), AppError> {
        if self.max_connections == 0 {
            return Err(AppError::config("DB_MAX_CONNECTIONS must be at least 1"));
        }
        if self.min_connections > self.max_connections {
            return Err(AppError::config(format!(
                "DB_MIN_CONNECTIONS ({}) exceeds DB_MAX_CONNECTIONS ({})",
                self.min_connections, self.max_connections
            )));
        }
        Ok(())
    }
}

/// Get required environment variable or return error
pub(crate) fn must_var(name: &str) -> Result<String, AppError> {
    match env::var(name) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::config(format!(
            "Required environment variable '{name}' is not set"
        ))),
    }
}

/// Parse an optional environment variable, falling back to `default` when unset.
pub(crate) fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T, AppError> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse::<T>().map_err(|_| {
            AppError::config(format!(
                "Environment variable '{name}' has an invalid value: '{raw}'"
            ))
        }),
        Err(_) => Ok(default),
    }
}
