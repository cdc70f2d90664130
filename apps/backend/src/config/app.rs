use std::env;
use std::time::Duration;

use super::db::parse_var;
use crate::error::AppError;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_POKEAPI_BASE_URL: &str = "https://pokeapi.co/api/v2";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Process-level settings outside the database pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub pokeapi_base_url: String,
    /// Deadline applied to every service call made by the HTTP adapter
    pub request_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            pokeapi_base_url: DEFAULT_POKEAPI_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let host = env::var("BACKEND_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let port = parse_var("BACKEND_PORT", DEFAULT_PORT)?;
        let pokeapi_base_url = env::var("POKEAPI_BASE_URL")
            .map(|u| u.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| DEFAULT_POKEAPI_BASE_URL.to_string());
        let timeout_secs = parse_var("REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?;
        if timeout_secs == 0 {
            return Err(AppError::config("REQUEST_TIMEOUT_SECS must be positive"));
        }

        Ok(Self {
            host,
            port,
            pokeapi_base_url,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }

    pub fn bind_addr(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}
