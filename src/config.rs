//! Service configuration from environment variables
//!
//! Loaded once at startup and treated as read-only afterwards.

use crate::error::ConfigError;
use crate::upstream::{SourceKind, SourceRegistry, UpstreamSource};
use std::env;
use std::num::NonZeroUsize;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 9876;
pub const DEFAULT_WINDOW_SIZE: usize = 10;
pub const DEFAULT_FETCH_TIMEOUT_MS: u64 = 500;
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:9000/evaluation-service";

/// Configuration for the average service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Port the HTTP server listens on
    pub port: u16,

    /// Window capacity
    pub window_size: NonZeroUsize,

    /// Bearer token sent upstream
    pub auth_token: Option<String>,

    /// Upstream timeout
    pub fetch_timeout: Duration,

    /// Identifier → endpoint mapping
    pub registry: SourceRegistry,
}

impl ServiceConfig {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `PORT` (default: 9876)
    /// - `WINDOW_SIZE` (default: 10, must be > 0)
    /// - `AUTH_TOKEN` (default: unset)
    /// - `FETCH_TIMEOUT_MS` (default: 500, must be > 0)
    /// - `NUMBERS_API_BASE_URL` (default: http://127.0.0.1:9000/evaluation-service)
    /// - `NUMBERS_URL_{PRIME,FIBONACCI,EVEN,RANDOM}` (default: base URL + primes/fibo/even/rand)
    /// - `NUMBERS_LABEL_{PRIME,FIBONACCI,EVEN,RANDOM}` (default: p/f/e/r)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = parse_or("PORT", &lookup, DEFAULT_PORT)?;

        let window_size = parse_or("WINDOW_SIZE", &lookup, DEFAULT_WINDOW_SIZE)?;
        let window_size =
            NonZeroUsize::new(window_size).ok_or_else(|| ConfigError::InvalidValue {
                name: "WINDOW_SIZE",
                value: window_size.to_string(),
                reason: "window size must be positive".to_string(),
            })?;

        let fetch_timeout_ms = parse_or("FETCH_TIMEOUT_MS", &lookup, DEFAULT_FETCH_TIMEOUT_MS)?;
        if fetch_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                name: "FETCH_TIMEOUT_MS",
                value: "0".to_string(),
                reason: "timeout must be positive".to_string(),
            });
        }

        let auth_token = lookup("AUTH_TOKEN").filter(|token| !token.is_empty());

        let base_url =
            lookup("NUMBERS_API_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = base_url.trim_end_matches('/');

        let sources = SourceKind::all()
            .into_iter()
            .map(|kind| UpstreamSource {
                kind,
                label: lookup(&format!("NUMBERS_LABEL_{}", kind.env_suffix()))
                    .map(|label| label.trim().to_string())
                    .unwrap_or_else(|| kind.default_label().to_string()),
                url: lookup(&format!("NUMBERS_URL_{}", kind.env_suffix()))
                    .unwrap_or_else(|| format!("{}/{}", base_url, kind.default_path())),
            })
            .collect();

        Ok(Self {
            port,
            window_size,
            auth_token,
            fetch_timeout: Duration::from_millis(fetch_timeout_ms),
            registry: SourceRegistry::new(sources)?,
        })
    }
}

fn parse_or<T, F>(name: &'static str, lookup: &F, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            name,
            value: raw.clone(),
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}
