//! Environment-driven process configuration.
//!
//! All settings come from environment variables with fallbacks:
//!
//! - `CHORES_ADDRESS` — listen address, default `0.0.0.0`.
//! - `CHORES_PORT` — listen port, default `8080`.
//! - `CHORES_BACKEND` — `memory` or `postgres`, default `memory`.
//! - `CHORES_DATABASE_URL` — connection string, required for `postgres`.
//! - `CHORES_STATEMENT_TIMEOUT_SECS` — per-statement timeout for the
//!   relational backend, default `10`.

use serde::{Serialize, Serializer};
use std::env;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while reading configuration from the environment.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required environment variable is absent.
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// An environment variable holds an unusable value.
    #[error("invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}

/// Storage backend selected at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// Transient in-process store.
    Memory,
    /// `PostgreSQL`-backed store.
    Postgres,
}

impl StorageBackend {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "postgres" => Ok(Self::Postgres),
            _ => Err(ConfigError::InvalidValue(
                "CHORES_BACKEND",
                value.to_owned(),
            )),
        }
    }
}

/// Configuration for the chores server process.
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Address the HTTP server binds to.
    pub addr: String,
    /// TCP port the HTTP server listens on.
    pub port: u16,
    /// Storage backend the server uses for its lifetime.
    pub backend: StorageBackend,
    /// Database connection string, set when the backend is `postgres`.
    #[serde(serialize_with = "redact")]
    pub database_url: Option<String>,
    /// Upper bound on single-statement execution in the relational backend.
    pub statement_timeout_secs: u64,
}

impl Config {
    /// Reads configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the backend name is unknown, the port or
    /// timeout does not parse, or the `postgres` backend is selected without
    /// a database URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        let backend = StorageBackend::parse(&env_or("CHORES_BACKEND", "memory"))?;
        let database_url = env::var("CHORES_DATABASE_URL").ok();
        if backend == StorageBackend::Postgres && database_url.is_none() {
            return Err(ConfigError::MissingEnvVar("CHORES_DATABASE_URL"));
        }

        Ok(Self {
            addr: env_or("CHORES_ADDRESS", "0.0.0.0"),
            port: parse_env("CHORES_PORT", 8080)?,
            backend,
            database_url,
            statement_timeout_secs: parse_env("CHORES_STATEMENT_TIMEOUT_SECS", 10)?,
        })
    }

    /// Returns the `addr:port` string the server binds to.
    #[must_use]
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.addr, self.port)
    }

    /// Returns the statement timeout as a [`Duration`].
    #[must_use]
    pub const fn statement_timeout(&self) -> Duration {
        Duration::from_secs(self.statement_timeout_secs)
    }

    /// Renders the configuration as JSON for startup logging, with the
    /// database URL redacted.
    #[must_use]
    pub fn dump(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "<unserializable>".to_owned())
    }
}

/// Returns the environment variable by key, falling back when unset.
fn env_or(key: &str, fallback: &str) -> String {
    env::var(key).unwrap_or_else(|_| fallback.to_owned())
}

fn parse_env<T>(key: &'static str, fallback: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key, raw)),
        Err(_) => Ok(fallback),
    }
}

fn redact<S>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(_) => serializer.serialize_str("<redacted>"),
        None => serializer.serialize_none(),
    }
}
