use std::env;
use log::{info, debug};
use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_CORS_MAX_AGE: usize = 3600;
const DEFAULT_SESSION_TTL_SECS: u32 = 1800;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be a number, got '{value}'")]
    InvalidNumber { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub cors_max_age: usize,
    /// Idle seconds before an un-ended session is dropped.
    pub session_ttl_secs: u32,
}

impl ServerConfig {
    /// Reads the process environment; call `dotenv()` first to pick up `.env`.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("SERVER_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = parse_or("SERVER_PORT", &lookup, DEFAULT_PORT)?;
        let log_level = lookup("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());
        let cors_max_age = parse_or("CORS_MAX_AGE", &lookup, DEFAULT_CORS_MAX_AGE)?;
        let session_ttl_secs = parse_or("SESSION_TTL_SECS", &lookup, DEFAULT_SESSION_TTL_SECS)?;

        Ok(ServerConfig {
            host,
            port,
            log_level,
            cors_max_age,
            session_ttl_secs,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn log_summary(&self) {
        info!("Server address: {}", self.bind_address());
        debug!(
            "Log level: {}, CORS max age: {}s, session TTL: {}s",
            self.log_level, self.cors_max_age, self.session_ttl_secs
        );
    }
}

fn parse_or<T, F>(name: &'static str, lookup: &F, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidNumber { name, value }),
        None => Ok(default),
    }
}
