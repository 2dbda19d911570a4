use std::env;
use std::time::Duration;

use thiserror::Error;

use crate::app::PaginatorConfig;

/// Startup configuration errors. Any of these aborts the process.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value '{value}': {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Default page size for `GET /curses`, parsed from PAGINATOR_LIMIT_DEFAULT
    pub paginator: PaginatorConfig,
    /// Upper bound on how long a single request may run
    pub request_timeout: Duration,
    /// Create the `curses` table on startup if it is missing
    pub auto_migrate: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let database_url = required("DATABASE_URL")?;
        let paginator = PaginatorConfig::parse(&required("PAGINATOR_LIMIT_DEFAULT")?)?;

        Ok(Self {
            database_url,
            port: parsed_or("PORT", 8080)?,
            paginator,
            request_timeout: Duration::from_secs(parsed_or("REQUEST_TIMEOUT_SECS", 5)?),
            auto_migrate: parsed_or("DATABASE_AUTO_MIGRATE", false)?,
        })
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(name)),
    }
}

fn parsed_or<T>(name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => {
            let parsed = value.trim().parse::<T>();
            parsed.map_err(|e| ConfigError::Invalid {
                name,
                value,
                reason: e.to_string(),
            })
        }
        _ => Ok(default),
    }
}
