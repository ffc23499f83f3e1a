use std::env::VarError;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use crate::app_config::{AppConfig, DatabaseSettings, Environment, ServerSettings};
use crate::ConfigError;

/// Load configuration after reading `.env` (if any) into the process
/// environment.
///
/// # Errors
///
/// Returns [`ConfigError`] if `DATABASE_URL` is missing or any `PROCURE_*`
/// value does not parse.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Like [`load_app_config`] but never touches `.env`.
///
/// # Errors
///
/// Same as [`load_app_config`].
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Env lookup with typed accessors; unset optional vars take their default.
struct Vars<F> {
    lookup: F,
}

impl<F> Vars<F>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    fn required(&self, var: &str) -> Result<String, ConfigError> {
        (self.lookup)(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    }

    fn text(&self, var: &str, default: &str) -> String {
        (self.lookup)(var).unwrap_or_else(|_| default.to_string())
    }

    fn parsed<T>(&self, var: &str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match (self.lookup)(var) {
            Ok(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            }),
            Err(_) => Ok(default),
        }
    }
}

fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    let vars = Vars { lookup };

    let env = match (vars.lookup)("PROCURE_ENV") {
        Ok(raw) => raw.parse::<Environment>()?,
        Err(_) => Environment::Development,
    };

    let database = DatabaseSettings {
        url: vars.required("DATABASE_URL")?,
        max_connections: vars.parsed("PROCURE_DB_MAX_CONNECTIONS", 10)?,
        min_connections: vars.parsed("PROCURE_DB_MIN_CONNECTIONS", 1)?,
        acquire_timeout: Duration::from_secs(vars.parsed("PROCURE_DB_ACQUIRE_TIMEOUT_SECS", 10)?),
    };
    if database.min_connections > database.max_connections {
        return Err(ConfigError::InvalidEnvVar {
            var: "PROCURE_DB_MIN_CONNECTIONS".to_string(),
            reason: format!(
                "{} exceeds PROCURE_DB_MAX_CONNECTIONS ({})",
                database.min_connections, database.max_connections
            ),
        });
    }

    let server = ServerSettings {
        bind_addr: vars.parsed("PROCURE_BIND_ADDR", SocketAddr::from(([0, 0, 0, 0], 3000)))?,
        api_keys: split_api_keys(&vars.text("PROCURE_API_KEYS", "")),
        rate_limit_per_minute: vars.parsed("PROCURE_RATE_LIMIT_PER_MINUTE", 120)?,
    };

    Ok(AppConfig {
        env,
        log_level: vars.text("PROCURE_LOG_LEVEL", "info"),
        sites_path: vars.text("PROCURE_SITES_PATH", "./config/sites.yaml").into(),
        database,
        server,
    })
}

/// Comma-separated tokens; blanks and surrounding whitespace are dropped.
fn split_api_keys(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
