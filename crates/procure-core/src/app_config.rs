//! Runtime settings shared by the server and the CLI.

use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl Environment {
    /// Development is the only environment allowed to run without API keys.
    #[must_use]
    pub fn is_development(self) -> bool {
        self == Self::Development
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "development" => Ok(Self::Development),
            "test" => Ok(Self::Test),
            "production" => Ok(Self::Production),
            other => Err(ConfigError::InvalidEnvVar {
                var: "PROCURE_ENV".to_string(),
                reason: format!("unknown environment '{other}'"),
            }),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Development => "development",
            Self::Test => "test",
            Self::Production => "production",
        })
    }
}

/// Where the warehouse and supplier tables live and how the pool is sized.
#[derive(Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
}

impl fmt::Debug for DatabaseSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseSettings")
            .field("url", &"[redacted]")
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .field("acquire_timeout", &self.acquire_timeout)
            .finish()
    }
}

/// HTTP surface settings. Ignored by the CLI.
#[derive(Clone)]
pub struct ServerSettings {
    pub bind_addr: SocketAddr,
    /// Accepted bearer tokens. Empty means "no auth" and is only allowed in
    /// development.
    pub api_keys: Vec<String>,
    pub rate_limit_per_minute: usize,
}

impl fmt::Debug for ServerSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerSettings")
            .field("bind_addr", &self.bind_addr)
            .field("api_keys", &format_args!("<{} key(s)>", self.api_keys.len()))
            .field("rate_limit_per_minute", &self.rate_limit_per_minute)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Seed file read by `procure-cli db seed`.
    pub sites_path: PathBuf,
    pub database: DatabaseSettings,
    pub server: ServerSettings,
}
