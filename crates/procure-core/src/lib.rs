pub mod app_config;
pub mod config;
pub mod diagnostics;
pub mod directory;
pub mod geo;
pub mod nearest;
pub mod sites;

use thiserror::Error;

pub use app_config::{AppConfig, DatabaseSettings, Environment, ServerSettings};
pub use config::{load_app_config, load_app_config_from_env};
pub use diagnostics::{ErrorLog, TracingErrorLog};
pub use directory::{SupplierDirectory, SupplierLocation};
pub use geo::{distance_km, extract_point, haversine_km, ParseError, Point, EARTH_RADIUS_KM};
pub use nearest::{find_nearest_supplier, NearestSupplier};
pub use sites::{load_sites, SitesFile, SupplierConfig, WarehouseConfig};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read sites file {path}: {source}")]
    SitesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse sites file: {0}")]
    SitesFileParse(#[source] serde_yaml::Error),

    #[error("invalid geolocation for {site}: {source}")]
    SitesGeolocation {
        site: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("sites validation failed: {0}")]
    Validation(String),
}
