//! Warehouse and supplier seed file (`config/sites.yaml`).

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarehouseConfig {
    pub name: String,
    /// Inline GeoJSON feature collection.
    #[serde(default)]
    pub geolocation: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplierConfig {
    pub name: String,
    #[serde(default)]
    pub geolocation: Option<serde_json::Value>,
    #[serde(default)]
    pub disabled: bool,
}

#[derive(Debug, Deserialize)]
pub struct SitesFile {
    #[serde(default)]
    pub warehouses: Vec<WarehouseConfig>,
    #[serde(default)]
    pub suppliers: Vec<SupplierConfig>,
}

impl WarehouseConfig {
    /// The geolocation as it is stored: compact JSON text.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::SitesGeolocation` if the value cannot be serialized.
    pub fn geolocation_text(&self) -> Result<Option<String>, ConfigError> {
        serialize_geolocation(&self.name, self.geolocation.as_ref())
    }
}

impl SupplierConfig {
    /// The geolocation as it is stored: compact JSON text.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::SitesGeolocation` if the value cannot be serialized.
    pub fn geolocation_text(&self) -> Result<Option<String>, ConfigError> {
        serialize_geolocation(&self.name, self.geolocation.as_ref())
    }
}

fn serialize_geolocation(
    site: &str,
    geolocation: Option<&serde_json::Value>,
) -> Result<Option<String>, ConfigError> {
    geolocation
        .filter(|v| !v.is_null())
        .map(|v| {
            serde_json::to_string(v).map_err(|source| ConfigError::SitesGeolocation {
                site: site.to_string(),
                source,
            })
        })
        .transpose()
}

/// Load and validate the sites file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_sites(path: &Path) -> Result<SitesFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SitesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let sites: SitesFile = serde_yaml::from_str(&content).map_err(ConfigError::SitesFileParse)?;

    validate_sites(&sites)?;

    Ok(sites)
}

fn validate_sites(sites: &SitesFile) -> Result<(), ConfigError> {
    validate_names("warehouse", sites.warehouses.iter().map(|w| w.name.as_str()))?;
    validate_names("supplier", sites.suppliers.iter().map(|s| s.name.as_str()))
}

fn validate_names<'a>(
    kind: &str,
    names: impl Iterator<Item = &'a str>,
) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for name in names {
        if name.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "{kind} name must be non-empty"
            )));
        }
        if !seen.insert(name.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate {kind} name: '{name}'"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn supplier(name: &str) -> SupplierConfig {
        SupplierConfig {
            name: name.to_string(),
            geolocation: None,
            disabled: false,
        }
    }

    #[test]
    fn parses_inline_geojson_and_defaults() {
        let yaml = r#"
warehouses:
  - name: Stores - Lyon
    geolocation:
      type: FeatureCollection
      features:
        - type: Feature
          properties: {}
          geometry:
            type: Point
            coordinates: [4.8357, 45.764]
suppliers:
  - name: Green Metals
  - name: Old Timber
    disabled: true
"#;
        let sites: SitesFile = serde_yaml::from_str(yaml).expect("parse");
        validate_sites(&sites).expect("valid");

        assert_eq!(sites.warehouses.len(), 1);
        let text = sites.warehouses[0].geolocation_text().unwrap().expect("text");
        let point = crate::geo::extract_point(Some(&text)).unwrap().expect("point");
        assert_eq!(point, crate::geo::Point::new(4.8357, 45.764));

        assert!(!sites.suppliers[0].disabled);
        assert!(sites.suppliers[0].geolocation_text().unwrap().is_none());
        assert!(sites.suppliers[1].disabled);
    }

    #[test]
    fn validate_rejects_empty_name() {
        let sites = SitesFile {
            warehouses: vec![],
            suppliers: vec![supplier("  ")],
        };
        let err = validate_sites(&sites).unwrap_err();
        assert!(err.to_string().contains("non-empty"));
    }

    #[test]
    fn validate_rejects_duplicate_name_case_insensitively() {
        let sites = SitesFile {
            warehouses: vec![],
            suppliers: vec![supplier("Acme"), supplier("ACME")],
        };
        let err = validate_sites(&sites).unwrap_err();
        assert!(err.to_string().contains("duplicate supplier name"));
    }

    #[test]
    fn same_name_may_be_both_warehouse_and_supplier() {
        let sites = SitesFile {
            warehouses: vec![WarehouseConfig {
                name: "Acme".to_string(),
                geolocation: None,
            }],
            suppliers: vec![supplier("Acme")],
        };
        assert!(validate_sites(&sites).is_ok());
    }

    #[test]
    fn load_sites_from_real_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("config")
            .join("sites.yaml");
        assert!(
            path.exists(),
            "sites.yaml missing at {path:?}"
        );
        let sites = load_sites(&path).expect("load sites.yaml");
        assert!(!sites.warehouses.is_empty());
        assert!(!sites.suppliers.is_empty());
    }
}
