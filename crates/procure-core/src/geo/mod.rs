//! Point extraction from stored GeoJSON and great-circle distance.

mod distance;
mod geojson;

use serde::{Deserialize, Serialize};

pub use distance::{distance_km, haversine_km, EARTH_RADIUS_KM};
pub use geojson::{extract_point, ParseError};

/// A longitude/latitude pair in decimal degrees.
///
/// Ranges are not validated; any finite number read from a location
/// attribute is accepted as-is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub lon: f64,
    pub lat: f64,
}

impl Point {
    #[must_use]
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lon, self.lat)
    }
}
