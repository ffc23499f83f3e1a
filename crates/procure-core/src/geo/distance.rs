use super::Point;

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance in kilometres between two lon/lat pairs given in
/// decimal degrees.
///
/// Accepts anything losslessly convertible to `f64`, so integer degrees work
/// as well as floats. Non-finite input yields `NaN` rather than a panic.
#[must_use]
pub fn distance_km<T: Into<f64>>(lon1: T, lat1: T, lon2: T, lat2: T) -> f64 {
    let lon1 = lon1.into().to_radians();
    let lat1 = lat1.into().to_radians();
    let lon2 = lon2.into().to_radians();
    let lat2 = lat2.into().to_radians();

    let dlon = lon2 - lon1;
    let dlat = lat2 - lat1;
    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    // Rounding can push `a` a hair above 1 for antipodal points; asin would
    // then return NaN. NaN itself must pass through untouched.
    let a = if a > 1.0 { 1.0 } else { a };
    let c = 2.0 * a.sqrt().asin();

    c * EARTH_RADIUS_KM
}

/// [`distance_km`] over two [`Point`]s.
#[must_use]
pub fn haversine_km(from: Point, to: Point) -> f64 {
    distance_km(from.lon, from.lat, to.lon, to.lat)
}
