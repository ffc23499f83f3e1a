use serde_json::Value;
use thiserror::Error;

use super::Point;

/// A location attribute that is present but cannot be read as a feature
/// collection.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unexpected GeoJSON shape: {0}")]
    Shape(&'static str),
}

/// Extract the first point coordinate from a serialized feature collection.
///
/// Returns `Ok(None)` when `raw` is absent or empty, when the collection has
/// no features, or when no `Point` feature carries two numeric coordinates.
/// Spurious list wrapping around the pair (`[[lon, lat]]`, `[[[lon, lat]]]`)
/// is unwrapped.
///
/// # Errors
///
/// Returns [`ParseError::Json`] when `raw` is not valid JSON and
/// [`ParseError::Shape`] when the decoded value cannot be walked as a
/// feature collection (top level not an object, `features` not an array,
/// a feature or geometry that is not an object).
pub fn extract_point(raw: Option<&str>) -> Result<Option<Point>, ParseError> {
    let Some(raw) = raw.filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    let data: Value = serde_json::from_str(raw)?;
    let Value::Object(collection) = &data else {
        return Err(ParseError::Shape("feature collection must be an object"));
    };

    let features = match collection.get("features") {
        Some(v) if is_truthy(v) => v,
        _ => return Ok(None),
    };
    let Value::Array(features) = features else {
        return Err(ParseError::Shape("`features` must be an array"));
    };

    for feature in features {
        let Value::Object(feature) = feature else {
            return Err(ParseError::Shape("feature must be an object"));
        };

        let geometry = match feature.get("geometry") {
            Some(Value::Object(geometry)) if !geometry.is_empty() => geometry,
            Some(v) if is_truthy(v) => {
                return Err(ParseError::Shape("`geometry` must be an object"));
            }
            _ => continue,
        };

        if geometry.get("type").and_then(Value::as_str) != Some("Point") {
            continue;
        }

        if let Some(point) = geometry.get("coordinates").and_then(point_from_coordinates) {
            return Ok(Some(point));
        }
    }

    Ok(None)
}

/// Peel nested single-point wrappers and read `[lon, lat, ..]`.
fn point_from_coordinates(coordinates: &Value) -> Option<Point> {
    let mut coords = coordinates;
    while let Value::Array(items) = coords {
        match items.first() {
            Some(inner @ Value::Array(_)) => coords = inner,
            _ => break,
        }
    }

    match coords {
        Value::Array(items) if items.len() >= 2 => {
            let lon = items[0].as_f64()?;
            let lat = items[1].as_f64()?;
            Some(Point::new(lon, lat))
        }
        _ => None,
    }
}

/// Loose truthiness: null, `false`, zero, and empty strings/arrays/objects
/// count as "no value".
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point_feature(coordinates: &str) -> String {
        format!(
            r#"{{"type":"FeatureCollection","features":[{{"type":"Feature","properties":{{}},"geometry":{{"type":"Point","coordinates":{coordinates}}}}}]}}"#
        )
    }

    #[test]
    fn absent_or_empty_input_is_no_location() {
        assert!(extract_point(None).unwrap().is_none());
        assert!(extract_point(Some("")).unwrap().is_none());
    }

    #[test]
    fn reads_flat_point() {
        let raw = point_feature("[2.5, 48.8]");
        let point = extract_point(Some(&raw)).unwrap().expect("point");
        assert_eq!(point, Point::new(2.5, 48.8));
    }

    #[test]
    fn unwraps_arbitrary_nesting() {
        for coordinates in ["[[2.5, 48.8]]", "[[[2.5, 48.8]]]", "[[[[2.5, 48.8], [9, 9]]]]"] {
            let raw = point_feature(coordinates);
            let point = extract_point(Some(&raw)).unwrap().expect("point");
            assert_eq!(point, Point::new(2.5, 48.8), "coordinates {coordinates}");
        }
    }

    #[test]
    fn integer_coordinates_are_numeric() {
        let raw = point_feature("[3, -45]");
        let point = extract_point(Some(&raw)).unwrap().expect("point");
        assert_eq!(point, Point::new(3.0, -45.0));
    }

    #[test]
    fn extra_coordinate_elements_are_ignored() {
        let raw = point_feature("[10.0, 20.0, 350.0]");
        let point = extract_point(Some(&raw)).unwrap().expect("point");
        assert_eq!(point, Point::new(10.0, 20.0));
    }

    #[test]
    fn empty_features_is_no_location() {
        let raw = r#"{"type":"FeatureCollection","features":[]}"#;
        assert!(extract_point(Some(raw)).unwrap().is_none());
    }

    #[test]
    fn missing_or_null_features_is_no_location() {
        assert!(extract_point(Some(r#"{"type":"FeatureCollection"}"#)).unwrap().is_none());
        assert!(extract_point(Some(r#"{"features":null}"#)).unwrap().is_none());
    }

    #[test]
    fn polygon_only_is_no_location() {
        let raw = r#"{"features":[{"geometry":{"type":"Polygon","coordinates":[[[0,0],[1,0],[1,1],[0,0]]]}}]}"#;
        assert!(extract_point(Some(raw)).unwrap().is_none());
    }

    #[test]
    fn skips_to_first_valid_point() {
        let raw = r#"{"features":[
            {"geometry":{"type":"LineString","coordinates":[[0,0],[1,1]]}},
            {"geometry":null},
            {"properties":{"name":"no geometry"}},
            {"geometry":{"type":"Point","coordinates":["a","b"]}},
            {"geometry":{"type":"Point","coordinates":[1.0]}},
            {"geometry":{"type":"Point","coordinates":[]}},
            {"geometry":{"type":"Point","coordinates":[7.25, 43.7]}},
            {"geometry":{"type":"Point","coordinates":[0.0, 0.0]}}
        ]}"#;
        let point = extract_point(Some(raw)).unwrap().expect("point");
        assert_eq!(point, Point::new(7.25, 43.7));
    }

    #[test]
    fn boolean_coordinates_are_not_numeric() {
        let raw = point_feature("[true, false]");
        assert!(extract_point(Some(&raw)).unwrap().is_none());
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let err = extract_point(Some("{not valid}")).unwrap_err();
        assert!(matches!(err, ParseError::Json(_)), "got {err:?}");
    }

    #[test]
    fn non_object_collection_is_a_parse_error() {
        let err = extract_point(Some("[1, 2]")).unwrap_err();
        assert!(matches!(err, ParseError::Shape(_)), "got {err:?}");
    }

    #[test]
    fn non_array_features_is_a_parse_error() {
        let err = extract_point(Some(r#"{"features":{"a":1}}"#)).unwrap_err();
        assert!(matches!(err, ParseError::Shape(_)), "got {err:?}");
    }

    #[test]
    fn non_object_feature_is_a_parse_error() {
        let err = extract_point(Some(r#"{"features":["Point"]}"#)).unwrap_err();
        assert!(matches!(err, ParseError::Shape(_)), "got {err:?}");
    }
}
