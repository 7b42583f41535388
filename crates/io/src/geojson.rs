//! GeoJSON watershed reading.
//!
//! Watershed boundaries arrive as a FeatureCollection of Polygon or
//! MultiPolygon features. Only two things are taken from each feature:
//! the configured id property and the geometry rings; everything else in
//! the file is ignored.

use std::fs;
use std::path::Path;

use poseidon_clip::Polygon;
use serde_json::Value;

use crate::error::IoError;

/// One watershed: its id and footprint.
#[derive(Debug, Clone, PartialEq)]
pub struct WatershedFeature {
    id: String,
    polygon: Polygon,
}

impl WatershedFeature {
    /// Pairs an id with a footprint.
    pub fn new(id: impl Into<String>, polygon: Polygon) -> Self {
        Self {
            id: id.into(),
            polygon,
        }
    }

    /// The watershed's id, as read from the id property.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The watershed's footprint.
    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }
}

/// Reads watershed features from a GeoJSON FeatureCollection.
///
/// `id_field` names the property holding the watershed id; string and
/// number values are accepted. MultiPolygon geometries are flattened
/// into a single footprint, which the even-odd membership rule handles
/// without special casing.
///
/// # Errors
///
/// Returns [`IoError::Read`] when the file cannot be read and
/// [`IoError::GeoJson`] when it is not a FeatureCollection, a feature
/// lacks the id property or a usable geometry, or a ring fails polygon
/// validation.
pub fn read_watersheds(path: &Path, id_field: &str) -> Result<Vec<WatershedFeature>, IoError> {
    let text = fs::read_to_string(path).map_err(|source| IoError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let root: Value = serde_json::from_str(&text).map_err(|e| IoError::GeoJson {
        path: path.to_path_buf(),
        message: format!("invalid JSON: {e}"),
    })?;
    parse_watersheds(&root, path, id_field)
}

fn parse_watersheds(root: &Value, path: &Path, id_field: &str) -> Result<Vec<WatershedFeature>, IoError> {
    let fail = |message: String| IoError::GeoJson {
        path: path.to_path_buf(),
        message,
    };

    if root.get("type").and_then(Value::as_str) != Some("FeatureCollection") {
        return Err(fail("not a GeoJSON FeatureCollection".to_string()));
    }
    let features = root
        .get("features")
        .and_then(Value::as_array)
        .ok_or_else(|| fail("FeatureCollection has no features array".to_string()))?;

    let mut watersheds = Vec::with_capacity(features.len());
    for (index, feature) in features.iter().enumerate() {
        let id = feature
            .get("properties")
            .and_then(|properties| properties.get(id_field))
            .and_then(property_as_id)
            .ok_or_else(|| {
                fail(format!("feature {index} has no usable {id_field} property"))
            })?;

        let geometry = feature
            .get("geometry")
            .filter(|g| !g.is_null())
            .ok_or_else(|| fail(format!("feature {id} has no geometry")))?;
        let geometry_type = geometry
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| fail(format!("feature {id} has no geometry type")))?;
        let coordinates = geometry
            .get("coordinates")
            .ok_or_else(|| fail(format!("feature {id} has no coordinates")))?;

        let rings = match geometry_type {
            "Polygon" => polygon_rings(coordinates),
            "MultiPolygon" => coordinates.as_array().and_then(|parts| {
                let mut rings = Vec::new();
                for part in parts {
                    rings.extend(polygon_rings(part)?);
                }
                Some(rings)
            }),
            other => {
                return Err(fail(format!(
                    "feature {id} has unsupported geometry type {other}"
                )))
            }
        }
        .ok_or_else(|| fail(format!("feature {id} has malformed coordinates")))?;

        let polygon = Polygon::new(rings)
            .map_err(|e| fail(format!("feature {id}: {e}")))?;
        watersheds.push(WatershedFeature::new(id, polygon));
    }
    Ok(watersheds)
}

/// Watershed ids may be stored as strings or numbers.
fn property_as_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn position(value: &Value) -> Option<(f64, f64)> {
    let parts = value.as_array()?;
    let x = parts.first()?.as_f64()?;
    let y = parts.get(1)?.as_f64()?;
    Some((x, y))
}

fn ring(value: &Value) -> Option<Vec<(f64, f64)>> {
    value.as_array()?.iter().map(position).collect()
}

fn polygon_rings(value: &Value) -> Option<Vec<Vec<(f64, f64)>>> {
    value.as_array()?.iter().map(ring).collect()
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use serde_json::json;

    use super::*;

    fn parse(root: &Value, id_field: &str) -> Result<Vec<WatershedFeature>, IoError> {
        parse_watersheds(root, &PathBuf::from("sheds.geojson"), id_field)
    }

    fn feature(id: Value, geometry: Value) -> Value {
        json!({ "type": "Feature", "properties": { "HYBAS_ID": id }, "geometry": geometry })
    }

    fn square_geometry() -> Value {
        json!({
            "type": "Polygon",
            "coordinates": [[[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0], [0.0, 0.0]]]
        })
    }

    #[test]
    fn reads_polygon_features() {
        let root = json!({
            "type": "FeatureCollection",
            "features": [feature(json!("8121032140"), square_geometry())]
        });
        let sheds = parse(&root, "HYBAS_ID").unwrap();
        assert_eq!(sheds.len(), 1);
        assert_eq!(sheds[0].id(), "8121032140");
        assert!(sheds[0].polygon().contains(5.0, 5.0));
    }

    #[test]
    fn numeric_ids_become_strings() {
        let root = json!({
            "type": "FeatureCollection",
            "features": [feature(json!(8121032140_u64), square_geometry())]
        });
        let sheds = parse(&root, "HYBAS_ID").unwrap();
        assert_eq!(sheds[0].id(), "8121032140");
    }

    #[test]
    fn multipolygons_flatten_to_one_footprint() {
        let geometry = json!({
            "type": "MultiPolygon",
            "coordinates": [
                [[[0.0, 0.0], [2.0, 0.0], [2.0, 2.0], [0.0, 2.0], [0.0, 0.0]]],
                [[[10.0, 0.0], [12.0, 0.0], [12.0, 2.0], [10.0, 2.0], [10.0, 0.0]]]
            ]
        });
        let root = json!({
            "type": "FeatureCollection",
            "features": [feature(json!(1), geometry)]
        });
        let sheds = parse(&root, "HYBAS_ID").unwrap();
        assert_eq!(sheds[0].polygon().rings().len(), 2);
        assert!(sheds[0].polygon().contains(1.0, 1.0));
        assert!(sheds[0].polygon().contains(11.0, 1.0));
        assert!(!sheds[0].polygon().contains(5.0, 1.0));
    }

    #[test]
    fn holes_stay_separate_rings() {
        let geometry = json!({
            "type": "Polygon",
            "coordinates": [
                [[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0], [0.0, 0.0]],
                [[4.0, 4.0], [6.0, 4.0], [6.0, 6.0], [4.0, 6.0], [4.0, 4.0]]
            ]
        });
        let root = json!({
            "type": "FeatureCollection",
            "features": [feature(json!(1), geometry)]
        });
        let sheds = parse(&root, "HYBAS_ID").unwrap();
        assert!(!sheds[0].polygon().contains(5.0, 5.0));
    }

    #[test]
    fn missing_id_property_is_an_error() {
        let root = json!({
            "type": "FeatureCollection",
            "features": [
                { "type": "Feature", "properties": {}, "geometry": square_geometry() }
            ]
        });
        let err = parse(&root, "HYBAS_ID").unwrap_err();
        assert!(err.to_string().contains("feature 0"));
        assert!(err.to_string().contains("HYBAS_ID"));
    }

    #[test]
    fn alternate_id_fields_are_honoured() {
        let root = json!({
            "type": "FeatureCollection",
            "features": [
                { "type": "Feature", "properties": { "basin": "ws-7" }, "geometry": square_geometry() }
            ]
        });
        let sheds = parse(&root, "basin").unwrap();
        assert_eq!(sheds[0].id(), "ws-7");
    }

    #[test]
    fn unsupported_geometries_are_rejected() {
        let geometry = json!({ "type": "LineString", "coordinates": [[0.0, 0.0], [1.0, 1.0]] });
        let root = json!({
            "type": "FeatureCollection",
            "features": [feature(json!(1), geometry)]
        });
        let err = parse(&root, "HYBAS_ID").unwrap_err();
        assert!(err.to_string().contains("unsupported geometry type LineString"));
    }

    #[test]
    fn non_collections_are_rejected() {
        let err = parse(&feature(json!(1), square_geometry()), "HYBAS_ID").unwrap_err();
        assert!(err.to_string().contains("not a GeoJSON FeatureCollection"));
    }

    #[test]
    fn null_geometry_is_rejected() {
        let root = json!({
            "type": "FeatureCollection",
            "features": [feature(json!(42), Value::Null)]
        });
        let err = parse(&root, "HYBAS_ID").unwrap_err();
        assert!(err.to_string().contains("feature 42 has no geometry"));
    }
}
