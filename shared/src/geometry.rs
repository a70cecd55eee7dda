use std::collections::HashSet;

use geo::{Coord, LineString, MultiPolygon, Polygon};
use serde_json::Value;

use crate::region::RegionGroup;

/// One region read from the geographic feature collection.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoFeature {
    pub key: String,
    pub name: String,
    pub group: RegionGroup,
    /// Boundary in (longitude, latitude) degrees.
    pub shape: MultiPolygon<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GeometryError {
    NotAFeatureCollection,
    InvalidFeature { index: usize, reason: String },
    Empty,
}

impl std::fmt::Display for GeometryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeometryError::NotAFeatureCollection => {
                write!(f, "expected GeoJSON FeatureCollection")
            }
            GeometryError::InvalidFeature { index, reason } => {
                write!(f, "invalid feature at index {index}: {reason}")
            }
            GeometryError::Empty => write!(f, "feature collection has no regions"),
        }
    }
}

impl std::error::Error for GeometryError {}

/// Parse a GeoJSON FeatureCollection into region features.
///
/// Each feature needs `properties.id`; `properties.name` defaults to the id and
/// `properties.region` to an unknown group. Only Polygon and MultiPolygon
/// geometries are accepted. A key that repeats keeps its first feature.
pub fn parse_feature_collection(payload: &str) -> Result<Vec<GeoFeature>, GeometryError> {
    let value: Value =
        serde_json::from_str(payload).map_err(|e| GeometryError::InvalidFeature {
            index: 0,
            reason: format!("JSON parse error: {e}"),
        })?;
    let obj = value
        .as_object()
        .ok_or(GeometryError::NotAFeatureCollection)?;
    if obj.get("type").and_then(|v| v.as_str()) != Some("FeatureCollection") {
        return Err(GeometryError::NotAFeatureCollection);
    }
    let features_val = obj
        .get("features")
        .and_then(|v| v.as_array())
        .ok_or(GeometryError::NotAFeatureCollection)?;

    let mut seen = HashSet::with_capacity(features_val.len());
    let mut features = Vec::with_capacity(features_val.len());
    for (index, feat_val) in features_val.iter().enumerate() {
        let invalid = |reason: &str| GeometryError::InvalidFeature {
            index,
            reason: reason.to_string(),
        };
        let props = feat_val
            .get("properties")
            .and_then(|v| v.as_object())
            .ok_or_else(|| invalid("feature missing properties"))?;
        let key = match props.get("id") {
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => return Err(invalid("feature missing properties.id")),
        };
        let name = props
            .get("name")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| key.clone());
        let group = props
            .get("region")
            .and_then(|v| v.as_str())
            .map(RegionGroup::from_classifier)
            .unwrap_or(RegionGroup::Unknown);
        let geometry = feat_val
            .get("geometry")
            .ok_or_else(|| invalid("feature missing geometry"))?;
        let shape = parse_geometry(geometry)
            .map_err(|reason| GeometryError::InvalidFeature { index, reason })?;

        if seen.insert(key.clone()) {
            features.push(GeoFeature {
                key,
                name,
                group,
                shape,
            });
        }
    }

    if features.is_empty() {
        return Err(GeometryError::Empty);
    }
    Ok(features)
}

fn parse_geometry(value: &Value) -> Result<MultiPolygon<f64>, String> {
    let ty = value
        .get("type")
        .and_then(|v| v.as_str())
        .ok_or("geometry missing type")?;
    let coords = value
        .get("coordinates")
        .ok_or("geometry missing coordinates")?;
    match ty {
        "Polygon" => Ok(MultiPolygon::new(vec![parse_polygon(coords)?])),
        "MultiPolygon" => {
            let parts = coords
                .as_array()
                .ok_or("MultiPolygon coordinates must be an array")?;
            let polygons = parts
                .iter()
                .map(parse_polygon)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(MultiPolygon::new(polygons))
        }
        other => Err(format!("unsupported geometry type: {other}")),
    }
}

fn parse_polygon(value: &Value) -> Result<Polygon<f64>, String> {
    let rings = value.as_array().ok_or("polygon must be an array of rings")?;
    let mut rings = rings.iter().map(parse_ring);
    let exterior = rings.next().ok_or("polygon has no rings")??;
    let interiors = rings.collect::<Result<Vec<_>, _>>()?;
    Ok(Polygon::new(exterior, interiors))
}

fn parse_ring(value: &Value) -> Result<LineString<f64>, String> {
    let points = value.as_array().ok_or("ring must be an array of positions")?;
    let coords = points
        .iter()
        .map(|p| -> Result<Coord<f64>, String> {
            let pair = p.as_array().ok_or("position must be an array")?;
            let x = pair.first().and_then(|v| v.as_f64());
            let y = pair.get(1).and_then(|v| v.as_f64());
            match (x, y) {
                (Some(x), Some(y)) => Ok(Coord { x, y }),
                _ => Err("position must hold two numbers".to_string()),
            }
        })
        .collect::<Result<Vec<_>, _>>()?;
    if coords.len() < 3 {
        return Err("ring needs at least three positions".to_string());
    }
    Ok(LineString::new(coords))
}

#[cfg(test)]
mod tests {
    use super::{GeometryError, parse_feature_collection};
    use crate::region::RegionGroup;
    use serde_json::json;

    fn square(lon: f64, lat: f64) -> serde_json::Value {
        json!([[[lon, lat], [lon + 0.1, lat], [lon + 0.1, lat + 0.1], [lon, lat + 0.1], [lon, lat]]])
    }

    #[test]
    fn parses_polygon_and_multipolygon_features() {
        let payload = json!({
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": { "id": "taipei", "name": "台北市", "region": "north" },
                    "geometry": { "type": "Polygon", "coordinates": square(121.5, 25.0) }
                },
                {
                    "type": "Feature",
                    "properties": { "id": "penghu", "name": "澎湖縣", "region": "islands" },
                    "geometry": {
                        "type": "MultiPolygon",
                        "coordinates": [square(119.5, 23.5), square(119.7, 23.3)]
                    }
                }
            ]
        })
        .to_string();

        let features = parse_feature_collection(&payload).unwrap();
        assert_eq!(features.len(), 2);
        assert_eq!(features[0].key, "taipei");
        assert_eq!(features[0].group, RegionGroup::North);
        assert_eq!(features[0].shape.0.len(), 1);
        assert_eq!(features[1].name, "澎湖縣");
        assert_eq!(features[1].shape.0.len(), 2);
    }

    #[test]
    fn duplicate_keys_keep_first_feature() {
        let payload = json!({
            "type": "FeatureCollection",
            "features": [
                {
                    "properties": { "id": "keelung", "name": "基隆市" },
                    "geometry": { "type": "Polygon", "coordinates": square(121.7, 25.1) }
                },
                {
                    "properties": { "id": "keelung", "name": "duplicate" },
                    "geometry": { "type": "Polygon", "coordinates": square(121.0, 24.0) }
                }
            ]
        })
        .to_string();

        let features = parse_feature_collection(&payload).unwrap();
        assert_eq!(features.len(), 1);
        assert_eq!(features[0].name, "基隆市");
        assert_eq!(features[0].group, RegionGroup::Unknown);
    }

    #[test]
    fn rejects_non_collections() {
        let payload = json!({ "type": "Feature" }).to_string();
        assert_eq!(
            parse_feature_collection(&payload),
            Err(GeometryError::NotAFeatureCollection)
        );
    }

    #[test]
    fn rejects_feature_without_id() {
        let payload = json!({
            "type": "FeatureCollection",
            "features": [{
                "properties": { "name": "nameless" },
                "geometry": { "type": "Polygon", "coordinates": square(120.0, 23.0) }
            }]
        })
        .to_string();

        let err = parse_feature_collection(&payload).unwrap_err();
        assert!(matches!(err, GeometryError::InvalidFeature { index: 0, .. }));
    }

    #[test]
    fn rejects_point_geometry() {
        let payload = json!({
            "type": "FeatureCollection",
            "features": [{
                "properties": { "id": "x" },
                "geometry": { "type": "Point", "coordinates": [120.0, 23.0] }
            }]
        })
        .to_string();

        let err = parse_feature_collection(&payload).unwrap_err();
        assert!(err.to_string().contains("unsupported geometry type: Point"));
    }

    #[test]
    fn empty_collection_is_an_error() {
        let payload = json!({ "type": "FeatureCollection", "features": [] }).to_string();
        assert_eq!(parse_feature_collection(&payload), Err(GeometryError::Empty));
    }

    #[test]
    fn invalid_json_reports_parse_error() {
        let err = parse_feature_collection("{not json").unwrap_err();
        assert!(err.to_string().contains("JSON parse error"));
    }
}
