//! Static facility dataset parsing.
//!
//! Each category ships as one GeoJSON `FeatureCollection` of points, every
//! feature carrying at least a `name` property. Datasets are read-only and
//! reloaded wholesale on every analysis cycle; they are never merged.

use serde_json::{Map, Value};

use foundation::geo::GeoPoint;

use crate::category::FacilityCategory;

#[derive(Debug, Clone, PartialEq)]
pub struct FacilityPoint {
    pub position: GeoPoint,
    pub name: Option<String>,
    pub properties: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FacilityDataset {
    pub category: FacilityCategory,
    pub points: Vec<FacilityPoint>,
}

#[derive(Debug)]
pub enum DatasetError {
    NotAFeatureCollection,
    InvalidFeature { index: usize, reason: String },
}

impl std::fmt::Display for DatasetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetError::NotAFeatureCollection => {
                write!(f, "expected GeoJSON FeatureCollection")
            }
            DatasetError::InvalidFeature { index, reason } => {
                write!(f, "invalid feature at index {index}: {reason}")
            }
        }
    }
}

impl std::error::Error for DatasetError {}

impl FacilityDataset {
    pub fn from_geojson_str(
        category: FacilityCategory,
        payload: &str,
    ) -> Result<Self, DatasetError> {
        let value: Value =
            serde_json::from_str(payload).map_err(|e| DatasetError::InvalidFeature {
                index: 0,
                reason: format!("JSON parse error: {e}"),
            })?;
        Self::from_geojson_value(category, value)
    }

    pub fn from_geojson_value(
        category: FacilityCategory,
        value: Value,
    ) -> Result<Self, DatasetError> {
        let obj = value
            .as_object()
            .ok_or(DatasetError::NotAFeatureCollection)?;
        let ty = obj
            .get("type")
            .and_then(|v| v.as_str())
            .ok_or(DatasetError::NotAFeatureCollection)?;
        if ty != "FeatureCollection" {
            return Err(DatasetError::NotAFeatureCollection);
        }

        let features_val = obj
            .get("features")
            .and_then(|v| v.as_array())
            .ok_or(DatasetError::NotAFeatureCollection)?;

        let mut points = Vec::with_capacity(features_val.len());
        for (index, feat_val) in features_val.iter().enumerate() {
            let feat_obj = feat_val.as_object().ok_or(DatasetError::InvalidFeature {
                index,
                reason: "feature must be an object".to_string(),
            })?;

            let feat_type = feat_obj.get("type").and_then(|v| v.as_str()).ok_or(
                DatasetError::InvalidFeature {
                    index,
                    reason: "feature missing type".to_string(),
                },
            )?;
            if feat_type != "Feature" {
                return Err(DatasetError::InvalidFeature {
                    index,
                    reason: format!("unexpected feature type: {feat_type}"),
                });
            }

            let geometry = feat_obj
                .get("geometry")
                .ok_or(DatasetError::InvalidFeature {
                    index,
                    reason: "feature missing geometry".to_string(),
                })?;
            let position = parse_point_geometry(geometry)
                .map_err(|reason| DatasetError::InvalidFeature { index, reason })?;

            let properties = feat_obj
                .get("properties")
                .and_then(|v| v.as_object())
                .cloned()
                .unwrap_or_default();
            let name = properties
                .get("name")
                .and_then(|v| v.as_str())
                .map(|s| s.to_string());

            points.push(FacilityPoint {
                position,
                name,
                properties,
            });
        }

        Ok(Self { category, points })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Facility datasets carry Point geometries only; GeoJSON coordinate order
/// is `[lng, lat]`.
fn parse_point_geometry(value: &Value) -> Result<GeoPoint, String> {
    let obj = value
        .as_object()
        .ok_or("geometry must be an object".to_string())?;
    let ty = obj
        .get("type")
        .and_then(|v| v.as_str())
        .ok_or("geometry missing type".to_string())?;
    if ty != "Point" {
        return Err(format!("expected Point geometry, got {ty}"));
    }

    let coords = obj
        .get("coordinates")
        .and_then(|v| v.as_array())
        .ok_or("Point coordinates must be an array".to_string())?;
    if coords.len() < 2 {
        return Err("Point coordinates must have [lng, lat]".to_string());
    }
    let lng = coords[0]
        .as_f64()
        .ok_or("Point lng must be a number".to_string())?;
    let lat = coords[1]
        .as_f64()
        .ok_or("Point lat must be a number".to_string())?;
    Ok(GeoPoint::new(lat, lng))
}

#[cfg(test)]
mod tests {
    use super::{DatasetError, FacilityDataset};
    use crate::category::FacilityCategory;
    use foundation::geo::GeoPoint;

    const PHARMACIES: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "geometry": {"type": "Point", "coordinates": [-1.0819, 53.9624]},
                "properties": {"name": "Monkgate Pharmacy", "fhrs_id": 1}
            },
            {
                "type": "Feature",
                "geometry": {"type": "Point", "coordinates": [-1.09, 53.95]},
                "properties": {}
            }
        ]
    }"#;

    #[test]
    fn parses_points_with_optional_names() {
        let ds = FacilityDataset::from_geojson_str(FacilityCategory::Pharmacy, PHARMACIES)
            .expect("parse dataset");
        assert_eq!(ds.category, FacilityCategory::Pharmacy);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.points[0].name.as_deref(), Some("Monkgate Pharmacy"));
        // GeoJSON order is [lng, lat]; positions come out lat-first.
        assert_eq!(ds.points[0].position, GeoPoint::new(53.9624, -1.0819));
        assert_eq!(ds.points[1].name, None);
    }

    #[test]
    fn rejects_non_feature_collections() {
        let err = FacilityDataset::from_geojson_str(
            FacilityCategory::Hospital,
            r#"{"type": "Feature"}"#,
        )
        .unwrap_err();
        assert!(matches!(err, DatasetError::NotAFeatureCollection));
    }

    #[test]
    fn rejects_non_point_geometry() {
        let payload = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "geometry": {"type": "LineString", "coordinates": [[0, 0], [1, 1]]},
                "properties": {"name": "not a facility"}
            }]
        }"#;
        let err =
            FacilityDataset::from_geojson_str(FacilityCategory::Library, payload).unwrap_err();
        assert!(matches!(err, DatasetError::InvalidFeature { index: 0, .. }));
    }
}
