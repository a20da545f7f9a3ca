//! Wire contract for the remote analysis endpoint.
//!
//! The backend is an external collaborator: the client POSTs a clicked
//! coordinate and receives one `nearest_<category>` bundle per facility
//! category it supports. Only the shapes below are relied upon; unknown
//! response keys are tolerated.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use foundation::geo::GeoPoint;

/// JSON body POSTed to `/analyze`.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub lat: f64,
    pub lng: f64,
}

impl AnalyzeRequest {
    pub fn new(origin: GeoPoint) -> Self {
        Self {
            lat: origin.lat_deg,
            lng: origin.lng_deg,
        }
    }
}

/// Properties of a matched facility feature.
///
/// The backend forwards the source feature's property map; only `name` is
/// relied upon, the rest is carried for display extensibility.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MatchedFeature {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Per-category nearest-facility bundle.
///
/// Every field is optional on the wire. An absent `feature` means "no
/// facility of this type found within range" and must surface as an explicit
/// N/A, never be dropped. `path` vertices arrive as `[lat, lng]` pairs.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FacilityMatch {
    #[serde(default)]
    pub feature: Option<MatchedFeature>,
    #[serde(default)]
    pub distance: Option<f64>,
    #[serde(default)]
    pub walk_time: Option<f64>,
    #[serde(default)]
    pub path: Option<Vec<[f64; 2]>>,
}

impl FacilityMatch {
    /// The walk route, if the backend sent one long enough to draw.
    ///
    /// A path with fewer than two points cannot form a polyline and yields
    /// `None`; that is normal data absence, not an error.
    pub fn route_path(&self) -> Option<Vec<GeoPoint>> {
        let path = self.path.as_ref()?;
        if path.len() < 2 {
            return None;
        }
        Some(path.iter().map(|p| GeoPoint::from_lat_lng(*p)).collect())
    }

    pub fn facility_name(&self) -> Option<&str> {
        self.feature.as_ref()?.name.as_deref()
    }
}

/// Successful `/analyze` response envelope.
///
/// `nearest_*` keys are collected in sorted order for deterministic
/// traversal; any other unknown keys are ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzeResponse {
    /// Echo of the analyzed coordinate as `[lat, lng]`.
    pub location: [f64; 2],
    pub postcode: Option<String>,
    matches: BTreeMap<String, FacilityMatch>,
}

impl AnalyzeResponse {
    pub fn from_json_str(payload: &str) -> Result<Self, ResponseParseError> {
        let value: Value =
            serde_json::from_str(payload).map_err(|e| ResponseParseError::InvalidJson {
                reason: e.to_string(),
            })?;
        Self::from_json_value(value)
    }

    pub fn from_json_value(value: Value) -> Result<Self, ResponseParseError> {
        let obj = value.as_object().ok_or(ResponseParseError::NotAnObject)?;

        let location_val = obj
            .get("location")
            .ok_or(ResponseParseError::MissingLocation)?;
        let location = parse_lat_lng_pair(location_val).ok_or(ResponseParseError::BadLocation)?;

        let postcode = obj
            .get("postcode")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string());

        let mut matches = BTreeMap::new();
        for (key, val) in obj {
            if !key.starts_with("nearest_") {
                continue;
            }
            let m: FacilityMatch = serde_json::from_value(val.clone()).map_err(|e| {
                ResponseParseError::BadMatch {
                    key: key.clone(),
                    reason: e.to_string(),
                }
            })?;
            matches.insert(key.clone(), m);
        }

        Ok(Self {
            location,
            postcode,
            matches,
        })
    }

    pub fn analyzed_point(&self) -> GeoPoint {
        GeoPoint::from_lat_lng(self.location)
    }

    /// Looks up a match by its full response key (e.g. `nearest_hospital`).
    pub fn nearest(&self, key: &str) -> Option<&FacilityMatch> {
        self.matches.get(key)
    }

    /// All matches in sorted key order.
    pub fn matches(&self) -> impl Iterator<Item = (&str, &FacilityMatch)> {
        self.matches.iter().map(|(k, v)| (k.as_str(), v))
    }
}

fn parse_lat_lng_pair(value: &Value) -> Option<[f64; 2]> {
    let arr = value.as_array()?;
    if arr.len() < 2 {
        return None;
    }
    Some([arr[0].as_f64()?, arr[1].as_f64()?])
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseParseError {
    InvalidJson { reason: String },
    NotAnObject,
    MissingLocation,
    BadLocation,
    BadMatch { key: String, reason: String },
}

impl std::fmt::Display for ResponseParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResponseParseError::InvalidJson { reason } => {
                write!(f, "response is not valid JSON: {reason}")
            }
            ResponseParseError::NotAnObject => write!(f, "response must be a JSON object"),
            ResponseParseError::MissingLocation => write!(f, "response missing location"),
            ResponseParseError::BadLocation => {
                write!(f, "location must be a [lat, lng] number pair")
            }
            ResponseParseError::BadMatch { key, reason } => {
                write!(f, "invalid {key} entry: {reason}")
            }
        }
    }
}

impl std::error::Error for ResponseParseError {}
