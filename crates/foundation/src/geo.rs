/// Geographic position in WGS84 degrees.
///
/// Latitude comes first in constructors and display output, matching the
/// click/analyze wire order (`[lat, lng]` pairs).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GeoPoint {
    pub lat_deg: f64,
    pub lng_deg: f64,
}

impl GeoPoint {
    pub fn new(lat_deg: f64, lng_deg: f64) -> Self {
        Self { lat_deg, lng_deg }
    }

    pub fn from_lat_lng(pair: [f64; 2]) -> Self {
        Self::new(pair[0], pair[1])
    }

    /// True when both components are finite and within WGS84 bounds.
    pub fn is_valid(&self) -> bool {
        self.lat_deg.is_finite()
            && self.lng_deg.is_finite()
            && self.lat_deg.abs() <= 90.0
            && self.lng_deg.abs() <= 180.0
    }
}

impl std::fmt::Display for GeoPoint {
    /// Five decimal places (~1 m), the precision shown to users.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.5}, {:.5}", self.lat_deg, self.lng_deg)
    }
}
