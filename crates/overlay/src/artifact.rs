use facilities::category::FacilityCategory;
use foundation::geo::GeoPoint;
use foundation::seq::CycleSeq;

/// What a marker stands for; styling is resolved from this via symbology.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MarkerKind {
    /// Background facility point from a static dataset.
    Facility(FacilityCategory),
    /// The clicked coordinate.
    UserLocation,
    /// End point of a rendered walk route.
    Destination(FacilityCategory),
}

/// A point overlay in the `markers` group.
///
/// Every marker records the cycle that produced it, so tests (and debug
/// tooling) can verify no stale artifact survives a clear.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub kind: MarkerKind,
    pub position: GeoPoint,
    pub label: String,
    pub cycle: CycleSeq,
}

impl Marker {
    pub fn new(
        kind: MarkerKind,
        position: GeoPoint,
        label: impl Into<String>,
        cycle: CycleSeq,
    ) -> Self {
        Self {
            kind,
            position,
            label: label.into(),
            cycle,
        }
    }
}

/// A walk-route overlay in the `routes` group.
///
/// Invariant: `path` always has at least two vertices; shorter paths are
/// filtered out before an artifact is ever constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutePolyline {
    pub category: FacilityCategory,
    pub path: Vec<GeoPoint>,
    pub cycle: CycleSeq,
}

impl RoutePolyline {
    pub fn end_point(&self) -> GeoPoint {
        *self.path.last().expect("route path is never empty")
    }
}

#[cfg(test)]
mod tests {
    use super::{Marker, MarkerKind, RoutePolyline};
    use facilities::category::FacilityCategory;
    use foundation::geo::GeoPoint;
    use foundation::seq::CycleSeq;

    #[test]
    fn route_end_point_is_last_vertex() {
        let route = RoutePolyline {
            category: FacilityCategory::Hospital,
            path: vec![GeoPoint::new(53.96, -1.08), GeoPoint::new(53.961, -1.079)],
            cycle: CycleSeq(1),
        };
        assert_eq!(route.end_point(), GeoPoint::new(53.961, -1.079));
    }

    #[test]
    fn marker_records_its_cycle() {
        let m = Marker::new(
            MarkerKind::UserLocation,
            GeoPoint::new(0.0, 0.0),
            "You are here",
            CycleSeq(7),
        );
        assert_eq!(m.cycle, CycleSeq(7));
    }
}
