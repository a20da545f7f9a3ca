//! Deterministic rendering of one analysis response onto the map state.

use facilities::category::FacilityCategory;
use foundation::geo::GeoPoint;
use foundation::seq::CycleSeq;
use overlay::artifact::{Marker, MarkerKind, RoutePolyline};
use overlay::state::MapState;
use protocol::analyze::AnalyzeResponse;

use crate::summary::AnalysisSummary;

/// Draws the user-location marker, per-category routes and destination
/// markers, and returns the summary for the panel.
///
/// Ordering contract:
/// - the user-location marker is pushed first;
/// - categories are visited in `FacilityCategory::ALL` order;
/// - a category draws a route + destination pair only when its match has a
///   path of at least two points; anything shorter draws nothing and is not
///   an error.
///
/// Callers clear both groups before invoking this, so afterwards the groups
/// hold only artifacts tagged with `cycle` (the facility layer is restored
/// separately, after this pass).
pub fn render_analysis(
    state: &mut MapState,
    origin: GeoPoint,
    response: &AnalyzeResponse,
    cycle: CycleSeq,
) -> AnalysisSummary {
    state.markers.push(Marker::new(
        MarkerKind::UserLocation,
        origin,
        "You are here",
        cycle,
    ));

    for category in FacilityCategory::ALL {
        let Some(m) = response.nearest(category.response_key()) else {
            continue;
        };
        let Some(path) = m.route_path() else {
            continue;
        };

        let route = RoutePolyline {
            category,
            path,
            cycle,
        };
        let destination = route.end_point();
        state.routes.push(route);

        let label = match m.facility_name() {
            Some(name) => name.to_string(),
            None => category.label().to_string(),
        };
        state.markers.push(Marker::new(
            MarkerKind::Destination(category),
            destination,
            label,
            cycle,
        ));
    }

    AnalysisSummary::from_response(origin, response)
}
