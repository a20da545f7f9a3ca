use facilities::category::FacilityCategory;

use crate::artifact::MarkerKind;

/// Circle-marker presentation for facility and destination points.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MarkerStyle {
    pub radius_px: f32,
    pub fill: &'static str,
    pub stroke: &'static str,
    pub stroke_weight: f32,
    pub opacity: f32,
    pub fill_opacity: f32,
}

impl MarkerStyle {
    pub const fn new(radius_px: f32, fill: &'static str) -> Self {
        Self {
            radius_px,
            fill,
            stroke: "#fff",
            stroke_weight: 1.0,
            opacity: 1.0,
            fill_opacity: 0.8,
        }
    }
}

/// Dashed-polyline presentation for walk routes.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RouteStyle {
    pub color: &'static str,
    pub weight: f32,
    pub opacity: f32,
    pub dash: &'static str,
}

impl RouteStyle {
    pub const fn new(color: &'static str) -> Self {
        Self {
            color,
            weight: 4.0,
            opacity: 0.7,
            dash: "5, 5",
        }
    }
}

/// One color per category, shared by its facility circles and its route.
pub fn category_color(category: FacilityCategory) -> &'static str {
    match category {
        FacilityCategory::GpSurgery => "#3388ff",
        FacilityCategory::Hospital => "#ff3333",
        FacilityCategory::Pharmacy => "#33bb33",
        FacilityCategory::Library => "#9b59b6",
        FacilityCategory::School => "#e67e22",
    }
}

/// Glyph shown on a route's destination marker.
pub fn destination_glyph(category: FacilityCategory) -> &'static str {
    match category {
        FacilityCategory::GpSurgery => "🏥",
        FacilityCategory::Hospital => "🏨",
        FacilityCategory::Pharmacy => "💊",
        FacilityCategory::Library => "📚",
        FacilityCategory::School => "🏫",
    }
}

pub const USER_LOCATION_GLYPH: &str = "📍";

pub fn marker_style(kind: MarkerKind) -> MarkerStyle {
    match kind {
        MarkerKind::Facility(cat) => MarkerStyle::new(6.0, category_color(cat)),
        MarkerKind::Destination(cat) => MarkerStyle::new(8.0, category_color(cat)),
        MarkerKind::UserLocation => MarkerStyle::new(9.0, "#222"),
    }
}

pub fn route_style(category: FacilityCategory) -> RouteStyle {
    RouteStyle::new(category_color(category))
}
