use foundation::seq::CycleSeq;

use crate::artifact::{Marker, RoutePolyline};
use crate::group::LayerGroup;

/// The sole mutable shared map state: two overlay groups that live for the
/// whole application.
///
/// Invariant: before any new analysis result is rendered, both groups are
/// fully cleared, so nothing from a previous click persists. All mutation
/// happens on one logical thread; ordering within a cycle is
/// clear → render → facility-reload.
#[derive(Debug, Clone, PartialEq)]
pub struct MapState {
    pub markers: LayerGroup<Marker>,
    pub routes: LayerGroup<RoutePolyline>,
}

impl MapState {
    pub fn new() -> Self {
        Self {
            markers: LayerGroup::new("markers"),
            routes: LayerGroup::new("routes"),
        }
    }

    /// Bulk-clears both groups at the start of a cycle.
    pub fn clear_overlays(&mut self) {
        self.routes.clear();
        self.markers.clear();
    }

    pub fn overlay_count(&self) -> usize {
        self.markers.len() + self.routes.len()
    }

    /// True when every overlay currently drawn was produced by `cycle`.
    pub fn only_from_cycle(&self, cycle: CycleSeq) -> bool {
        self.markers.iter().all(|m| m.cycle == cycle)
            && self.routes.iter().all(|r| r.cycle == cycle)
    }
}

impl Default for MapState {
    fn default() -> Self {
        Self::new()
    }
}
