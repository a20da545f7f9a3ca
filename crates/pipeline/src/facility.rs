use facilities::dataset::FacilityDataset;
use foundation::seq::CycleSeq;
use overlay::artifact::{Marker, MarkerKind};
use overlay::state::MapState;

/// Renders every dataset point as a styled circle marker into `markers`.
///
/// Labels read `"<category>: <name>"`, falling back to the bare category
/// label for unnamed features. Idempotent after a clear: re-invoking on the
/// same datasets reproduces the same markers in the same order.
///
/// Returns the number of markers added.
pub fn populate_facility_layer(
    state: &mut MapState,
    datasets: &[FacilityDataset],
    cycle: CycleSeq,
) -> usize {
    let mut added = 0;
    for dataset in datasets {
        for point in &dataset.points {
            let label = match &point.name {
                Some(name) => format!("{}: {}", dataset.category.label(), name),
                None => dataset.category.label().to_string(),
            };
            state.markers.push(Marker::new(
                MarkerKind::Facility(dataset.category),
                point.position,
                label,
                cycle,
            ));
            added += 1;
        }
    }
    added
}
