//! Click-to-analyze orchestration.
//!
//! One `Orchestrator` owns the cycle state machine
//! `Idle → AwaitingResponse → {Success, Error} → Idle` and the sequence
//! counter that lets a newer click supersede an in-flight one: an outcome is
//! applied only while its token still matches the latest issued sequence.
//!
//! The orchestrator performs no I/O. Callers capture the click, run the
//! network request, then feed the outcome back in; within a cycle the
//! ordering is clear → request → render → facility-reload.

use facilities::dataset::FacilityDataset;
use foundation::geo::GeoPoint;
use foundation::seq::CycleSeq;
use foundation::time::Time;
use overlay::state::MapState;
use protocol::analyze::AnalyzeResponse;
use protocol::error::AnalyzeError;

use crate::events::CycleLog;
use crate::facility::populate_facility_layer;
use crate::loading::{LoadingState, LoadingStep};
use crate::panel::StatusPanel;
use crate::render::render_analysis;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CyclePhase {
    Idle,
    AwaitingResponse,
    Success,
    Error,
}

/// Capability to report progress/completion for one specific cycle.
///
/// Tokens are issued by [`Orchestrator::begin`]; a token from a superseded
/// cycle is accepted but has no effect.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CycleToken {
    pub seq: CycleSeq,
    pub origin: GeoPoint,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CompletionOutcome {
    Success,
    Error,
    /// The token's cycle is no longer the latest (or was already completed);
    /// nothing was touched.
    Superseded,
}

#[derive(Debug)]
pub struct Orchestrator {
    phase: CyclePhase,
    latest: CycleSeq,
    loading: LoadingState,
    log: CycleLog,
}

impl Orchestrator {
    pub fn new() -> Self {
        Self {
            phase: CyclePhase::Idle,
            latest: CycleSeq::NONE,
            loading: LoadingState::start(),
            log: CycleLog::new(),
        }
    }

    pub fn phase(&self) -> CyclePhase {
        self.phase
    }

    pub fn latest(&self) -> CycleSeq {
        self.latest
    }

    pub fn log(&self) -> &CycleLog {
        &self.log
    }

    pub fn drain_events(&mut self) -> Vec<crate::events::CycleEvent> {
        self.log.drain()
    }

    /// Starts a new cycle for a clicked coordinate.
    ///
    /// Clears both overlay groups, resets the loading state to step 1 and
    /// moves to `AwaitingResponse`. Any cycle still in flight is superseded
    /// from this moment on.
    pub fn begin(
        &mut self,
        origin: GeoPoint,
        state: &mut MapState,
        panel: &mut StatusPanel,
    ) -> CycleToken {
        self.latest = self.latest.next();
        let token = CycleToken {
            seq: self.latest,
            origin,
        };

        state.clear_overlays();
        self.loading = LoadingState::start();
        panel.show_progress(token.seq, self.loading.clone());
        self.phase = CyclePhase::AwaitingResponse;
        self.log.emit(token.seq, "begin", format!("analysis at {origin}"));
        token
    }

    /// The request for `token` has been dispatched.
    pub fn note_request_sent(&mut self, token: CycleToken, panel: &mut StatusPanel) {
        self.advance_step(token, LoadingStep::ContactBackend, panel);
    }

    /// A response body for `token` has arrived and is being read.
    pub fn note_response_received(&mut self, token: CycleToken, panel: &mut StatusPanel) {
        self.advance_step(token, LoadingStep::ReadResponse, panel);
    }

    fn advance_step(&mut self, token: CycleToken, step: LoadingStep, panel: &mut StatusPanel) {
        if token.seq != self.latest {
            self.log
                .emit(token.seq, "stale-step", format!("ignored {step:?}"));
            return;
        }
        if self.loading.advance(step) {
            panel.show_progress(token.seq, self.loading.clone());
            self.log.emit(token.seq, "step", self.loading.message.clone());
        }
    }

    /// Applies the outcome of a cycle's request.
    ///
    /// On success: renders the response, restores the facility layer from
    /// `facilities` (render happens-before reload), presents the summary and
    /// finishes at the terminal step. On error: presents the fixed
    /// user-facing message and leaves both groups cleared. Either way the
    /// panel reverts to the idle prompt once the post-terminal delay elapses
    /// (see [`Orchestrator::tick`]).
    ///
    /// A token that no longer matches the latest sequence (or a second
    /// completion for an already-terminal cycle) returns
    /// [`CompletionOutcome::Superseded`] and changes nothing.
    pub fn complete(
        &mut self,
        token: CycleToken,
        result: Result<AnalyzeResponse, AnalyzeError>,
        facilities: &[FacilityDataset],
        state: &mut MapState,
        panel: &mut StatusPanel,
        now: Time,
    ) -> CompletionOutcome {
        if token.seq != self.latest || self.phase != CyclePhase::AwaitingResponse {
            self.log.emit(
                token.seq,
                "superseded",
                format!("outcome dropped; latest is {}", self.latest),
            );
            return CompletionOutcome::Superseded;
        }

        match result {
            Ok(response) => {
                self.advance_step(token, LoadingStep::RenderResults, panel);
                let summary = render_analysis(state, token.origin, &response, token.seq);
                let restored = populate_facility_layer(state, facilities, token.seq);
                self.loading.advance(LoadingStep::Done);
                panel.show_result(token.seq, summary, now);
                self.phase = CyclePhase::Success;
                self.log.emit(
                    token.seq,
                    "success",
                    format!("{restored} facility markers restored"),
                );
                CompletionOutcome::Success
            }
            Err(err) => {
                panel.show_error(token.seq, err.user_message(), now);
                self.phase = CyclePhase::Error;
                self.log.emit(token.seq, "error", err.to_string());
                CompletionOutcome::Error
            }
        }
    }

    /// Drives the idle-revert: once the panel's post-terminal delay has
    /// elapsed the machine returns to `Idle`, ready for the next click.
    pub fn tick(&mut self, now: Time, panel: &mut StatusPanel) {
        if panel.tick(now)
            && matches!(self.phase, CyclePhase::Success | CyclePhase::Error)
        {
            self.phase = CyclePhase::Idle;
            self.log
                .emit(self.latest, "idle", "panel reverted to idle prompt");
        }
    }
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{CompletionOutcome, CyclePhase, Orchestrator};
    use crate::panel::{PanelContent, StatusPanel, REVERT_DELAY_SECS};
    use facilities::category::FacilityCategory;
    use facilities::dataset::FacilityDataset;
    use foundation::geo::GeoPoint;
    use foundation::time::Time;
    use overlay::artifact::MarkerKind;
    use overlay::state::MapState;
    use protocol::analyze::AnalyzeResponse;
    use protocol::error::AnalyzeError;

    fn origin() -> GeoPoint {
        GeoPoint::new(53.96, -1.08)
    }

    fn city_hospital_response() -> AnalyzeResponse {
        AnalyzeResponse::from_json_str(
            r#"{
                "location": [53.96, -1.08],
                "nearest_hospital": {
                    "feature": {"name": "City Hospital"},
                    "distance": 450,
                    "walk_time": 6,
                    "path": [[53.96, -1.08], [53.961, -1.079]]
                },
                "nearest_pharmacy": {"feature": null}
            }"#,
        )
        .unwrap()
    }

    fn surgeries() -> FacilityDataset {
        FacilityDataset::from_geojson_str(
            FacilityCategory::GpSurgery,
            r#"{
                "type": "FeatureCollection",
                "features": [{
                    "type": "Feature",
                    "geometry": {"type": "Point", "coordinates": [-1.07, 53.95]},
                    "properties": {"name": "Fulford Surgery"}
                }]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn success_cycle_walks_every_state() {
        let mut orch = Orchestrator::new();
        let mut state = MapState::new();
        let mut panel = StatusPanel::new();
        let facilities = vec![surgeries()];

        assert_eq!(orch.phase(), CyclePhase::Idle);
        let token = orch.begin(origin(), &mut state, &mut panel);
        assert_eq!(orch.phase(), CyclePhase::AwaitingResponse);
        assert_eq!(state.overlay_count(), 0);

        orch.note_request_sent(token, &mut panel);
        orch.note_response_received(token, &mut panel);

        let outcome = orch.complete(
            token,
            Ok(city_hospital_response()),
            &facilities,
            &mut state,
            &mut panel,
            Time::ZERO,
        );
        assert_eq!(outcome, CompletionOutcome::Success);
        assert_eq!(orch.phase(), CyclePhase::Success);

        // User marker + hospital destination + one restored facility marker.
        assert_eq!(state.markers.len(), 3);
        assert_eq!(state.routes.len(), 1);
        assert!(state.only_from_cycle(token.seq));
        // Render happens before the facility reload.
        let kinds: Vec<_> = state.markers.iter().map(|m| m.kind).collect();
        assert_eq!(
            kinds,
            vec![
                MarkerKind::UserLocation,
                MarkerKind::Destination(FacilityCategory::Hospital),
                MarkerKind::Facility(FacilityCategory::GpSurgery),
            ]
        );

        match panel.content() {
            PanelContent::Result(summary) => {
                assert_eq!(
                    summary.entry(FacilityCategory::Hospital).text_line(),
                    "Hospital: City Hospital, distance 450m, walk 6min"
                );
                assert_eq!(
                    summary.entry(FacilityCategory::Pharmacy).text_line(),
                    "Pharmacy: N/A"
                );
            }
            other => panic!("expected result panel, got {other:?}"),
        }

        assert_eq!(
            orch.log().kinds_for(token.seq),
            vec!["begin", "step", "step", "step", "success"]
        );

        orch.tick(Time(REVERT_DELAY_SECS), &mut panel);
        assert_eq!(orch.phase(), CyclePhase::Idle);
        assert_eq!(panel.content(), &PanelContent::Idle);
    }

    #[test]
    fn backend_error_leaves_layers_cleared() {
        let mut orch = Orchestrator::new();
        let mut state = MapState::new();
        let mut panel = StatusPanel::new();

        let token = orch.begin(origin(), &mut state, &mut panel);
        orch.note_request_sent(token, &mut panel);

        let outcome = orch.complete(
            token,
            Err(AnalyzeError::Backend { status: 500 }),
            &[],
            &mut state,
            &mut panel,
            Time::ZERO,
        );
        assert_eq!(outcome, CompletionOutcome::Error);
        assert_eq!(orch.phase(), CyclePhase::Error);
        assert_eq!(state.overlay_count(), 0);
        assert_eq!(
            panel.content(),
            &PanelContent::Error("Server error or no response.".to_string())
        );
    }

    #[test]
    fn stale_outcome_is_dropped_by_a_newer_click() {
        let mut orch = Orchestrator::new();
        let mut state = MapState::new();
        let mut panel = StatusPanel::new();

        let first = orch.begin(origin(), &mut state, &mut panel);
        // Second click before the first response arrives.
        let second = orch.begin(GeoPoint::new(53.95, -1.09), &mut state, &mut panel);

        let outcome = orch.complete(
            first,
            Ok(city_hospital_response()),
            &[],
            &mut state,
            &mut panel,
            Time::ZERO,
        );
        assert_eq!(outcome, CompletionOutcome::Superseded);
        // The stale response must not have rendered anything.
        assert_eq!(state.overlay_count(), 0);
        assert_eq!(orch.phase(), CyclePhase::AwaitingResponse);

        let outcome = orch.complete(
            second,
            Ok(city_hospital_response()),
            &[],
            &mut state,
            &mut panel,
            Time::ZERO,
        );
        assert_eq!(outcome, CompletionOutcome::Success);
        assert!(state.only_from_cycle(second.seq));
    }

    #[test]
    fn duplicate_completion_is_superseded() {
        let mut orch = Orchestrator::new();
        let mut state = MapState::new();
        let mut panel = StatusPanel::new();

        let token = orch.begin(origin(), &mut state, &mut panel);
        let first = orch.complete(
            token,
            Err(AnalyzeError::Network {
                reason: "timeout".into(),
            }),
            &[],
            &mut state,
            &mut panel,
            Time::ZERO,
        );
        assert_eq!(first, CompletionOutcome::Error);

        let again = orch.complete(
            token,
            Ok(city_hospital_response()),
            &[],
            &mut state,
            &mut panel,
            Time::ZERO,
        );
        assert_eq!(again, CompletionOutcome::Superseded);
        assert_eq!(state.overlay_count(), 0);
    }

    #[test]
    fn stale_step_updates_do_not_move_the_panel() {
        let mut orch = Orchestrator::new();
        let mut state = MapState::new();
        let mut panel = StatusPanel::new();

        let first = orch.begin(origin(), &mut state, &mut panel);
        let _second = orch.begin(origin(), &mut state, &mut panel);

        orch.note_response_received(first, &mut panel);
        match panel.content() {
            PanelContent::Progress(loading) => assert_eq!(loading.current_step, 1),
            other => panic!("expected progress panel, got {other:?}"),
        }
    }
}
