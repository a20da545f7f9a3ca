//! Status/result panel with an explicit, enumerated state.
//!
//! Control flow decisions are made on [`PanelContent`] variants and cycle
//! sequence numbers, never by sniffing rendered markup: a progress update
//! for a superseded cycle, or one arriving after that cycle's terminal
//! content, is ignored outright.

use foundation::seq::CycleSeq;
use foundation::time::Time;

use crate::loading::LoadingState;
use crate::summary::AnalysisSummary;

/// Prompt shown whenever no cycle owns the panel.
pub const IDLE_PROMPT: &str = "Click the map to analyse what's nearby.";

/// Seconds a terminal result/error stays up before reverting to the prompt.
pub const REVERT_DELAY_SECS: f64 = 5.0;

#[derive(Debug, Clone, PartialEq)]
pub enum PanelContent {
    Idle,
    Progress(LoadingState),
    Result(AnalysisSummary),
    Error(String),
}

impl PanelContent {
    pub fn is_terminal(&self) -> bool {
        matches!(self, PanelContent::Result(_) | PanelContent::Error(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusPanel {
    content: PanelContent,
    /// Cycle that owns the current content; `CycleSeq::NONE` when idle.
    owner: CycleSeq,
    revert_at: Option<Time>,
}

impl StatusPanel {
    pub fn new() -> Self {
        Self {
            content: PanelContent::Idle,
            owner: CycleSeq::NONE,
            revert_at: None,
        }
    }

    pub fn content(&self) -> &PanelContent {
        &self.content
    }

    pub fn owner(&self) -> CycleSeq {
        self.owner
    }

    /// Displays progress for `cycle`.
    ///
    /// Ignored when `cycle` is older than the current owner, or when the
    /// owning cycle already reached a terminal panel (late step updates must
    /// not resurrect the progress bar).
    pub fn show_progress(&mut self, cycle: CycleSeq, state: LoadingState) -> bool {
        if cycle < self.owner {
            return false;
        }
        if cycle == self.owner && self.content.is_terminal() {
            return false;
        }
        self.owner = cycle;
        self.content = PanelContent::Progress(state);
        self.revert_at = None;
        true
    }

    pub fn show_result(&mut self, cycle: CycleSeq, summary: AnalysisSummary, now: Time) -> bool {
        self.show_terminal(cycle, PanelContent::Result(summary), now)
    }

    pub fn show_error(&mut self, cycle: CycleSeq, message: impl Into<String>, now: Time) -> bool {
        self.show_terminal(cycle, PanelContent::Error(message.into()), now)
    }

    fn show_terminal(&mut self, cycle: CycleSeq, content: PanelContent, now: Time) -> bool {
        if cycle < self.owner {
            return false;
        }
        self.owner = cycle;
        self.content = content;
        self.revert_at = Some(now.after(REVERT_DELAY_SECS));
        true
    }

    /// Reverts to the idle prompt once the post-terminal delay has elapsed.
    ///
    /// Returns `true` when the panel reverted. Content replaced by a newer
    /// cycle in the meantime carries no deadline, so it is never clobbered.
    pub fn tick(&mut self, now: Time) -> bool {
        let Some(deadline) = self.revert_at else {
            return false;
        };
        if !now.has_reached(deadline) {
            return false;
        }
        self.content = PanelContent::Idle;
        self.revert_at = None;
        true
    }

    /// Text rendering for surfaces without HTML (driver/console output).
    pub fn render_text(&self) -> String {
        match &self.content {
            PanelContent::Idle => IDLE_PROMPT.to_string(),
            PanelContent::Progress(state) => format!(
                "[{}] step {}/{}: {}",
                progress_bar(state.fraction(), 20),
                state.current_step,
                state.total_steps,
                state.message
            ),
            PanelContent::Result(summary) => summary.text_lines().join("\n"),
            PanelContent::Error(message) => format!("Error: {message}"),
        }
    }
}

impl Default for StatusPanel {
    fn default() -> Self {
        Self::new()
    }
}

fn progress_bar(fraction: f64, width: usize) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * width as f64).round() as usize;
    let mut bar = String::with_capacity(width);
    for i in 0..width {
        bar.push(if i < filled { '#' } else { '-' });
    }
    bar
}
