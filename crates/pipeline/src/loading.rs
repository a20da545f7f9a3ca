/// Fixed number of steps every click cycle walks through.
pub const TOTAL_STEPS: u32 = 5;

/// The discrete stations of one click-to-analyze cycle, in order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum LoadingStep {
    CaptureLocation,
    ContactBackend,
    ReadResponse,
    RenderResults,
    Done,
}

impl LoadingStep {
    /// 1-based position, for "step n of m" display.
    pub fn index(self) -> u32 {
        match self {
            LoadingStep::CaptureLocation => 1,
            LoadingStep::ContactBackend => 2,
            LoadingStep::ReadResponse => 3,
            LoadingStep::RenderResults => 4,
            LoadingStep::Done => 5,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            LoadingStep::CaptureLocation => "Capturing clicked location",
            LoadingStep::ContactBackend => "Contacting analysis service",
            LoadingStep::ReadResponse => "Reading analysis response",
            LoadingStep::RenderResults => "Drawing nearest facilities",
            LoadingStep::Done => "Analysis complete",
        }
    }
}

/// Progress shown while a cycle runs.
///
/// `current_step` only ever moves forward within one cycle; a fresh cycle
/// resets it via [`LoadingState::start`].
#[derive(Debug, Clone, PartialEq)]
pub struct LoadingState {
    pub current_step: u32,
    pub total_steps: u32,
    pub message: String,
}

impl LoadingState {
    pub fn start() -> Self {
        Self::at(LoadingStep::CaptureLocation)
    }

    pub fn at(step: LoadingStep) -> Self {
        Self {
            current_step: step.index(),
            total_steps: TOTAL_STEPS,
            message: step.message().to_string(),
        }
    }

    /// Moves to `step` if it is ahead of the current one.
    ///
    /// Returns `true` when the state changed; regressions are ignored so the
    /// step counter stays monotonic no matter how callbacks interleave.
    pub fn advance(&mut self, step: LoadingStep) -> bool {
        if step.index() <= self.current_step {
            return false;
        }
        self.current_step = step.index();
        self.message = step.message().to_string();
        true
    }

    /// Completed fraction in `[0, 1]`, for a proportional progress bar.
    pub fn fraction(&self) -> f64 {
        f64::from(self.current_step) / f64::from(self.total_steps)
    }

    pub fn is_terminal(&self) -> bool {
        self.current_step >= self.total_steps
    }
}

#[cfg(test)]
mod tests {
    use super::{LoadingState, LoadingStep, TOTAL_STEPS};

    #[test]
    fn starts_at_step_one() {
        let s = LoadingState::start();
        assert_eq!(s.current_step, 1);
        assert_eq!(s.total_steps, TOTAL_STEPS);
        assert!(!s.is_terminal());
    }

    #[test]
    fn advance_is_monotonic() {
        let mut s = LoadingState::start();
        assert!(s.advance(LoadingStep::ReadResponse));
        assert_eq!(s.current_step, 3);

        // A late-arriving earlier step must not move the counter back.
        assert!(!s.advance(LoadingStep::ContactBackend));
        assert_eq!(s.current_step, 3);
        assert_eq!(s.message, LoadingStep::ReadResponse.message());

        assert!(s.advance(LoadingStep::Done));
        assert!(s.is_terminal());
    }

    #[test]
    fn fraction_is_proportional() {
        let mut s = LoadingState::start();
        assert!((s.fraction() - 0.2).abs() < 1e-12);
        s.advance(LoadingStep::Done);
        assert!((s.fraction() - 1.0).abs() < 1e-12);
    }
}
