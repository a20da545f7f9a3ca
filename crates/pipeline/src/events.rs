use foundation::seq::CycleSeq;

/// One recorded orchestrator transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleEvent {
    pub cycle: CycleSeq,
    pub kind: &'static str,
    pub message: String,
}

/// Append-only transition log.
///
/// The orchestrator performs no I/O and emits no logs; this is how tests and
/// debug surfaces observe that each cycle walked its states in order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CycleLog {
    events: Vec<CycleEvent>,
}

impl CycleLog {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn emit(&mut self, cycle: CycleSeq, kind: &'static str, message: impl Into<String>) {
        self.events.push(CycleEvent {
            cycle,
            kind,
            message: message.into(),
        });
    }

    pub fn events(&self) -> &[CycleEvent] {
        &self.events
    }

    /// Event kinds recorded for one cycle, in emission order.
    pub fn kinds_for(&self, cycle: CycleSeq) -> Vec<&'static str> {
        self.events
            .iter()
            .filter(|e| e.cycle == cycle)
            .map(|e| e.kind)
            .collect()
    }

    pub fn drain(&mut self) -> Vec<CycleEvent> {
        std::mem::take(&mut self.events)
    }
}
