use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use super::api::{PerfEvent, PerfPhase, PerfRecorder};

/// Recorder that drops all data.
#[derive(Debug, Default)]
pub struct NoopPerfRecorder;

impl NoopPerfRecorder {
    pub fn new() -> Self {
        Self
    }
}

impl PerfRecorder for NoopPerfRecorder {
    fn phase(&self, _phase: PerfPhase) -> PerfPhase {
        PerfPhase::Unaccounted
    }

    fn event_count(&self, _event: PerfEvent, _count: usize) {}
}

/// Recorder that counts events and tracks the current phase.
pub struct ActivePerfRecorder {
    current_phase: Cell<PerfPhase>,
    events: RefCell<HashMap<PerfEvent, usize>>,
}

impl Default for ActivePerfRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl ActivePerfRecorder {
    pub fn new() -> Self {
        ActivePerfRecorder {
            current_phase: Cell::new(PerfPhase::Unaccounted),
            events: RefCell::new(HashMap::new()),
        }
    }

    pub fn count_of(&self, event: PerfEvent) -> usize {
        self.events.borrow().get(&event).copied().unwrap_or(0)
    }

    pub fn current_phase(&self) -> PerfPhase {
        self.current_phase.get()
    }
}

impl PerfRecorder for ActivePerfRecorder {
    fn phase(&self, phase: PerfPhase) -> PerfPhase {
        self.current_phase.replace(phase)
    }

    fn event_count(&self, event: PerfEvent, count: usize) {
        *self.events.borrow_mut().entry(event).or_insert(0) += count;
    }
}
