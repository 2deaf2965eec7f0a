// Incremental Strategy
//
// Where incremental state lives between compilations is the hosting
// tool's choice: not at all, or carried alongside the program snapshots.

use std::cell::RefCell;

use super::api::IncrementalState;

pub trait IncrementalBuildStrategy {
    fn get_incremental_state(&self) -> Option<IncrementalState>;
    fn set_incremental_state(&self, state: IncrementalState);
}

/// Full rebuild every time; nothing is retained.
#[derive(Debug, Default)]
pub struct NoopIncrementalBuildStrategy;

impl IncrementalBuildStrategy for NoopIncrementalBuildStrategy {
    fn get_incremental_state(&self) -> Option<IncrementalState> {
        None
    }

    fn set_incremental_state(&self, _state: IncrementalState) {}
}

/// Keeps the state of the most recent compilation for the next one.
#[derive(Debug, Default)]
pub struct TrackedIncrementalBuildStrategy {
    state: RefCell<Option<IncrementalState>>,
}

impl TrackedIncrementalBuildStrategy {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IncrementalBuildStrategy for TrackedIncrementalBuildStrategy {
    fn get_incremental_state(&self) -> Option<IncrementalState> {
        self.state.borrow().clone()
    }

    fn set_incremental_state(&self, state: IncrementalState) {
        *self.state.borrow_mut() = Some(state);
    }
}
