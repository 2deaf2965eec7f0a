pub mod src {
    pub mod api;
    pub mod recorder;
}

pub use src::api::{PerfEvent, PerfPhase, PerfRecorder};
pub use src::recorder::{ActivePerfRecorder, NoopPerfRecorder};
