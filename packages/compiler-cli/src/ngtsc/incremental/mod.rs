pub mod src {
    pub mod api;
    pub mod compilation;
    pub mod strategy;
    pub mod ticket;
}

#[cfg(test)]
mod test;

pub use src::api::IncrementalState;
pub use src::compilation::IncrementalCompilation;
pub use src::strategy::{
    IncrementalBuildStrategy, NoopIncrementalBuildStrategy, TrackedIncrementalBuildStrategy,
};
pub use src::ticket::{
    fresh_compilation_ticket, incremental_from_program_ticket, incremental_from_state_ticket,
    resource_change_ticket, CompilationTicket,
};
