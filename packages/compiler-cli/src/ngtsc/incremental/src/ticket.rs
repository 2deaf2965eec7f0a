// Compilation Tickets
//
// A ticket describes which incremental strategy applies to one compilation
// request and carries everything the compiler needs to resume correctly.
// The caller classifies the kind based on what it retained since the last
// request; the compiler orchestrator is then a pure function of the ticket.

use std::collections::HashSet;
use std::rc::Rc;

use super::api::IncrementalState;
use super::strategy::IncrementalBuildStrategy;
use crate::ngtsc::core::NgCompilerOptions;
use crate::ngtsc::perf::PerfRecorder;
use crate::ngtsc::program_driver::ProgramDriver;
use ts::Program;

pub enum TicketKind {
    /// No prior state; analyze everything.
    Fresh,
    /// A prior program (and its state) is still alive; reuse per-file
    /// analysis where file identity is unchanged.
    IncrementalFromProgram {
        old_program: Rc<Program>,
        old_state: IncrementalState,
        modified_resource_files: HashSet<String>,
    },
    /// Only persisted state survived from the previous run.
    IncrementalFromState {
        old_state: IncrementalState,
        modified_resource_files: HashSet<String>,
    },
    /// Only resource files changed; program structure is identical.
    ResourceChange {
        old_state: IncrementalState,
        modified_resource_files: HashSet<String>,
    },
}

impl TicketKind {
    pub fn name(&self) -> &'static str {
        match self {
            TicketKind::Fresh => "fresh",
            TicketKind::IncrementalFromProgram { .. } => "incremental-from-program",
            TicketKind::IncrementalFromState { .. } => "incremental-from-state",
            TicketKind::ResourceChange { .. } => "resource-change",
        }
    }
}

pub struct CompilationTicket {
    pub kind: TicketKind,
    pub new_program: Rc<Program>,
    pub options: NgCompilerOptions,
    pub incremental_strategy: Rc<dyn IncrementalBuildStrategy>,
    pub program_driver: Box<dyn ProgramDriver>,
    pub perf_recorder: Rc<dyn PerfRecorder>,
    pub use_poisoned_data: bool,
    pub enable_template_type_checker: bool,
}

#[allow(clippy::too_many_arguments)]
pub fn fresh_compilation_ticket(
    new_program: Rc<Program>,
    options: NgCompilerOptions,
    incremental_strategy: Rc<dyn IncrementalBuildStrategy>,
    program_driver: Box<dyn ProgramDriver>,
    perf_recorder: Rc<dyn PerfRecorder>,
    use_poisoned_data: bool,
    enable_template_type_checker: bool,
) -> CompilationTicket {
    CompilationTicket {
        kind: TicketKind::Fresh,
        new_program,
        options,
        incremental_strategy,
        program_driver,
        perf_recorder,
        use_poisoned_data,
        enable_template_type_checker,
    }
}

#[allow(clippy::too_many_arguments)]
pub fn incremental_from_program_ticket(
    old_program: Rc<Program>,
    old_state: IncrementalState,
    new_program: Rc<Program>,
    options: NgCompilerOptions,
    incremental_strategy: Rc<dyn IncrementalBuildStrategy>,
    program_driver: Box<dyn ProgramDriver>,
    modified_resource_files: HashSet<String>,
    perf_recorder: Rc<dyn PerfRecorder>,
    use_poisoned_data: bool,
    enable_template_type_checker: bool,
) -> CompilationTicket {
    CompilationTicket {
        kind: TicketKind::IncrementalFromProgram {
            old_program,
            old_state,
            modified_resource_files,
        },
        new_program,
        options,
        incremental_strategy,
        program_driver,
        perf_recorder,
        use_poisoned_data,
        enable_template_type_checker,
    }
}

#[allow(clippy::too_many_arguments)]
pub fn incremental_from_state_ticket(
    old_state: IncrementalState,
    new_program: Rc<Program>,
    options: NgCompilerOptions,
    incremental_strategy: Rc<dyn IncrementalBuildStrategy>,
    program_driver: Box<dyn ProgramDriver>,
    modified_resource_files: HashSet<String>,
    perf_recorder: Rc<dyn PerfRecorder>,
    use_poisoned_data: bool,
    enable_template_type_checker: bool,
) -> CompilationTicket {
    CompilationTicket {
        kind: TicketKind::IncrementalFromState {
            old_state,
            modified_resource_files,
        },
        new_program,
        options,
        incremental_strategy,
        program_driver,
        perf_recorder,
        use_poisoned_data,
        enable_template_type_checker,
    }
}

#[allow(clippy::too_many_arguments)]
pub fn resource_change_ticket(
    old_state: IncrementalState,
    program: Rc<Program>,
    options: NgCompilerOptions,
    incremental_strategy: Rc<dyn IncrementalBuildStrategy>,
    program_driver: Box<dyn ProgramDriver>,
    modified_resource_files: HashSet<String>,
    perf_recorder: Rc<dyn PerfRecorder>,
    enable_template_type_checker: bool,
) -> CompilationTicket {
    CompilationTicket {
        kind: TicketKind::ResourceChange {
            old_state,
            modified_resource_files,
        },
        new_program: program,
        options,
        incremental_strategy,
        program_driver,
        perf_recorder,
        use_poisoned_data: false,
        enable_template_type_checker,
    }
}
