// TSC Plugin
//
// Adapter through which an external build orchestrator drives one Angular
// compilation. `setup_compilation` must be called before any other
// query; earlier calls are a defined lifecycle error.

use std::collections::HashSet;
use std::rc::Rc;

use super::host::PluginCompilerHost;
use crate::ngtsc::core::{NgCompiler, NgCompilerOptions};
use crate::ngtsc::incremental::{fresh_compilation_ticket, NoopIncrementalBuildStrategy};
use crate::ngtsc::perf::NoopPerfRecorder;
use crate::ngtsc::program_driver::{ProgramDriver, TsCreateProgramDriver};
use ts::{Diagnostic, Program};

/// Result of setting up the compilation: source files the orchestrator
/// should skip when collecting its own diagnostics or emitting.
#[derive(Debug, Clone, Default)]
pub struct CompilationSetupResult {
    pub ignore_for_diagnostics: HashSet<String>,
    pub ignore_for_emit: HashSet<String>,
}

/// Custom transformers for the emit phase. Emission is outside this
/// compiler's scope, so the set is empty, but the seam is part of the
/// plugin contract.
#[derive(Debug, Clone, Default)]
pub struct CustomTransformers {
    pub before: Vec<String>,
    pub after: Vec<String>,
}

pub struct NgTscPlugin {
    options: NgCompilerOptions,
    compiler: Option<NgCompiler>,
}

impl NgTscPlugin {
    pub fn new(options: NgCompilerOptions) -> Self {
        NgTscPlugin {
            options,
            compiler: None,
        }
    }

    pub fn name(&self) -> &'static str {
        "ngtsc"
    }

    fn compiler(&self) -> &NgCompiler {
        self.compiler
            .as_ref()
            .expect("lifecycle error: setupCompilation() must be called first")
    }

    /// Wraps the orchestrator's host. The current implementation does not
    /// add host-level behavior; the seam exists so resource-aware hosts
    /// can be layered in.
    pub fn wrap_host<'h>(&self, host: &'h dyn PluginCompilerHost) -> &'h dyn PluginCompilerHost {
        host
    }

    /// Builds the program from the host's input files and runs analysis.
    pub fn setup_compilation(&mut self, host: &dyn PluginCompilerHost) -> CompilationSetupResult {
        let fs = host.file_system();
        let driver = TsCreateProgramDriver::create(fs, &host.input_files());
        let program = driver.get_program();
        let ticket = fresh_compilation_ticket(
            program,
            self.options.clone(),
            Rc::new(NoopIncrementalBuildStrategy),
            Box::new(driver),
            Rc::new(NoopPerfRecorder::new()),
            false,
            true,
        );
        let compiler = NgCompiler::from_ticket(ticket, fs);
        let result = CompilationSetupResult {
            ignore_for_diagnostics: compiler.ignore_for_diagnostics().clone(),
            ignore_for_emit: compiler.ignore_for_emit().clone(),
        };
        self.compiler = Some(compiler);
        result
    }

    /// Diagnostics for one file, or the whole compilation.
    pub fn get_diagnostics(&self, file: Option<&str>) -> Vec<Diagnostic> {
        let compiler = self.compiler();
        match file {
            Some(file) => compiler.get_diagnostics_for_file(file),
            None => compiler.get_diagnostics(),
        }
    }

    /// Diagnostics about the options themselves.
    pub fn get_option_diagnostics(&self) -> Vec<Diagnostic> {
        let compiler = self.compiler();
        let mut diagnostics = Vec::new();
        if let Some(entry_point) = &self.options.entry_point {
            if compiler.program().get_source_file(entry_point).is_none() {
                diagnostics.push(Diagnostic {
                    category: ts::DiagnosticCategory::Error,
                    code: crate::ngtsc::diagnostics::ng_error_code(
                        crate::ngtsc::diagnostics::ErrorCode::ConfigFlatModuleNoIndexFile,
                    ),
                    file: None,
                    start: None,
                    length: None,
                    message_text: format!(
                        "The entry point '{}' is not part of the program.",
                        entry_point
                    )
                    .into(),
                    related_information: None,
                });
            }
        }
        diagnostics
    }

    pub fn get_next_program(&self) -> Rc<Program> {
        Rc::clone(self.compiler().program())
    }

    pub fn create_transformers(&self) -> CustomTransformers {
        // Ensure the lifecycle is respected even though the set is empty.
        let _ = self.compiler();
        CustomTransformers::default()
    }
}
