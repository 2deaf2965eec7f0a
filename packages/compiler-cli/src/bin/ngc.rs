//! `ngc` — Angular ahead-of-time compiler entry point.

use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;

use anyhow::Context;
use clap::Parser;

use angular_compiler_cli::config::ProjectConfig;
use angular_compiler_cli::ngtsc::core::NgCompiler;
use angular_compiler_cli::ngtsc::diagnostics::replace_ts_with_ng_in_errors;
use angular_compiler_cli::ngtsc::file_system::{
    AbsoluteFsPath, NativeFileSystem, PathManipulation,
};
use angular_compiler_cli::ngtsc::incremental::{
    fresh_compilation_ticket, NoopIncrementalBuildStrategy,
};
use angular_compiler_cli::ngtsc::logging::{ConsoleLogger, LogLevel, Logger};
use angular_compiler_cli::ngtsc::perf::ActivePerfRecorder;
use angular_compiler_cli::ngtsc::program_driver::{ProgramDriver, TsCreateProgramDriver};
use ts::DiagnosticCategory;

#[derive(Parser)]
#[command(name = "ngc", version, about = "Angular ahead-of-time compiler")]
struct Cli {
    /// Path to the project configuration file.
    #[arg(short = 'p', long, default_value = "angular.json")]
    project: PathBuf,

    /// Print each analyzed file.
    #[arg(long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let logger = ConsoleLogger::new(if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Warn
    });
    match run(&cli, &logger) {
        Ok(error_count) if error_count == 0 => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e) => {
            logger.error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, logger: &dyn Logger) -> anyhow::Result<usize> {
    let config = ProjectConfig::load(&cli.project)
        .with_context(|| format!("failed to read project at {}", cli.project.display()))?;

    let fs = NativeFileSystem::new();
    let project_dir = cli
        .project
        .parent()
        .map(|p| p.to_string_lossy().to_string())
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| ".".to_string());

    let mut root_files: Vec<AbsoluteFsPath> = Vec::new();
    for pattern in config.files.clone().unwrap_or_else(|| vec!["**/*.ts".to_string()]) {
        let full = fs.join(&project_dir, &[&pattern]);
        for entry in glob::glob(&full).with_context(|| format!("bad glob: {}", full))? {
            let path = entry?;
            root_files.push(AbsoluteFsPath::from(&path));
        }
    }
    root_files.sort();
    root_files.dedup();
    if cli.verbose {
        for file in &root_files {
            logger.debug(&format!("input: {}", file));
        }
    }

    let options = config.to_compiler_options();
    let driver = TsCreateProgramDriver::create(&fs, &root_files);
    let program = driver.get_program();
    let ticket = fresh_compilation_ticket(
        program,
        options,
        Rc::new(NoopIncrementalBuildStrategy),
        Box::new(driver),
        Rc::new(ActivePerfRecorder::new()),
        false,
        true,
    );
    let compiler = NgCompiler::from_ticket(ticket, &fs);

    let diagnostics = compiler.get_diagnostics();
    let mut error_count = 0;
    for diagnostic in &diagnostics {
        if diagnostic.category == DiagnosticCategory::Error {
            error_count += 1;
        }
        println!("{}", format_diagnostic(diagnostic));
    }
    if error_count > 0 {
        logger.error(&format!("Found {} error(s).", error_count));
    }
    Ok(error_count)
}

fn format_diagnostic(diagnostic: &ts::Diagnostic) -> String {
    let (severity, color) = match diagnostic.category {
        DiagnosticCategory::Error => ("error", 91),
        DiagnosticCategory::Warning => ("warning", 93),
        _ => ("info", 96),
    };
    let location = match (&diagnostic.file, diagnostic.start) {
        (Some(file), Some(start)) => format!("{}@{}: ", file, start),
        (Some(file), None) => format!("{}: ", file),
        _ => String::new(),
    };
    let formatted = format!(
        "{}\u{001b}[{}mTS{}: \u{001b}[0m{}{}",
        severity, color, diagnostic.code, location, diagnostic.message_text
    );
    replace_ts_with_ng_in_errors(&formatted)
}
