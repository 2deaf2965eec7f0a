//! Angular TypeScript Compiler (ngtsc)
//!
//! Core logic for the Angular compiler CLI: file-system and reflection
//! abstractions, metadata registries, cycle analysis, incremental
//! compilation, template type checking, and the plugin adapter.

pub mod core;
pub mod cycles;
pub mod diagnostics;
pub mod entry_point;
pub mod file_system;
pub mod imports;
pub mod incremental;
pub mod locking;
pub mod logging;
pub mod metadata;
pub mod perf;
pub mod program_driver;
pub mod reflection;
pub mod resource;
pub mod tsc_plugin;
pub mod typecheck;
