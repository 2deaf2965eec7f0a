#![deny(clippy::all)]

/**
 * Angular Compiler CLI - Rust Implementation
 *
 * The ngtsc compiler core and the `ngc` command-line entry point.
 */
// Re-export compiler for convenience
pub use angular_compiler as compiler;

pub mod config;
pub mod ngtsc;

/// CLI version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
