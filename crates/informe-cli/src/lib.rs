//! Informador library: the pieces behind the `informador` binary.
//!
//! Reads a JSON-Lines stream of test lifecycle events, drives an
//! [`informe::RunCollector`], and emits the JUnit-style XML report plus a
//! console transcript.

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

mod commands;
mod error;
mod output;
mod runner;

pub use commands::{Cli, ColorArg};
pub use error::{CliError, CliResult};
pub use output::{print_transcript, write_report};
pub use runner::collect_events;
