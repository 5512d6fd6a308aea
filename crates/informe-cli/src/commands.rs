//! CLI argument definitions using clap

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Informador: turn a test lifecycle event stream into a JUnit-style XML
/// report and a console transcript
#[derive(Parser, Debug)]
#[command(name = "informador")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Lifecycle event stream as JSON Lines, or '-' for stdin
    pub events: PathBuf,

    /// Write the XML report to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Re-indent the XML report, one tag per line
    #[arg(long)]
    pub pretty: bool,

    /// Suppress the console transcript
    #[arg(long)]
    pub no_transcript: bool,

    /// Poll for the events file to appear before reading
    #[arg(long)]
    pub wait: bool,

    /// Timeout for --wait, in milliseconds
    #[arg(long, default_value_t = informe::DEFAULT_WAIT_TIMEOUT_MS)]
    pub timeout_ms: u64,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress transcript and non-error logging)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto")]
    pub color: ColorArg,
}

impl Cli {
    /// Check whether the event stream comes from stdin
    #[must_use]
    pub fn reads_stdin(&self) -> bool {
        self.events.as_os_str() == "-"
    }
}

/// Color choice for terminal output
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorArg {
    /// Detect terminal support
    #[default]
    Auto,
    /// Force colors on
    Always,
    /// Force colors off
    Never,
}

impl ColorArg {
    /// Resolve to a concrete on/off decision
    #[must_use]
    pub fn enabled(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => console::colors_enabled(),
        }
    }
}
