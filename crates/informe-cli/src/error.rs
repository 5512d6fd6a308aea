//! Error types for the CLI

use informe::InformeError;
use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid argument
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Error message
        message: String,
    },

    /// The event stream could not be decoded
    #[error("Event stream error: {message}")]
    EventStream {
        /// Error message
        message: String,
    },

    /// Informe library error
    #[error("Informe error: {0}")]
    Informe(#[from] InformeError),

    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Create an invalid argument error
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an event stream error
    #[must_use]
    pub fn event_stream(message: impl Into<String>) -> Self {
        Self::EventStream {
            message: message.into(),
        }
    }

    /// Process exit code for this error
    ///
    /// A wait timeout exits 1, the same as a run with failures; everything
    /// else (malformed input, protocol violations, I/O) exits 2.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Informe(InformeError::Timeout { .. }) => 1,
            _ => 2,
        }
    }
}
