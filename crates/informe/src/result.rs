//! Result and error types for Informe.

use thiserror::Error;

/// Result type for Informe operations
pub type InformeResult<T> = Result<T, InformeError>;

/// Errors that can occur in Informe
#[derive(Debug, Error)]
pub enum InformeError {
    /// Lifecycle events arrived in an order the protocol forbids
    #[error("Protocol violation: {message}")]
    Protocol {
        /// What the driver did wrong
        message: String,
    },

    /// An event payload was missing required fields
    #[error("Invalid descriptor: {message}")]
    InvalidDescriptor {
        /// What was missing or malformed
        message: String,
    },

    /// A wait condition did not resolve in time
    #[error("Operation timed out after {ms}ms")]
    Timeout {
        /// Timeout in milliseconds
        ms: u64,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl InformeError {
    /// Create a protocol-violation error
    #[must_use]
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }

    /// Create an invalid-descriptor error
    #[must_use]
    pub fn invalid_descriptor(message: impl Into<String>) -> Self {
        Self::InvalidDescriptor {
            message: message.into(),
        }
    }
}
