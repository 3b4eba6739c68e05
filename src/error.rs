//! Error types for FINS communication over Host Link.

use thiserror::Error;

/// Result type alias for FINS operations.
pub type Result<T> = std::result::Result<T, FinsError>;

/// Errors surfaced by the FINS client.
///
/// Socket-level faults never appear here: the transport logs them and
/// recovers by discarding its connection, and the retry loop sees them only
/// as failed attempts. What remains is the protocol-level outcome of an
/// operation.
#[derive(Debug, Error)]
pub enum FinsError {
    /// No valid response was obtained within the retry budget.
    #[error("no valid FINS response after {attempts} attempts")]
    RetriesExhausted {
        /// Number of attempts made before giving up.
        attempts: u32,
    },

    /// A read response carried a different number of items than requested.
    #[error("response length mismatch: expected {expected} characters, got {actual}")]
    LengthMismatch {
        /// Expected response length in hex characters.
        expected: usize,
        /// Actual response length in hex characters.
        actual: usize,
    },

    /// The response was validated but its content is not usable.
    #[error("invalid response: {reason}")]
    InvalidResponse {
        /// Description of the response problem.
        reason: String,
    },

    /// A clock response did not contain a parseable calendar instant.
    #[error("invalid clock value: {text:?}")]
    InvalidClock {
        /// The text that failed to parse.
        text: String,
    },
}

impl FinsError {
    /// Creates a new `RetriesExhausted` error.
    pub fn retries_exhausted(attempts: u32) -> Self {
        Self::RetriesExhausted { attempts }
    }

    /// Creates a new `LengthMismatch` error.
    pub fn length_mismatch(expected: usize, actual: usize) -> Self {
        Self::LengthMismatch { expected, actual }
    }

    /// Creates a new `InvalidResponse` error.
    pub fn invalid_response(reason: impl Into<String>) -> Self {
        Self::InvalidResponse {
            reason: reason.into(),
        }
    }

    /// Creates a new `InvalidClock` error.
    pub fn invalid_clock(text: impl Into<String>) -> Self {
        Self::InvalidClock { text: text.into() }
    }
}
