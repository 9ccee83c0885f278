//! Error types for the storage adaptor boundary.

use thiserror::Error;

/// Structured error types raised by storage adaptors.
///
/// Any failure at the storage boundary surfaces through these variants; the
/// orchestrator never retries an adaptor call, it aborts the session and
/// raises the wrapped failure to the caller.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum AdaptorError {
    /// The adaptor could not open its session/transaction.
    #[error("storage adaptor failed to begin a session: {reason}")]
    Begin { reason: String },

    /// The adaptor could not commit its session/transaction.
    #[error("storage adaptor failed to commit a session: {reason}")]
    Commit { reason: String },

    /// An object-level operation (create, save, delete) failed.
    #[error("storage adaptor {operation} failed: {reason}")]
    Operation { operation: String, reason: String },
}

impl AdaptorError {
    /// Check if this error occurred while opening a session
    pub fn is_begin_error(&self) -> bool {
        matches!(self, AdaptorError::Begin { .. })
    }

    /// Check if this error occurred while committing a session
    pub fn is_commit_error(&self) -> bool {
        matches!(self, AdaptorError::Commit { .. })
    }

    /// Get the operation name if this is an object-level failure
    pub fn operation(&self) -> Option<&str> {
        match self {
            AdaptorError::Operation { operation, .. } => Some(operation),
            _ => None,
        }
    }
}

// Conversion from AdaptorError to the main Error type
impl From<AdaptorError> for crate::Error {
    fn from(err: AdaptorError) -> Self {
        crate::Error::Adaptor(err)
    }
}
