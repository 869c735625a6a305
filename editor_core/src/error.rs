//! Errors raised at the command boundary.

use thiserror::Error;

/// A command that violates the caller contract.
///
/// The buffer is never modified when one of these is returned.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("invalid command input: {reason}")]
    InvalidCommandInput { reason: String },
}

impl CommandError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidCommandInput {
            reason: reason.into(),
        }
    }
}
