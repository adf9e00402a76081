//! Engine error types
//!
//! Wraps gateway failures with the operation that failed, and adds the
//! engine's own coordination errors. Nothing here is fatal: every failure
//! is recoverable by user retry.

use registry_gateway::GatewayError;

/// Which engine operation failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    FetchDirectory,
    FetchArchive,
    Archive,
    Restore,
    Promote,
    CreateAssistance,
    UpdateAssistance,
    DeleteAssistance,
}

impl Operation {
    /// Human-readable operation name
    #[must_use]
    pub fn describe(&self) -> &'static str {
        match self {
            Operation::FetchDirectory => "directory fetch",
            Operation::FetchArchive => "archive fetch",
            Operation::Archive => "archive",
            Operation::Restore => "restore",
            Operation::Promote => "head promotion",
            Operation::CreateAssistance => "assistance creation",
            Operation::UpdateAssistance => "assistance update",
            Operation::DeleteAssistance => "assistance deletion",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.describe())
    }
}

/// Errors surfaced by the directory engine
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    /// A gateway call failed; held state was left untouched
    #[error("{operation} failed: {source}")]
    Operation {
        operation: Operation,
        #[source]
        source: GatewayError,
    },

    /// Another lifecycle operation is still in flight
    #[error("another operation is still in progress")]
    Busy,

    /// A confirm was called with no matching pending workflow
    #[error("no pending {expected} workflow to confirm")]
    NoPendingAction { expected: &'static str },
}

impl DirectoryError {
    /// Whether re-invoking the same action may succeed
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Operation { source, .. } => source.is_retryable(),
            Self::Busy => true,
            Self::NoPendingAction { .. } => false,
        }
    }
}

/// A dismissable, user-facing failure notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// What the user was doing
    pub operation: Option<Operation>,
    /// Message to display
    pub message: String,
    /// Whether re-invoking the action may succeed
    pub retryable: bool,
}

impl Notification {
    /// Build a notification from an engine error
    #[must_use]
    pub fn from_error(error: &DirectoryError) -> Self {
        match error {
            DirectoryError::Operation { operation, source } => Self {
                operation: Some(*operation),
                message: source.user_message(),
                retryable: source.is_retryable(),
            },
            other => Self {
                operation: None,
                message: other.to_string(),
                retryable: other.is_retryable(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operation_errors_delegate_retryability_to_the_gateway() {
        let err = DirectoryError::Operation {
            operation: Operation::Promote,
            source: GatewayError::Timeout,
        };
        assert!(err.is_retryable());

        let err = DirectoryError::Operation {
            operation: Operation::CreateAssistance,
            source: GatewayError::Validation {
                message: "amount must be positive".to_string(),
            },
        };
        assert!(!err.is_retryable());
    }

    #[test]
    fn notification_surfaces_the_server_validation_message() {
        let err = DirectoryError::Operation {
            operation: Operation::CreateAssistance,
            source: GatewayError::Validation {
                message: "amount must be positive".to_string(),
            },
        };
        let note = Notification::from_error(&err);
        assert_eq!(note.message, "amount must be positive");
        assert_eq!(note.operation, Some(Operation::CreateAssistance));
        assert!(!note.retryable);
    }
}
