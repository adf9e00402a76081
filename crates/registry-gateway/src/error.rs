//! Gateway error taxonomy
//!
//! Three families matter to callers: transient failures (retry by
//! re-invoking), validation rejections (show the server message, mutate
//! nothing), and authorization failures (treated as a generic operation
//! failure; the authentication collaborator owns credential recovery).

/// Errors surfaced by gateway operations
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Network-level failure (connection refused, DNS, dropped socket)
    #[error("network error: {0}")]
    Network(String),

    /// Request exceeded the configured timeout
    #[error("request timed out")]
    Timeout,

    /// Credential missing or rejected (401/403)
    #[error("authorization rejected")]
    Unauthorized,

    /// Server rejected the payload (400/422)
    #[error("validation rejected: {message}")]
    Validation { message: String },

    /// Any other non-success status
    #[error("server error {status}: {message}")]
    Server { status: u16, message: String },

    /// Response body did not match the expected shape
    #[error("decode error: {0}")]
    Decode(String),
}

impl GatewayError {
    /// Whether re-invoking the same action may succeed
    ///
    /// Validation rejections are not retryable without changing the input;
    /// everything else is. Stale/conflicting state comes back as a server
    /// error and is reconciled by the next directory refresh.
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::Validation { .. })
    }

    /// Message suitable for a user-facing notification
    ///
    /// Validation errors surface the server-provided message; the rest get
    /// a generic description.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation { message } => message.clone(),
            Self::Timeout => "The request timed out. Please try again.".to_string(),
            Self::Unauthorized => "You are not authorized to perform this action.".to_string(),
            _ => "The operation could not be completed. Please try again.".to_string(),
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_is_not_retryable() {
        let err = GatewayError::Validation {
            message: "date_processed is required".to_string(),
        };
        assert!(!err.is_retryable());
        assert_eq!(err.user_message(), "date_processed is required");
    }

    #[test]
    fn transient_failures_are_retryable() {
        assert!(GatewayError::Timeout.is_retryable());
        assert!(GatewayError::Network("refused".to_string()).is_retryable());
        assert!(GatewayError::Server {
            status: 503,
            message: "unavailable".to_string()
        }
        .is_retryable());
    }

    #[test]
    fn unauthorized_is_a_generic_operation_failure() {
        let err = GatewayError::Unauthorized;
        assert!(err.is_retryable());
        assert!(err.user_message().contains("not authorized"));
    }
}
