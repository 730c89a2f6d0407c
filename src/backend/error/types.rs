/**
 * Backend Error Types
 *
 * Server-tier error taxonomy. Every variant knows its HTTP status, so
 * handlers can `?` store and auth failures and let the response
 * conversion do the mapping.
 *
 * Two failure families deliberately do NOT pass through here:
 * validation failures ride inside the success response shape as a
 * structured error list, and realtime delivery failures are logged and
 * recovered by resync rather than surfaced to any caller.
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::shared::SharedError;

/// Server-tier errors, each mapped to a status code and JSON body by
/// the `IntoResponse` implementation in `conversion`
#[derive(Debug, Error)]
pub enum BackendError {
    /// Request-shaped failure (missing headers, bad token, absent pool)
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        message: String,
    },

    /// Write attempted against a record the caller does not own
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// Caller exceeded the per-principal send budget
    #[error("Throttled: retry after {retry_after_secs}s")]
    Throttled {
        /// Seconds until the sliding window frees a slot
        retry_after_secs: u64,
    },

    /// Domain store error
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    /// Shared error (from shared module)
    #[error(transparent)]
    SharedError(#[from] SharedError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    /// Create a new unauthorized error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Create a new throttled error
    pub fn throttled(retry_after_secs: u64) -> Self {
        Self::Throttled { retry_after_secs }
    }

    /// HTTP status for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::Unauthorized { .. } => StatusCode::FORBIDDEN,
            Self::Throttled { .. } => StatusCode::TOO_MANY_REQUESTS,
            Self::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::SharedError(err) => match err {
                SharedError::SerializationError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
                SharedError::ValidationError { .. } => StatusCode::BAD_REQUEST,
                SharedError::DeliveryError { .. } => StatusCode::SERVICE_UNAVAILABLE,
            },
            Self::SerializationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Human-readable message for the JSON error body
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::Unauthorized { message } => message.clone(),
            Self::Throttled { retry_after_secs } => {
                format!("Too many requests, retry after {}s", retry_after_secs)
            }
            Self::DatabaseError(err) => err.to_string(),
            Self::SharedError(err) => err.to_string(),
            Self::SerializationError(err) => err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handler_error_carries_its_status() {
        let error = BackendError::handler(StatusCode::SERVICE_UNAVAILABLE, "Database unavailable");
        assert_eq!(error.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(error.message(), "Database unavailable");
    }

    #[test]
    fn ownership_violation_is_forbidden() {
        let error = BackendError::unauthorized("Not your notification");
        assert_eq!(error.status_code(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn throttled_maps_to_429_with_retry_hint() {
        let error = BackendError::throttled(7);
        assert_eq!(error.status_code(), StatusCode::TOO_MANY_REQUESTS);
        assert!(error.message().contains("7s"));
    }

    #[test]
    fn shared_errors_convert_with_their_own_status() {
        let validation: BackendError = SharedError::validation("content", "empty").into();
        assert_eq!(validation.status_code(), StatusCode::BAD_REQUEST);

        let delivery: BackendError = SharedError::delivery("lagged").into();
        assert_eq!(delivery.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert!(matches!(delivery, BackendError::SharedError(_)));
    }
}
