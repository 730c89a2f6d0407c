//! Shared Error Types
//!
//! Failure cases that both the server tier and the client reconciliation
//! library report: serialization faults, field-level validation failures,
//! and transient delivery drops on the realtime channel.
//!
//! Validation errors carry the offending field so handlers can return a
//! complete structured error list instead of failing on the first check.
//! Delivery errors are always recoverable: resubscribe, then resync from
//! the authoritative store.
//!
//! All variants are `Clone` so a single error can be logged, stored, and
//! surfaced in a response without ownership gymnastics.

use thiserror::Error;

/// Errors shared between the server and client tiers
#[derive(Debug, Error, Clone)]
pub enum SharedError {
    /// JSON serialization or deserialization error
    #[error("Serialization error: {message}")]
    SerializationError { message: String },

    /// Data validation error, scoped to a single field
    #[error("Validation error in field '{field}': {message}")]
    ValidationError { field: String, message: String },

    /// Transient event-delivery error (transport drop, lagged receiver).
    /// Recovered by resubscribe plus authoritative resync, never shown
    /// to the end user as a hard failure.
    #[error("Delivery error: {message}")]
    DeliveryError { message: String },
}

impl SharedError {
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::SerializationError {
            message: message.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn delivery(message: impl Into<String>) -> Self {
        Self::DeliveryError {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for SharedError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(format!("JSON error: {}", err))
    }
}
