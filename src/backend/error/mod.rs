//! Server-Tier Errors
//!
//! `types` holds the `BackendError` taxonomy (handler failures,
//! ownership violations, throttling, store and serialization faults);
//! `conversion` maps each variant to an HTTP status and JSON body so
//! handlers can return `Result<_, BackendError>` and bubble with `?`.

/// Error taxonomy and constructors
pub mod types;

/// `IntoResponse` mapping to status code + JSON body
pub mod conversion;

pub use types::BackendError;
