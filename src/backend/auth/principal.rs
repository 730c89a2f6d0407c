//! Principal Resolution
//!
//! Turns an incoming request's bearer token into the principal id that
//! every handler scopes its reads and writes to. All ownership checks
//! downstream compare against this id.

use axum::http::{HeaderMap, StatusCode};
use uuid::Uuid;

use crate::backend::auth::sessions::verify_token;
use crate::backend::error::BackendError;

/// Extract and verify the bearer token, returning the caller's principal id
pub fn resolve_principal(headers: &HeaderMap) -> Result<Uuid, BackendError> {
    let auth_header = headers
        .get("authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            BackendError::handler(StatusCode::UNAUTHORIZED, "Missing authorization header")
        })?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        BackendError::handler(StatusCode::UNAUTHORIZED, "Malformed authorization header")
    })?;

    let claims = verify_token(token)
        .map_err(|_| BackendError::handler(StatusCode::UNAUTHORIZED, "Invalid token"))?;

    Uuid::parse_str(&claims.sub)
        .map_err(|_| BackendError::handler(StatusCode::BAD_REQUEST, "Invalid principal id in token"))
}
