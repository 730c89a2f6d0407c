/**
 * Error Conversion
 *
 * Maps `BackendError` onto the wire: a JSON body `{"error", "status"}`
 * under the variant's status code. Throttled errors additionally carry
 * a `Retry-After` header so well-behaved clients can back off without
 * parsing the body.
 */

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};

use crate::backend::error::types::BackendError;

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let retry_after = match &self {
            BackendError::Throttled { retry_after_secs } => Some(*retry_after_secs),
            _ => None,
        };

        let body = Json(serde_json::json!({
            "error": self.message(),
            "status": status.as_u16(),
        }));

        let mut response = (status, body).into_response();
        if let Some(secs) = retry_after {
            if let Ok(value) = secs.to_string().parse() {
                response.headers_mut().insert(header::RETRY_AFTER, value);
            }
        }
        response
    }
}
