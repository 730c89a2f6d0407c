//! Authentication test helpers
//!
//! Builds real bearer tokens so handler-level tests exercise the same
//! principal resolution path as production requests.

use axum::http::HeaderMap;
use socialite::backend::auth::sessions::create_token;
use uuid::Uuid;

/// A principal with a valid bearer token
pub struct TestPrincipal {
    pub user_id: Uuid,
    pub token: String,
}

impl TestPrincipal {
    pub fn new() -> Self {
        let user_id = Uuid::new_v4();
        let token = create_token(user_id).expect("failed to create test token");
        Self { user_id, token }
    }

    /// Headers carrying this principal's bearer token
    pub fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            "Authorization",
            format!("Bearer {}", self.token)
                .parse()
                .expect("invalid header value"),
        );
        headers
    }
}

impl Default for TestPrincipal {
    fn default() -> Self {
        Self::new()
    }
}
