/**
 * API Route Handlers
 *
 * This module wires the JSON API endpoints:
 * - Messaging (send, transcript, mark read, unread counts)
 * - Buddy requests (send, list, respond)
 * - Notifications (list, mark read)
 *
 * # Authentication
 *
 * Every route here requires a JWT Bearer token in the `Authorization`
 * header; the handlers resolve the caller before touching the store.
 */

use axum::Router;

use crate::backend::messaging::handlers::{get_transcript, get_unread, mark_read, send_message};
use crate::backend::notifications::handlers::{get_notifications, mark_notifications_read};
use crate::backend::server::state::AppState;
use crate::backend::social::handlers::{
    get_buddy_requests, respond_to_buddy_request, send_buddy_request,
};

/// Configure API routes
///
/// Adds the following routes to the router:
///
/// ## Messaging
/// - `POST /api/messages` - Send a direct message
/// - `GET /api/messages/{buddy_id}` - Page through a transcript
/// - `POST /api/messages/read` - Mark a buddy's messages read
/// - `GET /api/unread` - Unread counts, recomputed from the store
///
/// ## Buddy Requests
/// - `POST /api/buddies/request` - Send a buddy request
/// - `GET /api/buddies/requests` - Pending requests for the caller
/// - `POST /api/buddies/respond` - Accept or reject a request
///
/// ## Notifications
/// - `GET /api/notifications` - List the caller's notifications
/// - `POST /api/notifications/read` - Mark notifications read
pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        // Messaging endpoints
        .route("/api/messages", axum::routing::post(send_message))
        .route(
            "/api/messages/{buddy_id}",
            axum::routing::get(get_transcript),
        )
        .route("/api/messages/read", axum::routing::post(mark_read))
        .route("/api/unread", axum::routing::get(get_unread))
        // Buddy request endpoints
        .route(
            "/api/buddies/request",
            axum::routing::post(send_buddy_request),
        )
        .route(
            "/api/buddies/requests",
            axum::routing::get(get_buddy_requests),
        )
        .route(
            "/api/buddies/respond",
            axum::routing::post(respond_to_buddy_request),
        )
        // Notification endpoints
        .route(
            "/api/notifications",
            axum::routing::get(get_notifications),
        )
        .route(
            "/api/notifications/read",
            axum::routing::post(mark_notifications_read),
        )
}
