//! Buddy Request HTTP Handlers
//!
//! Create, list, and respond to buddy requests. Creating a request
//! also creates the recipient's notification (at most once per
//! request); responses are recipient-only.

use axum::{
    extract::State,
    http::HeaderMap,
    Json,
};

use super::db;
use crate::backend::auth::resolve_principal;
use crate::backend::error::BackendError;
use crate::backend::notifications;
use crate::backend::realtime::DomainWrite;
use crate::backend::server::state::AppState;
use crate::backend::throttle::{ThrottleDecision, ThrottleResource};
use crate::shared::social::{
    BuddyRequestStatus, ListBuddyRequestsResponse, Notification, NotificationTrigger,
    RespondBuddyRequestRequest, RespondBuddyRequestResponse, SendBuddyRequestRequest,
    SendBuddyRequestResponse,
};

/// Send a buddy request (POST /api/buddies/request)
pub async fn send_buddy_request(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<SendBuddyRequestRequest>,
) -> Result<Json<SendBuddyRequestResponse>, BackendError> {
    let pool = state.require_pool()?;
    let from_user_id = resolve_principal(&headers)?;

    if let ThrottleDecision::Throttled { retry_after } = state
        .throttle
        .check(from_user_id, ThrottleResource::BuddyRequest)
    {
        return Err(BackendError::throttled(retry_after.as_secs().max(1)));
    }

    if request.to_user_id == from_user_id {
        return Ok(Json(SendBuddyRequestResponse {
            success: false,
            request_id: None,
            error: Some("Cannot send a buddy request to yourself".to_string()),
        }));
    }

    if let Some(existing) = db::find_between(pool, from_user_id, request.to_user_id).await? {
        let reason = match existing.status {
            BuddyRequestStatus::Accepted => "Already buddies",
            _ => "Buddy request already pending",
        };
        return Ok(Json(SendBuddyRequestResponse {
            success: false,
            request_id: None,
            error: Some(reason.to_string()),
        }));
    }

    let buddy_request = db::create_buddy_request(pool, from_user_id, request.to_user_id)
        .await
        .map_err(|e| {
            tracing::error!("failed to create buddy request: {:?}", e);
            e
        })?;

    // Recipient learns about the request through its notification poll
    let trigger = NotificationTrigger::BuddyRequest {
        request_id: buddy_request.id,
        actor_id: from_user_id,
    };
    let notification = Notification::new(request.to_user_id, trigger);
    if let Some(created) =
        notifications::db::create_notification(pool, &notification).await?
    {
        state
            .publisher
            .on_domain_write(&DomainWrite::NotificationCreated(created));
    }
    state
        .publisher
        .on_domain_write(&DomainWrite::BuddyRequestChanged(buddy_request.clone()));

    Ok(Json(SendBuddyRequestResponse {
        success: true,
        request_id: Some(buddy_request.id),
        error: None,
    }))
}

/// Get pending buddy requests for the caller (GET /api/buddies/requests)
pub async fn get_buddy_requests(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ListBuddyRequestsResponse>, BackendError> {
    let pool = state.require_pool()?;
    let user_id = resolve_principal(&headers)?;

    let requests = db::get_pending_requests(pool, user_id).await.map_err(|e| {
        tracing::error!("failed to get buddy requests: {:?}", e);
        e
    })?;

    Ok(Json(ListBuddyRequestsResponse { requests }))
}

/// Respond to a buddy request (POST /api/buddies/respond)
///
/// Only the recipient may respond, and only while the request is
/// pending. Acceptance makes the pair mutual buddies; the accepted row
/// itself is the buddy edge.
pub async fn respond_to_buddy_request(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<RespondBuddyRequestRequest>,
) -> Result<Json<RespondBuddyRequestResponse>, BackendError> {
    let pool = state.require_pool()?;
    let user_id = resolve_principal(&headers)?;

    let buddy_request = db::get_request_by_id(pool, request.request_id)
        .await?
        .ok_or_else(|| {
            BackendError::handler(axum::http::StatusCode::NOT_FOUND, "Buddy request not found")
        })?;

    if buddy_request.to_user_id != user_id {
        return Err(BackendError::unauthorized(
            "Only the recipient can respond to a buddy request",
        ));
    }

    match db::respond_to_request(pool, request.request_id, request.accept).await? {
        Some(updated) => {
            state
                .publisher
                .on_domain_write(&DomainWrite::BuddyRequestChanged(updated));
            Ok(Json(RespondBuddyRequestResponse {
                success: true,
                error: None,
            }))
        }
        None => Ok(Json(RespondBuddyRequestResponse {
            success: false,
            error: Some("Buddy request already responded to".to_string()),
        })),
    }
}
