//! Messaging HTTP Handlers
//!
//! Send, transcript, bulk mark-read, and the authoritative unread
//! fetch. Every handler resolves the caller's principal first and
//! scopes reads and writes to it. Events are published strictly after
//! the store commit; a publish problem never fails the request.

use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    Json,
};
use uuid::Uuid;

use super::db;
use crate::backend::auth::resolve_principal;
use crate::backend::error::BackendError;
use crate::backend::realtime::DomainWrite;
use crate::backend::server::state::AppState;
use crate::backend::throttle::{ThrottleDecision, ThrottleResource};
use crate::shared::social::{
    ListTranscriptResponse, MarkReadRequest, MarkReadResponse, Message, SendMessageRequest,
    SendMessageResponse,
};
use crate::shared::UnreadResponse;

/// Send a direct message (POST /api/messages)
///
/// Validation and authorization failures come back as a structured
/// error list with `success: false`, not as HTTP errors; throttling
/// and infrastructure failures use the error status path.
pub async fn send_message(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<SendMessageRequest>,
) -> Result<Json<SendMessageResponse>, BackendError> {
    let pool = state.require_pool()?;
    let sender_id = resolve_principal(&headers)?;

    if let ThrottleDecision::Throttled { retry_after } =
        state.throttle.check(sender_id, ThrottleResource::SendMessage)
    {
        return Err(BackendError::throttled(retry_after.as_secs().max(1)));
    }

    let mut errors: Vec<String> = Message::validate_content(&request.content)
        .into_iter()
        .map(|e| e.to_string())
        .collect();

    if request.receiver_id == sender_id {
        errors.push("Cannot message yourself".to_string());
    }

    if errors.is_empty() && !db::are_buddies(pool, sender_id, request.receiver_id).await? {
        errors.push("Receiver is not a buddy".to_string());
    }

    if !errors.is_empty() {
        return Ok(Json(SendMessageResponse {
            success: false,
            message: None,
            errors,
        }));
    }

    let message = db::create_message(pool, sender_id, request.receiver_id, &request.content).await?;

    // Publish after commit; advisory counters follow
    state
        .publisher
        .on_domain_write(&DomainWrite::MessageCreated(message.clone()));
    state
        .unread
        .apply_delta(message.receiver_id, message.sender_id, 1)
        .await;

    Ok(Json(SendMessageResponse {
        success: true,
        message: Some(message),
        errors: Vec::new(),
    }))
}

/// Query parameters for the transcript endpoint
#[derive(Debug, serde::Deserialize)]
pub struct TranscriptParams {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

/// Get the transcript with one buddy (GET /api/messages/{buddy_id})
pub async fn get_transcript(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(buddy_id): Path<Uuid>,
    Query(params): Query<TranscriptParams>,
) -> Result<Json<ListTranscriptResponse>, BackendError> {
    let pool = state.require_pool()?;
    let user_id = resolve_principal(&headers)?;

    let limit = params.limit.unwrap_or(50).min(200) as i64;
    let offset = params.offset.unwrap_or(0) as i64;

    let messages = db::get_transcript(pool, user_id, buddy_id, limit, offset)
        .await
        .map_err(|e| {
            tracing::error!("failed to load transcript: {:?}", e);
            e
        })?;

    Ok(Json(ListTranscriptResponse { messages }))
}

/// Mark every unread message from one buddy as read
/// (POST /api/messages/read)
///
/// Atomic and idempotent: the update flips all qualifying rows in one
/// statement, and a repeat call when nothing is unread returns zero.
/// One read-status event is published per affected message, addressed
/// to both parties.
pub async fn mark_read(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<MarkReadRequest>,
) -> Result<Json<MarkReadResponse>, BackendError> {
    let pool = state.require_pool()?;
    let user_id = resolve_principal(&headers)?;

    let affected = db::bulk_mark_read(pool, user_id, request.buddy_id).await?;
    let updated_count = affected.len() as u64;

    if updated_count > 0 {
        state
            .publisher
            .on_domain_write(&DomainWrite::MessagesMarkedRead(affected));
        state
            .unread
            .clear_counterparty(user_id, request.buddy_id)
            .await;
    }

    tracing::debug!(%user_id, buddy = %request.buddy_id, updated_count, "bulk mark-read");

    Ok(Json(MarkReadResponse {
        success: true,
        updated_count,
        error: None,
    }))
}

/// Authoritative unread fetch (GET /api/unread)
///
/// Runs the reconcile path: recompute against the message table,
/// repair any cache drift, return the authoritative snapshot.
pub async fn get_unread(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<UnreadResponse>, BackendError> {
    let pool = state.require_pool()?;
    let user_id = resolve_principal(&headers)?;

    let snapshot = state.unread.reconcile(pool, user_id).await.map_err(|e| {
        tracing::error!("unread recompute failed: {:?}", e);
        e
    })?;

    Ok(Json(UnreadResponse { snapshot }))
}
