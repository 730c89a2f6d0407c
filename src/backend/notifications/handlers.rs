//! Notification HTTP Handlers
//!
//! Poll-only surface: list and mark-read, both scoped to the caller.
//! Nothing here touches the realtime channel.

use axum::{extract::State, http::HeaderMap, Json};

use super::db;
use crate::backend::auth::resolve_principal;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::shared::social::{
    ListNotificationsResponse, MarkNotificationsReadRequest, MarkNotificationsReadResponse,
};

const LIST_LIMIT: i64 = 100;

/// List the caller's notifications (GET /api/notifications)
pub async fn get_notifications(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ListNotificationsResponse>, BackendError> {
    let pool = state.require_pool()?;
    let owner_id = resolve_principal(&headers)?;

    let notifications = db::list_for_owner(pool, owner_id, LIST_LIMIT)
        .await
        .map_err(|e| {
            tracing::error!("failed to list notifications: {:?}", e);
            e
        })?;

    Ok(Json(ListNotificationsResponse { notifications }))
}

/// Mark the caller's notifications read (POST /api/notifications/read)
///
/// An empty id list marks everything. Ids the caller does not own are
/// ignored by the owner-scoped update.
pub async fn mark_notifications_read(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<MarkNotificationsReadRequest>,
) -> Result<Json<MarkNotificationsReadResponse>, BackendError> {
    let pool = state.require_pool()?;
    let owner_id = resolve_principal(&headers)?;

    let updated_count = db::mark_read(pool, owner_id, &request.notification_ids)
        .await
        .map_err(|e| {
            tracing::error!("failed to mark notifications read: {:?}", e);
            e
        })?;

    Ok(Json(MarkNotificationsReadResponse {
        success: true,
        updated_count,
        error: None,
    }))
}
