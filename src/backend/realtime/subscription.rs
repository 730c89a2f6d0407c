/**
 * Real-time Subscription Handler
 *
 * This module implements the Server-Sent Events (SSE) subscription handler
 * for the `/realtime` endpoint. Each connection is authenticated and bound
 * to the caller's principal; only events addressed to that principal are
 * streamed.
 *
 * # Event Filtering
 *
 * Clients can filter events by type using the `types` query parameter:
 * - `?types=message_received,message_read_status_updated`
 * - No parameter - Subscribe to all event types
 *
 * Heartbeats always pass the filter so liveness is observable.
 *
 * # Connection Management
 *
 * - Connections are kept alive using the SSE keep-alive mechanism
 * - A lagged receiver skips events and keeps streaming; the client is
 *   expected to resync its unread state from the authoritative endpoint
 * - Dropping the HTTP connection drops the receiver, which is the
 *   unsubscribe
 */

use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::sse::{Event, Sse},
};
use futures_util::stream;
use std::collections::HashMap;

use crate::backend::auth::resolve_principal;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::shared::EventType;

/// Handle real-time subscription (GET /realtime)
///
/// # Query Parameters
///
/// - `types` - Comma-separated list of event types to subscribe to
///   (optional). Unknown names are ignored; an empty result means all
///   types.
///
/// # Returns
///
/// Server-Sent Events stream of `RealtimeEvent` JSON, with the event
/// type as the SSE event name.
pub async fn handle_realtime_subscription(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Sse<impl tokio_stream::Stream<Item = Result<Event, axum::Error>>>, BackendError> {
    let principal = resolve_principal(&headers)?;

    let filter: Vec<EventType> = params
        .get("types")
        .map(|raw| EventType::parse_filter(raw))
        .unwrap_or_default();

    if filter.is_empty() {
        tracing::info!(%principal, "realtime subscription, all event types");
    } else {
        tracing::info!(%principal, ?filter, "realtime subscription with filter");
    }

    let rx = state.broadcast_hub.subscribe(principal);

    // Loop until an event passes the filter. Axum's keep-alive injects
    // comment lines on idle, so nothing is emitted for filtered events.
    let stream = stream::unfold((rx, filter), move |(mut rx, filter)| async move {
        loop {
            match rx.recv().await {
                Ok(event) => {
                    if !event.matches_filter(&filter) {
                        continue;
                    }

                    let event_name = match event.event_type() {
                        EventType::MessageReceived => "message_received",
                        EventType::MessageReadStatusUpdated => "message_read_status_updated",
                        EventType::Heartbeat => "heartbeat",
                    };

                    let event_data = match serde_json::to_string(&event) {
                        Ok(data) => data,
                        Err(e) => {
                            tracing::error!("failed to serialize event: {:?}", e);
                            continue;
                        }
                    };

                    let sse_event = Event::default()
                        .id(event.id.to_string())
                        .event(event_name)
                        .data(event_data);

                    return Some((Ok(sse_event), (rx, filter)));
                }
                Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                    // At-least-once, not exactly-once: the client
                    // resyncs from the authoritative endpoint
                    tracing::warn!(skipped, "receiver lagged, events skipped");
                    continue;
                }
                Err(tokio::sync::broadcast::error::RecvError::Closed) => {
                    tracing::debug!("broadcast channel closed, ending stream");
                    return None;
                }
            }
        }
    });

    Ok(Sse::new(stream).keep_alive(axum::response::sse::KeepAlive::default()))
}
