//! Real-time Event System
//!
//! This module defines the event envelope and payload types for the
//! real-time delivery channel. Every event is addressed to exactly one
//! recipient principal and carries a typed payload; subscribers may
//! filter by event type at subscription time.
//!
//! # Delivery Semantics
//!
//! Events are delivered at-least-once and FIFO per recipient. Consumers
//! must treat payloads as idempotent updates keyed by entity id.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Type of real-time event, used for subscription filtering
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// A new message was delivered to the recipient
    MessageReceived,
    /// The read flag of an existing message changed
    MessageReadStatusUpdated,
    /// Liveness signal carrying no domain data
    Heartbeat,
}

impl EventType {
    /// Parse a comma-separated filter list as sent on the wire
    /// (for example `types=message_received,heartbeat`).
    ///
    /// Unknown names are ignored rather than rejected so that older
    /// clients keep working when new event types ship.
    pub fn parse_filter(raw: &str) -> Vec<EventType> {
        raw.split(',')
            .filter_map(|name| match name.trim() {
                "message_received" => Some(EventType::MessageReceived),
                "message_read_status_updated" => Some(EventType::MessageReadStatusUpdated),
                "heartbeat" => Some(EventType::Heartbeat),
                _ => None,
            })
            .collect()
    }
}

/// Payload for a newly created message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MessagePayload {
    /// Message id
    pub id: Uuid,
    /// Sending principal
    pub sender_id: Uuid,
    /// Receiving principal
    pub receiver_id: Uuid,
    /// Message body
    pub content: String,
    /// Read flag at publish time
    pub read: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Payload for a message read-flag change
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReadStatusPayload {
    /// Message id
    pub id: Uuid,
    /// Sending principal
    pub sender_id: Uuid,
    /// Receiving principal
    pub receiver_id: Uuid,
    /// New read flag
    pub read: bool,
}

/// Typed event payload
///
/// A tagged union so that consumers match exhaustively instead of
/// probing loose JSON. Adding a variant is a compile-time event for
/// every consumer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum EventKind {
    /// A new message arrived
    MessageReceived(MessagePayload),
    /// A message read flag changed
    MessageReadStatusUpdated(ReadStatusPayload),
    /// Keep-alive with no payload
    Heartbeat,
}

impl EventKind {
    /// The filterable type of this payload
    pub fn event_type(&self) -> EventType {
        match self {
            EventKind::MessageReceived(_) => EventType::MessageReceived,
            EventKind::MessageReadStatusUpdated(_) => EventType::MessageReadStatusUpdated,
            EventKind::Heartbeat => EventType::Heartbeat,
        }
    }
}

/// Real-time event addressed to a single recipient principal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RealtimeEvent {
    /// Unique event id (consumers dedupe on this under at-least-once delivery)
    pub id: Uuid,
    /// Principal this event is addressed to
    pub recipient: Uuid,
    /// Typed payload
    pub kind: EventKind,
    /// Timestamp when the event was published
    pub published_at: DateTime<Utc>,
}

impl RealtimeEvent {
    /// Create a new event addressed to `recipient`
    pub fn new(recipient: Uuid, kind: EventKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            recipient,
            kind,
            published_at: Utc::now(),
        }
    }

    /// Create a message-received event
    pub fn message_received(recipient: Uuid, payload: MessagePayload) -> Self {
        Self::new(recipient, EventKind::MessageReceived(payload))
    }

    /// Create a read-status-updated event
    pub fn read_status_updated(recipient: Uuid, payload: ReadStatusPayload) -> Self {
        Self::new(recipient, EventKind::MessageReadStatusUpdated(payload))
    }

    /// Create a heartbeat event
    pub fn heartbeat(recipient: Uuid) -> Self {
        Self::new(recipient, EventKind::Heartbeat)
    }

    /// The filterable type of this event
    pub fn event_type(&self) -> EventType {
        self.kind.event_type()
    }

    /// Whether this event passes the given subscription filter.
    ///
    /// An empty filter means "all types". Heartbeats always pass so
    /// that filtered subscribers still observe liveness.
    pub fn matches_filter(&self, filter: &[EventType]) -> bool {
        if filter.is_empty() {
            return true;
        }
        let event_type = self.event_type();
        event_type == EventType::Heartbeat || filter.contains(&event_type)
    }
}
