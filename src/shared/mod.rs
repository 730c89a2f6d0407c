//! Shared Types
//!
//! Everything that crosses the wire between the server tier and the
//! client reconciliation library lives here: domain records, the
//! realtime event envelope, configuration, and the shared error enum.
//! All of it serializes with serde; neither tier ever hand-builds
//! these shapes.

/// Realtime event envelope, payloads, and type filter
pub mod event;

/// Errors shared by both tiers
pub mod error;

/// Runtime tunables and builder
pub mod config;

/// Social domain records (messages, buddies, notifications, unread counts)
pub mod social;

pub use config::{AppConfig, AppConfigBuilder, ConfigError};
pub use error::SharedError;
pub use event::{EventKind, EventType, MessagePayload, RealtimeEvent, ReadStatusPayload};
pub use social::{
    BuddyRequest, BuddyRequestStatus, Message, Notification, NotificationAction,
    NotificationTrigger, UnreadResponse, UnreadSnapshot,
};
