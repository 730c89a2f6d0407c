//! Notification Data Structure
//!
//! Notifications are created exactly once per triggering entity (a
//! like, a comment, or a buddy request) and belong to a single owner.
//! They are fetched by polling, never pushed over the realtime channel.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reference to the entity that triggered a notification
///
/// Tagged union so consumers match exhaustively; each variant carries
/// the identity needed to render and to deduplicate per trigger.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NotificationTrigger {
    /// Someone liked the owner's post
    Like { like_id: Uuid, post_id: Uuid, actor_id: Uuid },
    /// Someone commented on the owner's post
    Comment { comment_id: Uuid, post_id: Uuid, actor_id: Uuid },
    /// Someone sent the owner a buddy request
    BuddyRequest { request_id: Uuid, actor_id: Uuid },
}

impl NotificationTrigger {
    /// The trigger kind as stored in the database
    pub fn kind_str(&self) -> &'static str {
        match self {
            NotificationTrigger::Like { .. } => "like",
            NotificationTrigger::Comment { .. } => "comment",
            NotificationTrigger::BuddyRequest { .. } => "buddy_request",
        }
    }

    /// The triggering entity's id. Together with `kind_str` this forms
    /// the uniqueness key: at most one notification per trigger entity.
    pub fn trigger_id(&self) -> Uuid {
        match self {
            NotificationTrigger::Like { like_id, .. } => *like_id,
            NotificationTrigger::Comment { comment_id, .. } => *comment_id,
            NotificationTrigger::BuddyRequest { request_id, .. } => *request_id,
        }
    }

    /// The principal whose action caused the notification
    pub fn actor_id(&self) -> Uuid {
        match self {
            NotificationTrigger::Like { actor_id, .. } => *actor_id,
            NotificationTrigger::Comment { actor_id, .. } => *actor_id,
            NotificationTrigger::BuddyRequest { actor_id, .. } => *actor_id,
        }
    }

    /// The action tag this trigger maps to
    pub fn action(&self) -> NotificationAction {
        match self {
            NotificationTrigger::Like { .. } => NotificationAction::Liked,
            NotificationTrigger::Comment { .. } => NotificationAction::Commented,
            NotificationTrigger::BuddyRequest { .. } => NotificationAction::RequestedBuddy,
        }
    }
}

/// What the actor did, as rendered to the owner
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NotificationAction {
    /// Actor liked a post
    Liked,
    /// Actor commented on a post
    Commented,
    /// Actor sent a buddy request
    RequestedBuddy,
}

impl NotificationAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationAction::Liked => "liked",
            NotificationAction::Commented => "commented",
            NotificationAction::RequestedBuddy => "requested_buddy",
        }
    }
}

/// Represents a notification owned by one principal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Notification {
    /// Unique notification ID
    pub id: Uuid,
    /// Principal the notification belongs to; only the owner may read
    /// or mutate it
    pub owner_id: Uuid,
    /// What triggered the notification
    pub trigger: NotificationTrigger,
    /// The action tag
    pub action: NotificationAction,
    /// Whether the owner has seen the notification
    pub read: bool,
    /// When the notification was created
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Create a new unread notification for `owner_id`
    pub fn new(owner_id: Uuid, trigger: NotificationTrigger) -> Self {
        let action = trigger.action();
        Self {
            id: Uuid::new_v4(),
            owner_id,
            trigger,
            action,
            read: false,
            created_at: Utc::now(),
        }
    }
}

/// Response for listing the caller's notifications
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListNotificationsResponse {
    pub notifications: Vec<Notification>,
}

/// Request to mark notifications read. With no ids, marks all of the
/// caller's notifications read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkNotificationsReadRequest {
    #[serde(default)]
    pub notification_ids: Vec<Uuid>,
}

/// Response after marking notifications read
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkNotificationsReadResponse {
    pub success: bool,
    pub updated_count: u64,
    pub error: Option<String>,
}
