//! Direct Message Data Structure
//!
//! Represents a direct message between two buddies, plus the API
//! request/response envelopes for sending, listing, and marking read.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::SharedError;

/// Maximum accepted message body length, in characters
pub const MAX_CONTENT_CHARS: usize = 4000;

/// Represents a direct message between two buddies
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    /// Unique message ID
    pub id: Uuid,
    /// User who sent the message
    pub sender_id: Uuid,
    /// User who received the message
    pub receiver_id: Uuid,
    /// Message content
    pub content: String,
    /// Whether the receiver has read the message.
    /// Flips false to true exactly once; never reverts.
    pub read: bool,
    /// When the message was created
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Create a new unread message
    pub fn new(sender_id: Uuid, receiver_id: Uuid, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender_id,
            receiver_id,
            content,
            read: false,
            created_at: Utc::now(),
        }
    }

    /// Validate a message body before it reaches the store.
    ///
    /// Returns every failed check rather than the first one, so the
    /// caller can surface a complete error list in one response.
    pub fn validate_content(content: &str) -> Vec<SharedError> {
        let mut errors = Vec::new();
        if content.trim().is_empty() {
            errors.push(SharedError::validation(
                "content",
                "Message content cannot be empty",
            ));
        }
        if content.chars().count() > MAX_CONTENT_CHARS {
            errors.push(SharedError::validation(
                "content",
                format!("Message content exceeds {} characters", MAX_CONTENT_CHARS),
            ));
        }
        errors
    }

    /// Get a preview of the message (first N characters)
    pub fn preview(&self, max_len: usize) -> String {
        if self.content.chars().count() <= max_len {
            self.content.clone()
        } else {
            let mut preview: String = self.content.chars().take(max_len.saturating_sub(3)).collect();
            preview.push_str("...");
            preview
        }
    }
}

/// Request to send a message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageRequest {
    /// Buddy to deliver the message to
    pub receiver_id: Uuid,
    /// Message body
    pub content: String,
}

/// Response after sending a message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageResponse {
    pub success: bool,
    pub message: Option<Message>,
    /// Structured validation failures; empty on success
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

/// Response for listing the transcript with one buddy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListTranscriptResponse {
    pub messages: Vec<Message>,
}

/// Request to mark every unread message from one buddy as read
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkReadRequest {
    /// The counterparty whose messages should flip to read
    pub buddy_id: Uuid,
}

/// Response after a bulk mark-read
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkReadResponse {
    pub success: bool,
    /// How many messages actually flipped; zero when nothing was unread
    pub updated_count: u64,
    pub error: Option<String>,
}
