//! Buddy Request Data Structure
//!
//! Represents buddy requests between users. An accepted request
//! establishes a symmetric buddy relationship; only mutual buddies
//! may exchange messages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Status of a buddy request
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BuddyRequestStatus {
    /// Request is pending
    Pending,
    /// Request was accepted
    Accepted,
    /// Request was rejected
    Rejected,
}

impl Default for BuddyRequestStatus {
    fn default() -> Self {
        BuddyRequestStatus::Pending
    }
}

impl BuddyRequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuddyRequestStatus::Pending => "pending",
            BuddyRequestStatus::Accepted => "accepted",
            BuddyRequestStatus::Rejected => "rejected",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(BuddyRequestStatus::Pending),
            "accepted" => Some(BuddyRequestStatus::Accepted),
            "rejected" => Some(BuddyRequestStatus::Rejected),
            _ => None,
        }
    }
}

/// Represents a buddy request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BuddyRequest {
    /// Unique request ID
    pub id: Uuid,
    /// User who sent the request
    pub from_user_id: Uuid,
    /// User who received the request
    pub to_user_id: Uuid,
    /// Current status of the request
    #[serde(default)]
    pub status: BuddyRequestStatus,
    /// When the request was created
    pub created_at: DateTime<Utc>,
    /// When the request was responded to
    pub responded_at: Option<DateTime<Utc>>,
}

impl BuddyRequest {
    /// Create a new pending buddy request
    pub fn new(from_user_id: Uuid, to_user_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            from_user_id,
            to_user_id,
            status: BuddyRequestStatus::Pending,
            created_at: Utc::now(),
            responded_at: None,
        }
    }

    /// Check if the request is pending
    pub fn is_pending(&self) -> bool {
        self.status == BuddyRequestStatus::Pending
    }
}

/// Request to send a buddy request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendBuddyRequestRequest {
    /// User to send the request to
    pub to_user_id: Uuid,
}

/// Response after sending a buddy request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendBuddyRequestResponse {
    pub success: bool,
    pub request_id: Option<Uuid>,
    pub error: Option<String>,
}

/// Request to respond to a buddy request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RespondBuddyRequestRequest {
    /// ID of the request to respond to
    pub request_id: Uuid,
    /// Whether to accept (true) or reject (false)
    pub accept: bool,
}

/// Response after responding to a buddy request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RespondBuddyRequestResponse {
    pub success: bool,
    pub error: Option<String>,
}

/// Response for listing pending buddy requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListBuddyRequestsResponse {
    pub requests: Vec<BuddyRequest>,
}
