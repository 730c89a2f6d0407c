//! Social Domain Types
//!
//! Domain records and API envelopes for the messaging and notification
//! surface: direct messages, buddy requests, notifications, and the
//! derived unread snapshot.

/// Direct messages between buddies
pub mod message;

/// Buddy requests and the buddy relationship
pub mod buddy;

/// Notifications triggered by domain events
pub mod notification;

/// Derived unread-count snapshot
pub mod unread;

pub use buddy::{
    BuddyRequest, BuddyRequestStatus, ListBuddyRequestsResponse, RespondBuddyRequestRequest,
    RespondBuddyRequestResponse, SendBuddyRequestRequest, SendBuddyRequestResponse,
};
pub use message::{
    ListTranscriptResponse, MarkReadRequest, MarkReadResponse, Message, SendMessageRequest,
    SendMessageResponse,
};
pub use notification::{
    ListNotificationsResponse, MarkNotificationsReadRequest, MarkNotificationsReadResponse,
    Notification, NotificationAction, NotificationTrigger,
};
pub use unread::{UnreadResponse, UnreadSnapshot};
