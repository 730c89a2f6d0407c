/**
 * Event Publisher
 *
 * Turns committed domain writes into typed realtime events and hands
 * them to the broadcast hub. Publishing happens strictly after the
 * store commit and never fails the underlying write: a delivery
 * problem is logged and recovered later by authoritative resync.
 */

use crate::backend::realtime::broadcast::BroadcastHub;
use crate::shared::event::{MessagePayload, ReadStatusPayload};
use crate::shared::social::{BuddyRequest, Message, Notification};
use crate::shared::RealtimeEvent;

/// A domain mutation observed after commit
#[derive(Debug, Clone)]
pub enum DomainWrite {
    /// A message row was inserted
    MessageCreated(Message),
    /// One or more message read flags flipped to true
    MessagesMarkedRead(Vec<Message>),
    /// A notification row was inserted. Notifications are poll-only;
    /// nothing is pushed for them.
    NotificationCreated(Notification),
    /// A buddy request was created or responded to. No push; the
    /// recipient discovers it via its notification poll.
    BuddyRequestChanged(BuddyRequest),
}

/// Publishes typed events derived from domain writes
#[derive(Clone)]
pub struct EventPublisher {
    hub: BroadcastHub,
}

impl EventPublisher {
    pub fn new(hub: BroadcastHub) -> Self {
        Self { hub }
    }

    /// Publish a message-created event
    ///
    /// The receiver gets the event so its unread state can advance;
    /// the sender gets a mirror copy so its other tabs can append the
    /// message to the open transcript.
    pub fn publish_message_created(&self, message: &Message) {
        let payload = MessagePayload {
            id: message.id,
            sender_id: message.sender_id,
            receiver_id: message.receiver_id,
            content: message.content.clone(),
            read: message.read,
            created_at: message.created_at,
        };

        self.hub.publish(RealtimeEvent::message_received(
            message.receiver_id,
            payload.clone(),
        ));
        self.hub
            .publish(RealtimeEvent::message_received(message.sender_id, payload));
    }

    /// Publish a read-status event for one message, addressed to both
    /// parties
    ///
    /// Bulk mark-read fans out one event per affected message; there is
    /// no separate bulk event type.
    pub fn publish_message_read(&self, message: &Message) {
        let payload = ReadStatusPayload {
            id: message.id,
            sender_id: message.sender_id,
            receiver_id: message.receiver_id,
            read: message.read,
        };

        self.hub.publish(RealtimeEvent::read_status_updated(
            message.sender_id,
            payload.clone(),
        ));
        self.hub.publish(RealtimeEvent::read_status_updated(
            message.receiver_id,
            payload,
        ));
    }

    /// Observe a committed domain write
    ///
    /// Called by the CRUD layer after each commit. Must not fail the
    /// caller: every branch either publishes or logs.
    pub fn on_domain_write(&self, write: &DomainWrite) {
        match write {
            DomainWrite::MessageCreated(message) => {
                self.publish_message_created(message);
            }
            DomainWrite::MessagesMarkedRead(messages) => {
                for message in messages {
                    self.publish_message_read(message);
                }
            }
            DomainWrite::NotificationCreated(notification) => {
                tracing::debug!(
                    notification_id = %notification.id,
                    owner = %notification.owner_id,
                    "notification created, poll-only"
                );
            }
            DomainWrite::BuddyRequestChanged(request) => {
                tracing::debug!(
                    request_id = %request.id,
                    status = request.status.as_str(),
                    "buddy request changed, poll-only"
                );
            }
        }
    }
}
