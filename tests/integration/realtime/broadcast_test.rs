//! Hub and publisher integration tests
//!
//! Exercises the publish path the way handlers drive it: a domain
//! write goes into the publisher, and subscribed principals observe
//! typed events on their own channels.

use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use tokio::time::{timeout, Duration};
use uuid::Uuid;

use socialite::backend::realtime::{BroadcastHub, DomainWrite, EventPublisher};
use socialite::shared::{EventKind, Message, RealtimeEvent};

async fn next_event(rx: &mut tokio::sync::broadcast::Receiver<RealtimeEvent>) -> RealtimeEvent {
    timeout(Duration::from_secs(1), rx.recv())
        .await
        .expect("timed out waiting for event")
        .expect("channel closed")
}

#[tokio::test]
async fn message_created_reaches_both_parties() {
    let hub = BroadcastHub::new();
    let publisher = EventPublisher::new(hub.clone());

    let sender = Uuid::new_v4();
    let receiver = Uuid::new_v4();
    let mut sender_rx = hub.subscribe(sender);
    let mut receiver_rx = hub.subscribe(receiver);

    let message = Message::new(sender, receiver, "hello".to_string());
    publisher.on_domain_write(&DomainWrite::MessageCreated(message.clone()));

    let to_receiver = next_event(&mut receiver_rx).await;
    assert_eq!(to_receiver.recipient, receiver);
    match to_receiver.kind {
        EventKind::MessageReceived(payload) => {
            assert_eq!(payload.id, message.id);
            assert_eq!(payload.sender_id, sender);
            assert!(!payload.read);
        }
        other => panic!("unexpected event kind: {:?}", other),
    }

    // The sender gets a mirror so its own open tabs converge too.
    let to_sender = next_event(&mut sender_rx).await;
    assert_eq!(to_sender.recipient, sender);
    assert!(matches!(to_sender.kind, EventKind::MessageReceived(_)));
}

#[tokio::test]
async fn bulk_read_fans_out_one_event_per_message() {
    let hub = BroadcastHub::new();
    let publisher = EventPublisher::new(hub.clone());

    let sender = Uuid::new_v4();
    let receiver = Uuid::new_v4();
    let mut sender_rx = hub.subscribe(sender);

    let mut messages = Vec::new();
    for i in 0..3 {
        let mut m = Message::new(sender, receiver, format!("m{}", i));
        m.read = true;
        messages.push(m);
    }
    publisher.on_domain_write(&DomainWrite::MessagesMarkedRead(messages.clone()));

    for expected in &messages {
        let event = next_event(&mut sender_rx).await;
        match event.kind {
            EventKind::MessageReadStatusUpdated(payload) => {
                assert_eq!(payload.id, expected.id);
                assert!(payload.read);
            }
            other => panic!("unexpected event kind: {:?}", other),
        }
    }
}

#[tokio::test]
async fn events_stay_fifo_per_recipient() {
    let hub = BroadcastHub::new();
    let publisher = EventPublisher::new(hub.clone());

    let sender = Uuid::new_v4();
    let receiver = Uuid::new_v4();
    let mut rx = hub.subscribe(receiver);

    let mut ids = Vec::new();
    for i in 0..20 {
        let message = Message::new(sender, receiver, format!("m{}", i));
        ids.push(message.id);
        publisher.on_domain_write(&DomainWrite::MessageCreated(message));
    }

    for expected_id in ids {
        let event = next_event(&mut rx).await;
        assert_matches!(
            event.kind,
            EventKind::MessageReceived(payload) => assert_eq!(payload.id, expected_id)
        );
    }
}

#[tokio::test]
async fn no_cross_principal_leakage() {
    let hub = BroadcastHub::new();
    let publisher = EventPublisher::new(hub.clone());

    let sender = Uuid::new_v4();
    let receiver = Uuid::new_v4();
    let bystander = Uuid::new_v4();
    let mut bystander_rx = hub.subscribe(bystander);

    let message = Message::new(sender, receiver, "private".to_string());
    publisher.on_domain_write(&DomainWrite::MessageCreated(message));

    let result = timeout(Duration::from_millis(100), bystander_rx.recv()).await;
    assert!(result.is_err(), "bystander must not receive the event");
}

#[test]
fn wire_shape_is_stable() {
    let sender = Uuid::new_v4();
    let receiver = Uuid::new_v4();
    let message = Message::new(sender, receiver, "hi".to_string());

    let event = RealtimeEvent::message_received(
        receiver,
        socialite::shared::MessagePayload {
            id: message.id,
            sender_id: message.sender_id,
            receiver_id: message.receiver_id,
            content: message.content.clone(),
            read: message.read,
            created_at: message.created_at,
        },
    );

    let value = serde_json::to_value(&event.kind).unwrap();
    assert_eq!(value["type"], "message_received");
    assert_eq!(value["data"]["senderId"], sender.to_string());
    assert_eq!(value["data"]["receiverId"], receiver.to_string());
    assert_eq!(value["data"]["read"], false);
    assert!(value["data"]["createdAt"].is_string());
}
