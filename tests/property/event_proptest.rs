//! Property-based tests for the realtime event envelope

use chrono::Utc;
use proptest::prelude::*;
use uuid::Uuid;

use socialite::shared::{EventType, MessagePayload, RealtimeEvent};

fn message_event(content: String) -> RealtimeEvent {
    let receiver = Uuid::new_v4();
    RealtimeEvent::message_received(
        receiver,
        MessagePayload {
            id: Uuid::new_v4(),
            sender_id: Uuid::new_v4(),
            receiver_id: receiver,
            content,
            read: false,
            created_at: Utc::now(),
        },
    )
}

proptest! {
    #[test]
    fn serialization_roundtrip_preserves_identity(content in ".*") {
        let event = message_event(content);
        let json = serde_json::to_string(&event).unwrap();
        let deserialized: RealtimeEvent = serde_json::from_str(&json).unwrap();

        prop_assert_eq!(&deserialized.id, &event.id);
        prop_assert_eq!(&deserialized.recipient, &event.recipient);
        prop_assert_eq!(&deserialized.kind, &event.kind);
    }

    #[test]
    fn empty_filter_passes_everything(content in ".*") {
        let event = message_event(content);
        prop_assert!(event.matches_filter(&[]));
    }

    #[test]
    fn heartbeat_passes_any_filter(
        filter in proptest::collection::vec(
            prop_oneof![
                Just(EventType::MessageReceived),
                Just(EventType::MessageReadStatusUpdated),
            ],
            0..3,
        )
    ) {
        let heartbeat = RealtimeEvent::heartbeat(Uuid::new_v4());
        prop_assert!(heartbeat.matches_filter(&filter));
    }

    #[test]
    fn parse_filter_ignores_unknown_names(garbage in "[a-z_,]*") {
        // Whatever the input, only known names survive.
        for parsed in EventType::parse_filter(&garbage) {
            prop_assert!(matches!(
                parsed,
                EventType::MessageReceived
                    | EventType::MessageReadStatusUpdated
                    | EventType::Heartbeat
            ));
        }
    }
}

#[test]
fn mismatched_filter_excludes_event() {
    let event = message_event("hello".to_string());
    assert!(!event.matches_filter(&[EventType::MessageReadStatusUpdated]));
    assert!(event.matches_filter(&[EventType::MessageReceived]));
}
