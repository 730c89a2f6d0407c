//! End-to-end store scenarios
//!
//! These exercise the full write path against a real PostgreSQL
//! database: store commit, event publication, and unread bookkeeping.
//! They are `#[ignore]`d so the default run passes without a database;
//! run with `cargo test -- --ignored` and a DATABASE_URL.

use serial_test::serial;
use uuid::Uuid;

use socialite::backend::messaging::db as messaging_db;
use socialite::backend::notifications::db as notifications_db;
use socialite::backend::realtime::{BroadcastHub, DomainWrite, EventPublisher};
use socialite::backend::social::db as social_db;
use socialite::backend::unread::UnreadEngine;
use socialite::shared::{EventKind, Notification, NotificationTrigger};

use crate::common::TestDatabase;

async fn make_buddies(db: &TestDatabase, a: Uuid, b: Uuid) {
    let request = social_db::create_buddy_request(db.pool(), a, b)
        .await
        .expect("create request");
    social_db::respond_to_request(db.pool(), request.id, true)
        .await
        .expect("respond")
        .expect("request was pending");
}

#[tokio::test]
#[serial]
#[ignore]
async fn scenario_send_message_bumps_receiver_unread() {
    let db = TestDatabase::new().await;
    db.cleanup().await.unwrap();

    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();
    make_buddies(&db, alice, bob).await;

    let engine = UnreadEngine::new();
    let message = messaging_db::create_message(db.pool(), alice, bob, "hi bob")
        .await
        .expect("create message");

    let snapshot = engine.recompute(db.pool(), bob).await.expect("recompute");
    assert_eq!(snapshot.total, 1);
    assert_eq!(snapshot.for_buddy(alice), 1);

    let transcript = messaging_db::get_transcript(db.pool(), bob, alice, 50, 0)
        .await
        .expect("transcript");
    assert_eq!(transcript.len(), 1);
    assert_eq!(transcript[0].id, message.id);

    // The sender sees no unread from its own message.
    let sender_snapshot = engine.recompute(db.pool(), alice).await.expect("recompute");
    assert_eq!(sender_snapshot.total, 0);

    db.cleanup().await.unwrap();
}

#[tokio::test]
#[serial]
#[ignore]
async fn scenario_mark_read_is_atomic_and_idempotent() {
    let db = TestDatabase::new().await;
    db.cleanup().await.unwrap();

    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();
    make_buddies(&db, alice, bob).await;

    for i in 0..3 {
        messaging_db::create_message(db.pool(), alice, bob, &format!("m{}", i))
            .await
            .expect("create message");
    }

    let hub = BroadcastHub::new();
    let publisher = EventPublisher::new(hub.clone());
    let mut alice_rx = hub.subscribe(alice);

    let updated = messaging_db::bulk_mark_read(db.pool(), bob, alice)
        .await
        .expect("mark read");
    assert_eq!(updated.len(), 3);
    publisher.on_domain_write(&DomainWrite::MessagesMarkedRead(updated));

    // One read event per affected message, addressed to the sender too.
    for _ in 0..3 {
        let event = alice_rx.recv().await.expect("event");
        assert!(matches!(event.kind, EventKind::MessageReadStatusUpdated(_)));
    }

    // Second call finds nothing newly unread; a no-op, not an error.
    let again = messaging_db::bulk_mark_read(db.pool(), bob, alice)
        .await
        .expect("mark read again");
    assert!(again.is_empty());

    let engine = UnreadEngine::new();
    let snapshot = engine.recompute(db.pool(), bob).await.expect("recompute");
    assert_eq!(snapshot.total, 0);

    db.cleanup().await.unwrap();
}

#[tokio::test]
#[serial]
#[ignore]
async fn scenario_notification_created_once_per_trigger() {
    let db = TestDatabase::new().await;
    db.cleanup().await.unwrap();

    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();
    let request = social_db::create_buddy_request(db.pool(), alice, bob)
        .await
        .expect("create request");

    let trigger = NotificationTrigger::BuddyRequest {
        request_id: request.id,
        actor_id: alice,
    };

    let first = notifications_db::create_notification(db.pool(), &Notification::new(bob, trigger.clone()))
        .await
        .expect("first insert");
    assert!(first.is_some());

    // A write-path retry with a fresh notification id still maps to the
    // same trigger entity and must not create a second row.
    let second = notifications_db::create_notification(db.pool(), &Notification::new(bob, trigger))
        .await
        .expect("second insert");
    assert!(second.is_none());

    let listed = notifications_db::list_for_owner(db.pool(), bob, 100)
        .await
        .expect("list");
    assert_eq!(listed.len(), 1);

    db.cleanup().await.unwrap();
}

#[tokio::test]
#[serial]
#[ignore]
async fn scenario_only_buddies_can_message() {
    let db = TestDatabase::new().await;
    db.cleanup().await.unwrap();

    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();

    assert!(!messaging_db::are_buddies(db.pool(), alice, bob)
        .await
        .expect("are_buddies"));

    let request = social_db::create_buddy_request(db.pool(), alice, bob)
        .await
        .expect("create request");

    // Pending is not buddies yet.
    assert!(!messaging_db::are_buddies(db.pool(), alice, bob)
        .await
        .expect("are_buddies"));

    social_db::respond_to_request(db.pool(), request.id, true)
        .await
        .expect("respond")
        .expect("was pending");

    // The accepted row is the edge, in both directions.
    assert!(messaging_db::are_buddies(db.pool(), alice, bob)
        .await
        .expect("are_buddies"));
    assert!(messaging_db::are_buddies(db.pool(), bob, alice)
        .await
        .expect("are_buddies"));

    // Responding twice is rejected.
    let again = social_db::respond_to_request(db.pool(), request.id, false)
        .await
        .expect("respond again");
    assert!(again.is_none());

    db.cleanup().await.unwrap();
}

#[tokio::test]
#[serial]
#[ignore]
async fn scenario_notification_mark_read_is_owner_scoped() {
    let db = TestDatabase::new().await;
    db.cleanup().await.unwrap();

    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();
    let request = social_db::create_buddy_request(db.pool(), alice, bob)
        .await
        .expect("create request");

    let trigger = NotificationTrigger::BuddyRequest {
        request_id: request.id,
        actor_id: alice,
    };
    let created = notifications_db::create_notification(db.pool(), &Notification::new(bob, trigger))
        .await
        .expect("insert")
        .expect("created");

    // Alice cannot flip Bob's notification by guessing its id.
    let stolen = notifications_db::mark_read(db.pool(), alice, &[created.id])
        .await
        .expect("mark read");
    assert_eq!(stolen, 0);

    // An empty id list marks everything the owner has.
    let marked = notifications_db::mark_read(db.pool(), bob, &[])
        .await
        .expect("mark read");
    assert_eq!(marked, 1);

    db.cleanup().await.unwrap();
}
