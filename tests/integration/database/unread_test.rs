//! Unread aggregate tests against the real store
//!
//! The cached value is advisory; these tests pin down that recompute
//! is the correctness source and that drift resolves toward it.

use serial_test::serial;
use uuid::Uuid;

use socialite::backend::messaging::db as messaging_db;
use socialite::backend::social::db as social_db;
use socialite::backend::unread::UnreadEngine;

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
async fn recompute_matches_unread_rows() {
    let db = TestDatabase::new().await;
    db.cleanup().await.unwrap();

    let user = Uuid::new_v4();
    let buddy_a = Uuid::new_v4();
    let buddy_b = Uuid::new_v4();
    make_buddies(&db, buddy_a, user).await;
    make_buddies(&db, buddy_b, user).await;

    for _ in 0..2 {
        messaging_db::create_message(db.pool(), buddy_a, user, "from a")
            .await
            .expect("create");
    }
    messaging_db::create_message(db.pool(), buddy_b, user, "from b")
        .await
        .expect("create");

    let engine = UnreadEngine::new();
    let snapshot = engine.recompute(db.pool(), user).await.expect("recompute");

    assert_eq!(snapshot.total, 3);
    assert_eq!(snapshot.for_buddy(buddy_a), 2);
    assert_eq!(snapshot.for_buddy(buddy_b), 1);
    assert!(snapshot.is_internally_consistent());

    db.cleanup().await.unwrap();
}

#[tokio::test]
#[serial]
#[ignore]
async fn reconcile_overwrites_drifted_cache() {
    let db = TestDatabase::new().await;
    db.cleanup().await.unwrap();

    let user = Uuid::new_v4();
    let buddy = Uuid::new_v4();
    make_buddies(&db, buddy, user).await;

    messaging_db::create_message(db.pool(), buddy, user, "only one")
        .await
        .expect("create");

    let engine = UnreadEngine::new();
    engine.reconcile(db.pool(), user).await.expect("seed cache");

    // Inject drift: deltas the store never saw.
    engine.apply_delta(user, buddy, 5).await;
    let drifted = engine.cached_snapshot(user).await.expect("cached");
    assert_eq!(drifted.for_buddy(buddy), 6);

    // Reconcile trusts the store and repairs the cache.
    let repaired = engine.reconcile(db.pool(), user).await.expect("reconcile");
    assert_eq!(repaired.total, 1);
    assert_eq!(repaired.for_buddy(buddy), 1);

    let cached = engine.cached_snapshot(user).await.expect("cached");
    assert_eq!(cached.total, 1);

    db.cleanup().await.unwrap();
}
