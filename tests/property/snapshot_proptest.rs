//! Property-based tests for unread snapshots and last-writer-wins adoption

use std::collections::HashMap;
use std::time::Duration;

use chrono::{Duration as ChronoDuration, Utc};
use proptest::prelude::*;
use uuid::Uuid;

use socialite::client::{MemorySnapshotStore, UnreadReconciler};
use socialite::shared::UnreadSnapshot;

fn breakdown_strategy() -> impl Strategy<Value = Vec<(u128, i64)>> {
    proptest::collection::vec((any::<u128>(), 0i64..1_000), 0..16)
}

proptest! {
    #[test]
    fn from_breakdown_is_always_internally_consistent(entries in breakdown_strategy()) {
        let mut by_buddy = HashMap::new();
        for (raw, count) in entries {
            // Colliding ids just overwrite, which is fine for the property.
            by_buddy.insert(Uuid::from_u128(raw), count);
        }
        let expected_total: i64 = by_buddy.values().sum();

        let snapshot = UnreadSnapshot::from_breakdown(by_buddy, Utc::now());

        prop_assert!(snapshot.is_internally_consistent());
        prop_assert_eq!(snapshot.total, expected_total);
    }

    #[test]
    fn unknown_buddy_reads_as_zero(entries in breakdown_strategy(), probe in any::<u128>()) {
        let mut by_buddy = HashMap::new();
        for (raw, count) in entries {
            by_buddy.insert(Uuid::from_u128(raw), count);
        }
        let snapshot = UnreadSnapshot::from_breakdown(by_buddy.clone(), Utc::now());

        let probe_id = Uuid::from_u128(probe);
        let expected = by_buddy.get(&probe_id).copied().unwrap_or(0);
        prop_assert_eq!(snapshot.for_buddy(probe_id), expected);
    }

    /// Cross-tab adoption converges on the newest snapshot no matter the
    /// order the writes arrive in.
    #[test]
    fn external_adoption_is_order_independent(
        (counts, order) in proptest::collection::vec(0i64..100, 1..6)
            .prop_flat_map(|counts| {
                let indices: Vec<usize> = (0..counts.len()).collect();
                (Just(counts), Just(indices).prop_shuffle())
            })
    ) {
        let user = Uuid::new_v4();
        let buddy = Uuid::new_v4();
        let base = Utc::now();

        // Distinct timestamps, one per count, newest carries the last count.
        let snapshots: Vec<UnreadSnapshot> = counts
            .iter()
            .enumerate()
            .map(|(i, &count)| {
                let mut by_buddy = HashMap::new();
                by_buddy.insert(buddy, count);
                UnreadSnapshot::from_breakdown(
                    by_buddy,
                    base + ChronoDuration::seconds(i as i64),
                )
            })
            .collect();

        let mut rec = UnreadReconciler::new(
            user,
            MemorySnapshotStore::new(),
            Duration::from_millis(750),
        );
        for &i in &order {
            rec.on_external_change(snapshots[i].clone());
        }

        let newest = counts[counts.len() - 1];
        prop_assert_eq!(rec.displayed_total(), newest);
    }

    #[test]
    fn snapshot_never_supersedes_itself(entries in breakdown_strategy()) {
        let mut by_buddy = HashMap::new();
        for (raw, count) in entries {
            by_buddy.insert(Uuid::from_u128(raw), count);
        }
        let snapshot = UnreadSnapshot::from_breakdown(by_buddy, Utc::now());

        prop_assert!(!snapshot.is_superseded_by(&snapshot));
    }
}
