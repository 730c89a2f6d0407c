/**
 * Unread Aggregate Engine
 *
 * Maintains the per-user unread-message aggregate: total and
 * per-counterparty breakdown. The aggregate is a cache. The source of
 * truth is always the message table's read flags, reached through
 * `recompute`; incremental deltas are advisory and any drift is
 * repaired by `reconcile` overwriting the cache with the recomputed
 * value.
 *
 * # Concurrency
 *
 * Deltas are commutative and associative, so concurrent appliers never
 * serialize on a write lock: the hot path takes the map read lock and
 * bumps an atomic counter. The write lock is only taken to insert a
 * counter that does not exist yet.
 */

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use sqlx::{PgPool, Row};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::shared::UnreadSnapshot;

type CounterMap = HashMap<Uuid, HashMap<Uuid, AtomicI64>>;

/// Derived unread-count cache with authoritative recompute
#[derive(Clone)]
pub struct UnreadEngine {
    cache: Arc<RwLock<CounterMap>>,
}

impl UnreadEngine {
    pub fn new() -> Self {
        Self {
            cache: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Authoritative unread counts for `user_id`, grouped by sender
    ///
    /// Read-committed: reflects the store's committed state at the
    /// instant of the query, nothing more.
    pub async fn recompute(
        &self,
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<UnreadSnapshot, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT sender_id, COUNT(*) AS unread
            FROM messages
            WHERE receiver_id = $1 AND read = FALSE
            GROUP BY sender_id
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        let by_buddy: HashMap<Uuid, i64> = rows
            .into_iter()
            .map(|row| (row.get("sender_id"), row.get::<i64, _>("unread")))
            .collect();

        Ok(UnreadSnapshot::from_breakdown(by_buddy, Utc::now()))
    }

    /// Apply an advisory delta for (user, counterparty)
    ///
    /// Increment on message arrival, decrement on read. Never blocks
    /// other appliers once the counter exists.
    pub async fn apply_delta(&self, user_id: Uuid, counterparty_id: Uuid, delta: i64) {
        {
            let cache = self.cache.read().await;
            if let Some(counters) = cache.get(&user_id) {
                if let Some(counter) = counters.get(&counterparty_id) {
                    counter.fetch_add(delta, Ordering::Relaxed);
                    return;
                }
            }
        }

        let mut cache = self.cache.write().await;
        cache
            .entry(user_id)
            .or_default()
            .entry(counterparty_id)
            .or_insert_with(|| AtomicI64::new(0))
            .fetch_add(delta, Ordering::Relaxed);
    }

    /// The advisory snapshot for `user_id`, if one is cached
    ///
    /// Counters can transiently go negative under racing deltas; they
    /// are clamped to zero when served. Absence means the engine has
    /// never seen this user since startup.
    pub async fn cached_snapshot(&self, user_id: Uuid) -> Option<UnreadSnapshot> {
        let cache = self.cache.read().await;
        let counters = cache.get(&user_id)?;
        let by_buddy: HashMap<Uuid, i64> = counters
            .iter()
            .map(|(buddy, counter)| (*buddy, counter.load(Ordering::Relaxed).max(0)))
            .filter(|(_, count)| *count > 0)
            .collect();
        Some(UnreadSnapshot::from_breakdown(by_buddy, Utc::now()))
    }

    /// Recompute, detect drift, and overwrite the cache
    ///
    /// Drift is logged at WARN and repaired silently; it is never a
    /// caller-visible error. Returns the authoritative snapshot.
    pub async fn reconcile(
        &self,
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<UnreadSnapshot, sqlx::Error> {
        let authoritative = self.recompute(pool, user_id).await?;

        if let Some(cached) = self.cached_snapshot(user_id).await {
            if cached.total != authoritative.total || cached.by_buddy != authoritative.by_buddy {
                tracing::warn!(
                    %user_id,
                    cached_total = cached.total,
                    authoritative_total = authoritative.total,
                    "unread aggregate drift detected, overwriting cache"
                );
            }
        }

        self.overwrite(user_id, &authoritative).await;
        Ok(authoritative)
    }

    /// Replace the cached counters for `user_id` with a snapshot
    pub async fn overwrite(&self, user_id: Uuid, snapshot: &UnreadSnapshot) {
        let counters: HashMap<Uuid, AtomicI64> = snapshot
            .by_buddy
            .iter()
            .map(|(buddy, count)| (*buddy, AtomicI64::new(*count)))
            .collect();
        let mut cache = self.cache.write().await;
        cache.insert(user_id, counters);
    }

    /// Zero the advisory counter for (user, counterparty)
    ///
    /// Used after a bulk mark-read so the cache converges immediately
    /// instead of waiting for the next reconcile.
    pub async fn clear_counterparty(&self, user_id: Uuid, counterparty_id: Uuid) {
        let cache = self.cache.read().await;
        if let Some(counters) = cache.get(&user_id) {
            if let Some(counter) = counters.get(&counterparty_id) {
                counter.store(0, Ordering::Relaxed);
            }
        }
    }
}

impl Default for UnreadEngine {
    fn default() -> Self {
        Self::new()
    }
}
