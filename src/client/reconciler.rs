//! Unread Reconciler
//!
//! Client-side cache of the unread aggregate. Live events are applied
//! optimistically for instant display, then confirmed by an
//! authoritative fetch; the fetch result always overwrites the
//! optimistic state, never merges with it.
//!
//! Duplicate delivery is survived by event-id dedupe, refetch storms by
//! per-conversation debounce, and cross-tab races by last-writer-wins
//! adoption through the shared [`SnapshotStore`].

use std::collections::HashMap;
use std::time::{Duration, Instant};

use uuid::Uuid;

use super::snapshot::{SnapshotError, SnapshotStore};
use crate::shared::{EventKind, EventType, RealtimeEvent, UnreadSnapshot};

/// How long a seen event id is remembered for dedupe
const DEDUPE_RETENTION: Duration = Duration::from_secs(60);

/// Freshness of the displayed unread count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// A change happened that the displayed value may not reflect
    Stale,
    /// An authoritative fetch is in flight
    Reconciling,
    /// Displayed value matches the last authoritative fetch
    Fresh,
}

/// What the caller should do after feeding an event in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileAction {
    /// Start (or let run) an authoritative fetch
    Refetch,
    /// A refetch for this conversation is already pending
    Coalesced,
    /// Event was a duplicate or not relevant to this user
    Ignored,
}

/// Per-user reconciliation state machine
///
/// `Stale -> Reconciling` on a live event, an explicit user action, or
/// a poll tick. `Reconciling -> Fresh` when the authoritative fetch
/// lands. `Fresh -> Stale` on the next unseen event or on a connection
/// failure.
pub struct UnreadReconciler<S: SnapshotStore> {
    user_id: Uuid,
    store: S,
    freshness: Freshness,
    current: Option<UnreadSnapshot>,
    possibly_stale: bool,
    debounce_window: Duration,
    recent_triggers: HashMap<(EventType, Uuid), Instant>,
    seen_events: HashMap<Uuid, Instant>,
}

impl<S: SnapshotStore> UnreadReconciler<S> {
    pub fn new(user_id: Uuid, store: S, debounce_window: Duration) -> Self {
        Self {
            user_id,
            store,
            freshness: Freshness::Stale,
            current: None,
            possibly_stale: false,
            debounce_window,
            recent_triggers: HashMap::new(),
            seen_events: HashMap::new(),
        }
    }

    pub fn freshness(&self) -> Freshness {
        self.freshness
    }

    /// Non-blocking staleness indicator for the UI
    ///
    /// Set while reconciliation keeps failing; the last known value
    /// stays displayed instead of blanking out.
    pub fn possibly_stale(&self) -> bool {
        self.possibly_stale
    }

    /// The snapshot currently backing the display
    pub fn current(&self) -> Option<&UnreadSnapshot> {
        self.current.as_ref()
    }

    /// Displayed total, zero before the first snapshot
    pub fn displayed_total(&self) -> i64 {
        self.current.as_ref().map(|s| s.total).unwrap_or(0)
    }

    /// Seed the display from the shared store at startup
    ///
    /// The hydrated value is shown immediately but stays `Stale` until
    /// an authoritative fetch confirms it.
    pub async fn hydrate(&mut self) -> Result<(), SnapshotError> {
        if let Some(snapshot) = self.store.load(self.user_id).await? {
            self.current = Some(snapshot);
        }
        self.freshness = Freshness::Stale;
        Ok(())
    }

    /// Feed a live event into the cache
    ///
    /// Applies the optimistic delta and decides whether the caller
    /// should kick off an authoritative fetch. Duplicate deliveries of
    /// the same event id are dropped outright.
    pub fn on_event(&mut self, event: &RealtimeEvent, now: Instant) -> ReconcileAction {
        if event.recipient != self.user_id {
            return ReconcileAction::Ignored;
        }

        self.prune(now);

        if self.seen_events.contains_key(&event.id) {
            return ReconcileAction::Ignored;
        }

        let buddy = match &event.kind {
            EventKind::MessageReceived(payload) => {
                if payload.receiver_id == self.user_id && !payload.read {
                    self.apply_optimistic_delta(payload.sender_id, 1);
                }
                self.counterparty(payload.sender_id, payload.receiver_id)
            }
            EventKind::MessageReadStatusUpdated(payload) => {
                if payload.receiver_id == self.user_id && payload.read {
                    self.apply_optimistic_delta(payload.sender_id, -1);
                }
                self.counterparty(payload.sender_id, payload.receiver_id)
            }
            EventKind::Heartbeat => return ReconcileAction::Ignored,
        };

        self.seen_events.insert(event.id, now);

        let key = (event.kind.event_type(), buddy);
        if let Some(last) = self.recent_triggers.get(&key) {
            if now.duration_since(*last) < self.debounce_window {
                return ReconcileAction::Coalesced;
            }
        }
        self.recent_triggers.insert(key, now);

        self.freshness = Freshness::Reconciling;
        ReconcileAction::Refetch
    }

    /// Explicit trigger: user opened a conversation, or a poll fired
    pub fn begin_reconcile(&mut self) {
        self.freshness = Freshness::Reconciling;
    }

    /// Adopt the result of an authoritative fetch
    ///
    /// The newest authoritative response by server timestamp wins: a
    /// response older than the already-adopted snapshot is discarded
    /// even if it arrived last. Returns whether the snapshot was
    /// adopted.
    pub async fn adopt_authoritative(
        &mut self,
        snapshot: UnreadSnapshot,
    ) -> Result<bool, SnapshotError> {
        let adopted = match &self.current {
            Some(existing) if !existing.is_superseded_by(&snapshot) => false,
            _ => {
                self.store.persist(self.user_id, &snapshot).await?;
                self.current = Some(snapshot);
                true
            }
        };

        // Either way an authoritative response landed, so the display
        // is confirmed against the server.
        self.freshness = Freshness::Fresh;
        self.possibly_stale = false;
        Ok(adopted)
    }

    /// Adopt a snapshot another tab wrote to the shared store
    ///
    /// Last-writer-wins by timestamp, not by arrival order: an older
    /// snapshot from a slow tab never regresses the display.
    pub fn on_external_change(&mut self, snapshot: UnreadSnapshot) -> bool {
        match &self.current {
            Some(existing) if !existing.is_superseded_by(&snapshot) => false,
            _ => {
                self.current = Some(snapshot);
                true
            }
        }
    }

    /// The authoritative fetch failed
    ///
    /// Keeps the last known value on display and raises the
    /// `possibly_stale` indicator instead of blanking the count.
    pub fn on_reconcile_failure(&mut self) {
        self.freshness = Freshness::Stale;
        self.possibly_stale = true;
    }

    /// The connection supervisor gave up reconnecting
    ///
    /// Events may have been missed, so the count is stale until the
    /// next authoritative fetch.
    pub fn on_connection_errored(&mut self) {
        self.freshness = Freshness::Stale;
        self.possibly_stale = true;
    }

    fn counterparty(&self, sender_id: Uuid, receiver_id: Uuid) -> Uuid {
        if sender_id == self.user_id {
            receiver_id
        } else {
            sender_id
        }
    }

    /// Advisory delta onto the displayed value
    ///
    /// The snapshot's `computed_at` is left untouched so an optimistic
    /// bump never outranks a real authoritative snapshot in the
    /// last-writer-wins comparison.
    fn apply_optimistic_delta(&mut self, buddy_id: Uuid, delta: i64) {
        let snapshot = self.current.get_or_insert_with(UnreadSnapshot::empty);
        let entry = snapshot.by_buddy.entry(buddy_id).or_insert(0);
        *entry = (*entry + delta).max(0);
        snapshot.total = snapshot.by_buddy.values().sum();

        if self.freshness == Freshness::Fresh {
            self.freshness = Freshness::Stale;
        }
    }

    fn prune(&mut self, now: Instant) {
        self.seen_events
            .retain(|_, seen| now.duration_since(*seen) < DEDUPE_RETENTION);
        let window = self.debounce_window;
        self.recent_triggers
            .retain(|_, last| now.duration_since(*last) < window);
    }
}
