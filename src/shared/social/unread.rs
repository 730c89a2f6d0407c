//! Unread Snapshot
//!
//! The derived unread-count aggregate as exchanged between the backend
//! and the client tier. A snapshot is a cache of the Message table's
//! read flags at one instant; the authoritative value is always a
//! direct recompute, and snapshots carry a timestamp so consumers can
//! apply last-writer-wins when they disagree.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Per-user unread counts at one instant
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UnreadSnapshot {
    /// Total unread messages across all buddies
    pub total: i64,
    /// Unread count per sending buddy; senders with zero unread are
    /// omitted
    pub by_buddy: HashMap<Uuid, i64>,
    /// When this snapshot was computed. Ordering between snapshots is
    /// decided by this field, not by arrival order.
    pub computed_at: DateTime<Utc>,
}

impl UnreadSnapshot {
    /// An empty snapshot stamped now
    pub fn empty() -> Self {
        Self {
            total: 0,
            by_buddy: HashMap::new(),
            computed_at: Utc::now(),
        }
    }

    /// Build a snapshot from a per-buddy breakdown, deriving the total
    pub fn from_breakdown(by_buddy: HashMap<Uuid, i64>, computed_at: DateTime<Utc>) -> Self {
        let total = by_buddy.values().sum();
        Self {
            total,
            by_buddy,
            computed_at,
        }
    }

    /// Whether the cached total matches the sum of the breakdown
    pub fn is_internally_consistent(&self) -> bool {
        self.total == self.by_buddy.values().sum::<i64>()
    }

    /// Whether `other` should replace this snapshot under
    /// last-writer-wins by computed-at timestamp
    pub fn is_superseded_by(&self, other: &UnreadSnapshot) -> bool {
        other.computed_at > self.computed_at
    }

    /// Unread count for one buddy; zero when absent
    pub fn for_buddy(&self, buddy_id: Uuid) -> i64 {
        self.by_buddy.get(&buddy_id).copied().unwrap_or(0)
    }
}

/// Response for the authoritative unread fetch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnreadResponse {
    pub snapshot: UnreadSnapshot,
}
