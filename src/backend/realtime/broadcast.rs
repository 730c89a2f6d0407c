/**
 * Real-time Event Broadcasting
 *
 * This module provides the per-principal broadcast hub. Each principal
 * with at least one live subscription owns a `tokio::sync::broadcast`
 * channel; events addressed to that principal are fanned out to every
 * subscriber of the channel in publish order.
 *
 * # Delivery Semantics
 *
 * - FIFO per principal: events for one recipient arrive in the order
 *   they were published. No cross-principal ordering is guaranteed.
 * - At-least-once: a lagged receiver skips events rather than blocking
 *   the publisher; consumers recover by authoritative resync.
 * - No durable backlog: events published while a principal has no live
 *   subscriber are dropped.
 */

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::broadcast;
use uuid::Uuid;

use crate::shared::RealtimeEvent;

/// Per-channel buffer size. A receiver that falls more than this many
/// events behind observes `RecvError::Lagged` and resyncs.
const CHANNEL_CAPACITY: usize = 256;

/// Broadcast hub with one channel per subscribed principal
///
/// Cloning is cheap; all clones share the same channel map.
#[derive(Clone)]
pub struct BroadcastHub {
    channels: Arc<Mutex<HashMap<Uuid, broadcast::Sender<RealtimeEvent>>>>,
}

impl BroadcastHub {
    pub fn new() -> Self {
        Self {
            channels: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Subscribe to events addressed to `principal`
    ///
    /// Creates the principal's channel on first use. Dropping the
    /// returned receiver is the unsubscribe; once the last receiver is
    /// gone the channel is reclaimed by `cleanup_inactive_channels`.
    pub fn subscribe(&self, principal: Uuid) -> broadcast::Receiver<RealtimeEvent> {
        let mut channels = self.channels.lock().unwrap_or_else(|e| e.into_inner());
        channels
            .entry(principal)
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0)
            .subscribe()
    }

    /// Publish an event to its recipient's channel
    ///
    /// Returns the number of subscribers that received the event. Zero
    /// subscribers is not an error; the event is simply dropped and the
    /// recipient converges via resync on its next connect.
    pub fn publish(&self, event: RealtimeEvent) -> usize {
        let sender = {
            let channels = self.channels.lock().unwrap_or_else(|e| e.into_inner());
            channels.get(&event.recipient).cloned()
        };

        match sender {
            Some(tx) => match tx.send(event) {
                Ok(subscriber_count) => {
                    tracing::debug!(subscriber_count, "event delivered");
                    subscriber_count
                }
                Err(_) => {
                    tracing::debug!("no live subscribers, event dropped");
                    0
                }
            },
            None => {
                tracing::debug!("no channel for recipient, event dropped");
                0
            }
        }
    }

    /// Clean up channels with no remaining subscribers
    pub fn cleanup_inactive_channels(&self) {
        let mut channels = self.channels.lock().unwrap_or_else(|e| e.into_inner());
        let before = channels.len();
        channels.retain(|_, sender| sender.receiver_count() > 0);
        let removed = before - channels.len();
        if removed > 0 {
            tracing::debug!(removed, "reclaimed inactive broadcast channels");
        }
    }

    /// Subscriber count for a principal (for tests and diagnostics)
    pub fn subscriber_count(&self, principal: Uuid) -> usize {
        let channels = self.channels.lock().unwrap_or_else(|e| e.into_inner());
        channels
            .get(&principal)
            .map(|sender| sender.receiver_count())
            .unwrap_or(0)
    }

    /// Number of principals with a live channel
    pub fn active_channels(&self) -> usize {
        self.channels
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }

    /// Send a heartbeat to every active channel
    ///
    /// Heartbeats bypass type filters so every subscriber observes
    /// liveness; a client that misses enough of them treats the
    /// connection as dead and reconnects.
    pub fn heartbeat_all(&self) {
        let senders: Vec<(Uuid, broadcast::Sender<RealtimeEvent>)> = {
            let channels = self.channels.lock().unwrap_or_else(|e| e.into_inner());
            channels.iter().map(|(k, v)| (*k, v.clone())).collect()
        };
        for (principal, tx) in senders {
            let _ = tx.send(RealtimeEvent::heartbeat(principal));
        }
    }

    /// Spawn the background ticker that heartbeats all channels and
    /// sweeps inactive ones
    pub fn spawn_heartbeat(&self, interval: Duration) -> tokio::task::JoinHandle<()> {
        let hub = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                hub.heartbeat_all();
                hub.cleanup_inactive_channels();
            }
        })
    }
}

impl Default for BroadcastHub {
    fn default() -> Self {
        Self::new()
    }
}
