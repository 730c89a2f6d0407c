//! Send Throttle
//!
//! Sliding-window rate limiter keyed by (principal, resource). The
//! limiter is owned state injected through `AppState` rather than a
//! process-global map, so tests can construct isolated instances and
//! the window parameters come from configuration.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Resources that can be throttled independently per principal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThrottleResource {
    /// Sending direct messages
    SendMessage,
    /// Creating buddy requests
    BuddyRequest,
}

/// Outcome of a throttle check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrottleDecision {
    /// Under budget; the attempt was recorded
    Allowed,
    /// Over budget; retry after the given delay
    Throttled { retry_after: Duration },
}

/// Sliding-window rate limiter
///
/// Each (principal, resource) key holds the timestamps of attempts
/// inside the current window. Old timestamps are pruned on every
/// check, and `sweep` drops keys that have gone fully idle so the map
/// does not grow with principal churn.
pub struct Throttle {
    window: Duration,
    max_in_window: u32,
    attempts: Mutex<HashMap<(Uuid, ThrottleResource), Vec<Instant>>>,
}

impl Throttle {
    /// Create a new throttle with the given window and budget
    pub fn new(window: Duration, max_in_window: u32) -> Self {
        Self {
            window,
            max_in_window,
            attempts: Mutex::new(HashMap::new()),
        }
    }

    /// Check and record one attempt for (principal, resource)
    pub fn check(&self, principal: Uuid, resource: ThrottleResource) -> ThrottleDecision {
        let now = Instant::now();
        let mut attempts = self.attempts.lock().unwrap_or_else(|e| e.into_inner());
        let entry = attempts.entry((principal, resource)).or_default();
        entry.retain(|t| now.duration_since(*t) < self.window);

        if entry.len() >= self.max_in_window as usize {
            // The oldest attempt in the window decides when a slot frees up
            let retry_after = entry
                .first()
                .map(|oldest| self.window.saturating_sub(now.duration_since(*oldest)))
                .unwrap_or(self.window);
            tracing::debug!(
                %principal,
                ?resource,
                in_window = entry.len(),
                "send throttled"
            );
            return ThrottleDecision::Throttled { retry_after };
        }

        entry.push(now);
        ThrottleDecision::Allowed
    }

    /// Drop keys whose every attempt has aged out of the window
    pub fn sweep(&self) {
        let now = Instant::now();
        let mut attempts = self.attempts.lock().unwrap_or_else(|e| e.into_inner());
        let before = attempts.len();
        attempts.retain(|_, entry| {
            entry.retain(|t| now.duration_since(*t) < self.window);
            !entry.is_empty()
        });
        let removed = before - attempts.len();
        if removed > 0 {
            tracing::debug!(removed, "swept idle throttle keys");
        }
    }

    /// Number of live keys, for tests and diagnostics
    pub fn tracked_keys(&self) -> usize {
        self.attempts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }
}
