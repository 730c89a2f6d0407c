//! Connection Supervisor
//!
//! One owned state machine per realtime subscription. Every transport
//! outcome (connect, heartbeat, failure) flows through it, so there is
//! exactly one place that decides whether to reconnect, how long to
//! wait, and when to give up.
//!
//! Heartbeats are application-level: intermediary proxies can drop an
//! idle connection without closing it, so a socket that looks open but
//! has missed heartbeats past the timeout is treated as disconnected.

use std::time::{Duration, Instant};

/// Connection lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionPhase {
    /// Dialing the transport
    Connecting,
    /// Transport is up and heartbeats are current
    Connected,
    /// Waiting out a backoff delay before the next attempt
    Backoff {
        /// Consecutive failed attempts so far
        attempt: u32,
    },
    /// Retry budget exhausted; unread data may be stale
    Errored,
}

/// What the subscription loop should do next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupervisorDirective {
    /// Reconnect after the given delay
    Reconnect {
        /// Time to wait before dialing again
        delay: Duration,
    },
    /// Stop retrying and surface the errored state
    GiveUp,
}

/// Reconnect state machine for a single subscription
///
/// `Connecting -> Connected` on success, `-> Backoff(n)` on failure
/// with exponential delay, `-> Errored` once the attempt budget is
/// spent. `Errored` is sticky until [`ConnectionSupervisor::reset`].
#[derive(Debug)]
pub struct ConnectionSupervisor {
    phase: ConnectionPhase,
    attempts: u32,
    backoff_base: Duration,
    backoff_cap: Duration,
    max_attempts: u32,
    heartbeat_timeout: Duration,
    last_heartbeat: Option<Instant>,
}

impl ConnectionSupervisor {
    pub fn new(
        backoff_base: Duration,
        backoff_cap: Duration,
        max_attempts: u32,
        heartbeat_timeout: Duration,
    ) -> Self {
        Self {
            phase: ConnectionPhase::Connecting,
            attempts: 0,
            backoff_base,
            backoff_cap,
            max_attempts,
            heartbeat_timeout,
            last_heartbeat: None,
        }
    }

    /// Current phase
    pub fn phase(&self) -> ConnectionPhase {
        self.phase
    }

    /// True once the retry budget is spent
    ///
    /// Callers must treat this as "unread data may be stale" and
    /// trigger an authoritative resync.
    pub fn is_errored(&self) -> bool {
        self.phase == ConnectionPhase::Errored
    }

    /// Transport established; clears the failure streak
    pub fn on_connected(&mut self, now: Instant) {
        self.phase = ConnectionPhase::Connected;
        self.attempts = 0;
        self.last_heartbeat = Some(now);
    }

    /// Application heartbeat observed
    pub fn on_heartbeat(&mut self, now: Instant) {
        if self.phase == ConnectionPhase::Connected {
            self.last_heartbeat = Some(now);
        }
    }

    /// Whether heartbeats have gone silent past the timeout
    ///
    /// A silent-but-open transport counts as a disconnect; the caller
    /// should tear it down and feed the result into [`Self::on_disconnect`].
    pub fn heartbeat_expired(&self, now: Instant) -> bool {
        match (self.phase, self.last_heartbeat) {
            (ConnectionPhase::Connected, Some(last)) => {
                now.duration_since(last) > self.heartbeat_timeout
            }
            _ => false,
        }
    }

    /// Transport failed or was torn down; decide the next move
    pub fn on_disconnect(&mut self) -> SupervisorDirective {
        self.last_heartbeat = None;
        self.attempts += 1;

        if self.attempts > self.max_attempts {
            self.phase = ConnectionPhase::Errored;
            tracing::warn!(
                attempts = self.attempts - 1,
                "reconnect budget exhausted, entering errored state"
            );
            return SupervisorDirective::GiveUp;
        }

        let delay = self.backoff_delay(self.attempts);
        self.phase = ConnectionPhase::Backoff {
            attempt: self.attempts,
        };
        tracing::debug!(attempt = self.attempts, ?delay, "scheduling reconnect");
        SupervisorDirective::Reconnect { delay }
    }

    /// Backoff delay is about to elapse; the loop dials again
    pub fn on_reconnecting(&mut self) {
        self.phase = ConnectionPhase::Connecting;
    }

    /// Forget the failure history, e.g. after a user-driven retry
    pub fn reset(&mut self) {
        self.phase = ConnectionPhase::Connecting;
        self.attempts = 0;
        self.last_heartbeat = None;
    }

    /// Exponential delay with jitter, capped at the ceiling
    fn backoff_delay(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(31);
        let exponential = self
            .backoff_base
            .saturating_mul(2u32.saturating_pow(exponent));
        let capped = exponential.min(self.backoff_cap);

        // Jitter spreads simultaneous reconnects from many clients.
        let jitter_ceiling = (capped.as_millis() as u64) / 10;
        let jitter = if jitter_ceiling > 0 {
            Duration::from_millis(rand::random::<u64>() % jitter_ceiling)
        } else {
            Duration::ZERO
        };

        capped + jitter
    }
}
