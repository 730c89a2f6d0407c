//! Property-based tests for the reconnect state machine

use std::time::Duration;

use proptest::prelude::*;

use socialite::client::{ConnectionPhase, ConnectionSupervisor, SupervisorDirective};

const HEARTBEAT_TIMEOUT: Duration = Duration::from_secs(45);

proptest! {
    /// Every scheduled delay sits between the capped exponential value
    /// and that value plus the jitter ceiling.
    #[test]
    fn reconnect_delay_stays_within_jitter_bounds(
        base_ms in 1u64..1_000,
        cap_ms in 1_000u64..60_000,
        failures in 1u32..10,
    ) {
        let base = Duration::from_millis(base_ms);
        let cap = Duration::from_millis(cap_ms);
        let mut sup = ConnectionSupervisor::new(base, cap, 20, HEARTBEAT_TIMEOUT);

        for attempt in 1..=failures {
            let delay = match sup.on_disconnect() {
                SupervisorDirective::Reconnect { delay } => delay,
                other => return Err(TestCaseError::fail(format!("unexpected {:?}", other))),
            };

            let expected = base
                .saturating_mul(2u32.saturating_pow(attempt - 1))
                .min(cap);
            let jitter_ceiling = Duration::from_millis(expected.as_millis() as u64 / 10);

            prop_assert!(delay >= expected, "delay {:?} below {:?}", delay, expected);
            prop_assert!(
                delay <= expected + jitter_ceiling,
                "delay {:?} above {:?} + jitter",
                delay,
                expected
            );
        }
    }

    /// The supervisor hands out exactly `max_attempts` reconnects and
    /// gives up on the disconnect after that.
    #[test]
    fn gives_up_exactly_when_budget_is_spent(max_attempts in 0u32..20) {
        let mut sup = ConnectionSupervisor::new(
            Duration::from_millis(100),
            Duration::from_secs(5),
            max_attempts,
            HEARTBEAT_TIMEOUT,
        );

        for attempt in 1..=max_attempts {
            let is_reconnect = matches!(
                sup.on_disconnect(),
                SupervisorDirective::Reconnect { .. }
            );
            prop_assert!(is_reconnect);
            prop_assert_eq!(sup.phase(), ConnectionPhase::Backoff { attempt });
        }

        prop_assert_eq!(sup.on_disconnect(), SupervisorDirective::GiveUp);
        prop_assert!(sup.is_errored());

        // Errored is sticky across further disconnects.
        prop_assert_eq!(sup.on_disconnect(), SupervisorDirective::GiveUp);
        prop_assert!(sup.is_errored());
    }

    /// A successful connect wipes the failure streak, so the next
    /// failure backs off from the base delay again.
    #[test]
    fn connect_resets_backoff_to_base(failures in 1u32..8) {
        let base = Duration::from_millis(200);
        let mut sup = ConnectionSupervisor::new(
            base,
            Duration::from_secs(10),
            20,
            HEARTBEAT_TIMEOUT,
        );

        for _ in 0..failures {
            sup.on_disconnect();
        }
        sup.on_connected(std::time::Instant::now());

        let delay = match sup.on_disconnect() {
            SupervisorDirective::Reconnect { delay } => delay,
            other => return Err(TestCaseError::fail(format!("unexpected {:?}", other))),
        };
        let jitter_ceiling = Duration::from_millis(base.as_millis() as u64 / 10);
        prop_assert!(delay >= base);
        prop_assert!(delay <= base + jitter_ceiling);
    }
}
