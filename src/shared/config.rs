//! Application configuration module
//!
//! Provides the tunable knobs shared by the backend and the client
//! tier: heartbeat cadence, reconnect backoff, send throttling, and
//! reconcile debouncing. Defaults are production values; tests shrink
//! them to keep runs fast.

use std::time::Duration;
use thiserror::Error;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Interval between heartbeat events on the realtime channel
    pub heartbeat_interval: Duration,
    /// Missed-heartbeat window after which a client treats the
    /// connection as dead
    pub heartbeat_timeout: Duration,
    /// First reconnect delay
    pub backoff_base: Duration,
    /// Upper bound on the reconnect delay
    pub backoff_cap: Duration,
    /// Reconnect attempts before the supervisor gives up
    pub backoff_max_attempts: u32,
    /// Sliding window for the send throttle
    pub throttle_window: Duration,
    /// Maximum sends per principal per resource within the window
    pub throttle_max_in_window: u32,
    /// Quiet period the client reconciler waits before fetching an
    /// authoritative unread snapshot
    pub reconcile_debounce: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            heartbeat_interval: Duration::from_secs(15),
            heartbeat_timeout: Duration::from_secs(45),
            backoff_base: Duration::from_millis(500),
            backoff_cap: Duration::from_secs(30),
            backoff_max_attempts: 10,
            throttle_window: Duration::from_secs(10),
            throttle_max_in_window: 20,
            reconcile_debounce: Duration::from_millis(750),
        }
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.heartbeat_interval.is_zero() {
            return Err(ConfigError::InvalidValue("heartbeat_interval must be > 0"));
        }
        if self.heartbeat_timeout <= self.heartbeat_interval {
            return Err(ConfigError::InvalidValue(
                "heartbeat_timeout must exceed heartbeat_interval",
            ));
        }
        if self.backoff_cap < self.backoff_base {
            return Err(ConfigError::InvalidValue(
                "backoff_cap must be >= backoff_base",
            ));
        }
        if self.throttle_max_in_window == 0 {
            return Err(ConfigError::InvalidValue(
                "throttle_max_in_window must be > 0",
            ));
        }
        Ok(())
    }
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    heartbeat_interval: Option<Duration>,
    heartbeat_timeout: Option<Duration>,
    backoff_base: Option<Duration>,
    backoff_cap: Option<Duration>,
    backoff_max_attempts: Option<u32>,
    throttle_window: Option<Duration>,
    throttle_max_in_window: Option<u32>,
    reconcile_debounce: Option<Duration>,
}

impl AppConfigBuilder {
    /// Set the heartbeat interval
    pub fn heartbeat_interval(mut self, interval: Duration) -> Self {
        self.heartbeat_interval = Some(interval);
        self
    }

    /// Set the heartbeat timeout
    pub fn heartbeat_timeout(mut self, timeout: Duration) -> Self {
        self.heartbeat_timeout = Some(timeout);
        self
    }

    /// Set the base reconnect delay
    pub fn backoff_base(mut self, base: Duration) -> Self {
        self.backoff_base = Some(base);
        self
    }

    /// Set the reconnect delay cap
    pub fn backoff_cap(mut self, cap: Duration) -> Self {
        self.backoff_cap = Some(cap);
        self
    }

    /// Set the maximum reconnect attempts
    pub fn backoff_max_attempts(mut self, attempts: u32) -> Self {
        self.backoff_max_attempts = Some(attempts);
        self
    }

    /// Set the throttle window
    pub fn throttle_window(mut self, window: Duration) -> Self {
        self.throttle_window = Some(window);
        self
    }

    /// Set the per-window send budget
    pub fn throttle_max_in_window(mut self, max: u32) -> Self {
        self.throttle_max_in_window = Some(max);
        self
    }

    /// Set the reconcile debounce window
    pub fn reconcile_debounce(mut self, debounce: Duration) -> Self {
        self.reconcile_debounce = Some(debounce);
        self
    }

    /// Build the configuration, validating the result
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let defaults = AppConfig::default();
        let config = AppConfig {
            heartbeat_interval: self.heartbeat_interval.unwrap_or(defaults.heartbeat_interval),
            heartbeat_timeout: self.heartbeat_timeout.unwrap_or(defaults.heartbeat_timeout),
            backoff_base: self.backoff_base.unwrap_or(defaults.backoff_base),
            backoff_cap: self.backoff_cap.unwrap_or(defaults.backoff_cap),
            backoff_max_attempts: self
                .backoff_max_attempts
                .unwrap_or(defaults.backoff_max_attempts),
            throttle_window: self.throttle_window.unwrap_or(defaults.throttle_window),
            throttle_max_in_window: self
                .throttle_max_in_window
                .unwrap_or(defaults.throttle_max_in_window),
            reconcile_debounce: self
                .reconcile_debounce
                .unwrap_or(defaults.reconcile_debounce),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value: {0}")]
    InvalidValue(&'static str),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_builder_overrides() {
        let config = AppConfig::builder()
            .heartbeat_interval(Duration::from_secs(5))
            .heartbeat_timeout(Duration::from_secs(20))
            .throttle_max_in_window(3)
            .build()
            .unwrap();
        assert_eq!(config.heartbeat_interval, Duration::from_secs(5));
        assert_eq!(config.throttle_max_in_window, 3);
        // Untouched fields keep their defaults
        assert_eq!(config.backoff_max_attempts, 10);
    }

    #[test]
    fn test_timeout_must_exceed_interval() {
        let result = AppConfig::builder()
            .heartbeat_interval(Duration::from_secs(30))
            .heartbeat_timeout(Duration::from_secs(10))
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_cap_below_base_rejected() {
        let result = AppConfig::builder()
            .backoff_base(Duration::from_secs(10))
            .backoff_cap(Duration::from_secs(1))
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_throttle_budget_rejected() {
        let result = AppConfig::builder().throttle_max_in_window(0).build();
        assert!(result.is_err());
    }
}
