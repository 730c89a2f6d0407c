//! Notifications Module
//!
//! Poll-only notifications created exactly once per triggering entity.

/// Store-level notification operations
pub mod db;

/// HTTP handlers
pub mod handlers;
