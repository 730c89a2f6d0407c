//! Messaging Module
//!
//! Direct messages between buddies: store operations, HTTP handlers,
//! and the orchestration that keeps the realtime channel and the
//! unread aggregate in step with each write.

/// Store-level message operations
pub mod db;

/// HTTP handlers
pub mod handlers;
