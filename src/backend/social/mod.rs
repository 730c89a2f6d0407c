//! Social Module
//!
//! Buddy requests and the buddy relationship. An accepted request is
//! the symmetric edge that authorizes direct messaging.

/// Store-level buddy request operations
pub mod db;

/// HTTP handlers
pub mod handlers;
