//! Server Module
//!
//! Axum server assembly: application state, optional service loading,
//! and startup wiring.

/// Optional service loading (database)
pub mod config;

/// Application construction and background tasks
pub mod init;

/// Shared application state
pub mod state;
