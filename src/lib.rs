//! Socialite
//!
//! Real-time messaging and notification core of a social-networking
//! backend: direct messages between buddies, per-user unread-count
//! aggregates, poll-only notifications, and live event delivery over a
//! per-principal broadcast channel.
//!
//! Provides:
//! - Direct messaging between mutually-accepted buddies
//! - At-least-once, per-principal FIFO event delivery (SSE transport)
//! - Derived unread-count aggregates with authoritative recompute
//! - A client-tier reconciliation layer that survives reconnects,
//!   duplicate tabs, and out-of-order responses
//!
//! # Tiers
//!
//! - **`shared`** - Types shared between the server and client tiers
//!   - Domain records (messages, buddy requests, notifications)
//!   - Real-time event envelope and payloads
//!   - Unread snapshot, API request/response types, error types
//!
//! - **`backend`** - Server-side code
//!   - Axum HTTP server with SSE subscription endpoint
//!   - Domain store operations (PostgreSQL via sqlx)
//!   - Broadcast hub, event publisher, unread aggregate engine
//!   - Principal resolution, throttling, error types
//!
//! - **`client`** - Client-tier reconciliation library
//!   - Connection supervisor (reconnect backoff, heartbeat tracking)
//!   - Durable cross-tab snapshot store (SQLite)
//!   - Unread reconciler state machine
//!
//! # Usage
//!
//! ## Server-Side
//!
//! ```rust,no_run
//! use socialite::backend::server::init::create_app;
//!
//! # async fn example() {
//! let app = create_app().await;
//! # let _ = app;
//! # }
//! ```
//!
//! ## Client-Side
//!
//! ```rust,no_run
//! use socialite::client::reconciler::UnreadReconciler;
//! use socialite::client::snapshot::MemorySnapshotStore;
//! ```
//!
//! # Delivery Semantics
//!
//! Event delivery is at-least-once, FIFO per recipient, with no durable
//! backlog across reconnects. The unread aggregate cache is advisory;
//! the authoritative value is always a direct recompute against the
//! message table, and every consumer reconciles toward it.

pub mod backend;
pub mod client;
pub mod shared;
