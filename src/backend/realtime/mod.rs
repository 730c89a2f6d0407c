//! Real-time Delivery Module
//!
//! Event fan-out from committed domain writes to live subscribers:
//!
//! - **`broadcast`** - per-principal broadcast hub (FIFO per recipient,
//!   at-least-once, no durable backlog)
//! - **`publisher`** - turns domain writes into typed events, publish
//!   strictly after commit
//! - **`subscription`** - authenticated SSE endpoint with type filtering

/// Per-principal broadcast hub
pub mod broadcast;

/// Domain-write to event translation
pub mod publisher;

/// SSE subscription endpoint
pub mod subscription;

pub use broadcast::BroadcastHub;
pub use publisher::{DomainWrite, EventPublisher};
