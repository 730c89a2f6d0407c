//! Client Module
//!
//! Consumer-side reconciliation library. The display layer feeds live
//! events, fetch results, and connection outcomes into these types and
//! renders whatever they say; nothing here touches a UI toolkit.
//!
//! # Components
//!
//! - [`supervisor::ConnectionSupervisor`]: owned reconnect state
//!   machine with exponential backoff and heartbeat timeout
//! - [`snapshot::SnapshotStore`]: durable unread snapshot shared by
//!   all of a user's tabs, last-writer-wins by timestamp
//! - [`reconciler::UnreadReconciler`]: freshness state machine that
//!   applies events optimistically and trusts authoritative fetches

/// Unread freshness state machine
pub mod reconciler;

/// Durable cross-tab snapshot store
pub mod snapshot;

/// Connection lifecycle state machine
pub mod supervisor;

pub use reconciler::{Freshness, ReconcileAction, UnreadReconciler};
pub use snapshot::{MemorySnapshotStore, SnapshotError, SnapshotStore, SqliteSnapshotStore};
pub use supervisor::{ConnectionPhase, ConnectionSupervisor, SupervisorDirective};
