/**
 * Application State
 *
 * `AppState` is the one container every handler sees: the broadcast
 * hub with its event publisher, the unread aggregate engine, the
 * request throttle, the startup config, and an optional Postgres pool.
 * Every field is cheap to clone (`Arc`-backed or a pool handle), so
 * the whole struct clones per request without contention.
 *
 * `FromRef` impls let a handler take just the piece it needs
 * (`State<BroadcastHub>`, `State<Arc<Throttle>>`, ...) instead of the
 * full state.
 */

use axum::extract::FromRef;
use sqlx::PgPool;
use std::sync::Arc;

use crate::backend::error::BackendError;
use crate::backend::realtime::{BroadcastHub, EventPublisher};
use crate::backend::throttle::Throttle;
use crate::backend::unread::UnreadEngine;
use crate::shared::AppConfig;

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    /// Domain store pool. `None` when `DATABASE_URL` is unset;
    /// handlers go through `require_pool`, which answers 503.
    pub db_pool: Option<PgPool>,

    /// Per-principal broadcast channels for realtime delivery
    pub broadcast_hub: BroadcastHub,

    /// Publishes realtime events after domain writes commit
    pub publisher: EventPublisher,

    /// Unread aggregate engine (cache plus authoritative recompute)
    pub unread: UnreadEngine,

    /// Sliding-window throttle for write endpoints
    pub throttle: Arc<Throttle>,

    /// Runtime configuration
    pub config: AppConfig,
}

impl AppState {
    /// Borrow the database pool or fail with a 503
    ///
    /// Write and read paths both need the store; a server started
    /// without `DATABASE_URL` serves only heartbeats.
    pub fn require_pool(&self) -> Result<&PgPool, BackendError> {
        self.db_pool.as_ref().ok_or_else(|| {
            BackendError::handler(
                axum::http::StatusCode::SERVICE_UNAVAILABLE,
                "Database not configured",
            )
        })
    }
}

impl FromRef<AppState> for Option<PgPool> {
    fn from_ref(state: &AppState) -> Self {
        state.db_pool.clone()
    }
}

impl FromRef<AppState> for BroadcastHub {
    fn from_ref(state: &AppState) -> Self {
        state.broadcast_hub.clone()
    }
}

impl FromRef<AppState> for EventPublisher {
    fn from_ref(state: &AppState) -> Self {
        state.publisher.clone()
    }
}

impl FromRef<AppState> for UnreadEngine {
    fn from_ref(state: &AppState) -> Self {
        state.unread.clone()
    }
}

impl FromRef<AppState> for Arc<Throttle> {
    fn from_ref(state: &AppState) -> Self {
        state.throttle.clone()
    }
}
