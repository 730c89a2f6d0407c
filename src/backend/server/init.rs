/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP
 * server, including state creation, database loading, route
 * configuration, and background tasks.
 *
 * # Initialization Process
 *
 * 1. Load runtime configuration
 * 2. Create the broadcast hub, publisher, unread engine, and throttle
 * 3. Load optional services (database)
 * 4. Create and configure the router
 * 5. Spawn the heartbeat and throttle sweep tickers
 *
 * # Error Handling
 *
 * Startup is resilient: a missing database leaves store-backed
 * endpoints answering 503 while the realtime surface stays up.
 */

use std::sync::Arc;

use axum::Router;

use crate::backend::realtime::{BroadcastHub, EventPublisher};
use crate::backend::routes::create_router;
use crate::backend::server::config::load_database;
use crate::backend::server::state::AppState;
use crate::backend::throttle::Throttle;
use crate::backend::unread::UnreadEngine;
use crate::shared::AppConfig;

/// Create and configure the Axum application
///
/// Returns a router ready to serve requests, with the heartbeat and
/// throttle sweep tasks already running.
pub async fn create_app() -> Router<()> {
    tracing::info!("Initializing socialite backend server");

    let config = AppConfig::default();

    let broadcast_hub = BroadcastHub::new();
    let publisher = EventPublisher::new(broadcast_hub.clone());
    let unread = UnreadEngine::new();
    let throttle = Arc::new(Throttle::new(
        config.throttle_window,
        config.throttle_max_in_window,
    ));

    tracing::info!("Broadcast hub and unread engine initialized");

    let db_pool = load_database().await;

    let app_state = AppState {
        db_pool,
        broadcast_hub: broadcast_hub.clone(),
        publisher,
        unread,
        throttle: throttle.clone(),
        config: config.clone(),
    };

    let app = create_router(app_state);

    // Heartbeats keep idle SSE connections alive and double as the
    // channel cleanup tick.
    broadcast_hub.spawn_heartbeat(config.heartbeat_interval);

    // The throttle only prunes a key's window on access; the sweep
    // drops keys that went quiet entirely.
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(300));
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        loop {
            interval.tick().await;
            throttle.sweep();
            tracing::debug!("Swept idle throttle entries");
        }
    });

    tracing::info!("Router configured with heartbeat and sweep tasks");

    app
}
