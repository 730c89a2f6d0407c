/**
 * Router Assembly
 *
 * Combines the realtime subscription route, the JSON API routes, and
 * the 404 fallback into one Axum router, then wraps it in a request
 * trace layer. The SSE route is registered before the API table so the
 * long-lived subscription path never collides with an API prefix.
 */

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::backend::realtime::subscription::handle_realtime_subscription;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;

/// Build the full router over the given state
///
/// `GET /realtime` is the SSE subscription endpoint, optionally
/// filtered with `?types=message_received,message_read_status_updated`.
/// The JSON API routes are listed in [`configure_api_routes`].
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = Router::new().route(
        "/realtime",
        axum::routing::get(handle_realtime_subscription),
    );

    let router = configure_api_routes(router);

    // Fallback handler for 404
    let router = router.fallback(|| async { "404 Not Found" });

    router
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
