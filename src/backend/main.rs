/**
 * Server Entry Point
 *
 * Binds the Axum application to the configured port and serves it.
 *
 * # Environment Variables
 *
 * - `SERVER_PORT` - Port to listen on (default: 3000)
 * - `DATABASE_URL` - PostgreSQL connection string (optional)
 * - `RUST_LOG` - Log filter (default: info)
 */

use socialite::backend::server::init::create_app;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let app = create_app().await;

    let port = std::env::var("SERVER_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(3000);
    let addr = format!("0.0.0.0:{}", port);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    tracing::info!("Listening on {}", addr);

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
    }
}
