/**
 * Service Configuration
 *
 * This module handles loading of optional external services based on
 * environment variables. The server degrades gracefully when a service
 * is not configured rather than refusing to start.
 *
 * # Environment Variables
 *
 * - `DATABASE_URL` - PostgreSQL connection string
 */

use sqlx::PgPool;

/// Load the database connection pool from the environment
///
/// Returns `None` when `DATABASE_URL` is unset or the connection
/// fails; handlers then answer 503 for store-backed endpoints.
///
/// # Migration Handling
///
/// Migrations run on every successful connection. A migration failure
/// is logged but does not abort startup, so a half-migrated database
/// still accepts connections for the tables that exist.
pub async fn load_database() -> Option<PgPool> {
    let database_url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            tracing::warn!("DATABASE_URL not set, starting without database");
            return None;
        }
    };

    match PgPool::connect(&database_url).await {
        Ok(pool) => {
            tracing::info!("Connected to PostgreSQL database");

            if let Err(e) = sqlx::migrate!().run(&pool).await {
                tracing::warn!("Database migration failed: {:?}", e);
            } else {
                tracing::info!("Database migrations applied");
            }

            Some(pool)
        }
        Err(e) => {
            tracing::error!("Failed to connect to database: {:?}", e);
            None
        }
    }
}
