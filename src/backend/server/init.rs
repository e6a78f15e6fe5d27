/**
 * Server Initialization
 *
 * Builds the Axum application: opens the database, creates the shared
 * state, configures routes and starts background maintenance.
 *
 * # Initialization Process
 *
 * 1. Open the connection pool and apply the schema
 * 2. Create the application state (ordering engines, partition locks)
 * 3. Create the router
 * 4. Start periodic cleanup of idle partition locks
 */

use std::time::Duration;

use axum::Router;

use crate::backend::error::BackendError;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_database, ServerConfig};
use crate::backend::server::state::AppState;

/// How often idle partition locks are dropped
const LOCK_CLEANUP_INTERVAL: Duration = Duration::from_secs(300);

/// Create and configure the Axum application
///
/// # Errors
///
/// Fails if the configuration is invalid or the database cannot be opened.
/// Unlike optional services, the database is required.
pub async fn create_app(config: &ServerConfig) -> Result<Router<()>, BackendError> {
    tracing::info!("Initializing ordered list server");
    config.validate()?;

    let db_pool = load_database(config).await?;
    let app_state = AppState::new(db_pool, &config.ordering);

    tracing::info!(
        spacing = config.ordering.spacing,
        min_slots = config.ordering.min_slots,
        max_slots = config.ordering.max_slots,
        "Ordering engines initialized"
    );

    let app = create_router(app_state.clone());

    let locks = app_state.locks.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(LOCK_CLEANUP_INTERVAL);
        loop {
            interval.tick().await;
            locks.cleanup_idle();
            tracing::debug!(remaining = locks.len(), "Cleaned up idle partition locks");
        }
    });

    tracing::info!("Router configured with periodic cleanup task");

    Ok(app)
}
