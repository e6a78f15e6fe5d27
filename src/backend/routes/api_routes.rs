/**
 * API Route Handlers
 *
 * Every community owns one ordered list of categories, and one ordered list
 * of channels per category plus one for uncategorised channels.
 *
 * # Routes
 *
 * ## Categories
 * - `GET    /communities/{community_id}/categories/` - List in order
 * - `POST   /communities/{community_id}/categories/` - Create (appended)
 * - `PUT    /communities/{community_id}/categories/{id}/position/` - Move
 * - `PUT    /communities/{community_id}/categories/positions/` - Reindex
 * - `DELETE /communities/{community_id}/categories/{id}/` - Delete
 *
 * ## Channels
 * - `GET    /communities/{community_id}/channels/?category_id=` - List in order
 * - `POST   /communities/{community_id}/channels/` - Create (appended)
 * - `PUT    /communities/{community_id}/channels/{id}/position/` - Move
 * - `PUT    /communities/{community_id}/channels/positions/?category_id=` - Reindex
 * - `DELETE /communities/{community_id}/channels/{id}/` - Delete
 */

use axum::routing::{delete, get, put};
use axum::Router;

use crate::backend::categories::handlers::{
    create_category, delete_category, list_categories, move_category, reindex_categories,
};
use crate::backend::channels::handlers::{
    create_channel, delete_channel, list_channels, move_channel, reindex_channels,
};
use crate::backend::server::state::AppState;

/// Configure API routes
///
/// # Arguments
///
/// * `router` - The router to add routes to
///
/// # Returns
///
/// Router with category and channel routes configured
pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        // Category endpoints
        .route(
            "/communities/{community_id}/categories/",
            get(list_categories).post(create_category),
        )
        .route(
            "/communities/{community_id}/categories/positions/",
            put(reindex_categories),
        )
        .route(
            "/communities/{community_id}/categories/{category_id}/position/",
            put(move_category),
        )
        .route(
            "/communities/{community_id}/categories/{category_id}/",
            delete(delete_category),
        )
        // Channel endpoints
        .route(
            "/communities/{community_id}/channels/",
            get(list_channels).post(create_channel),
        )
        .route(
            "/communities/{community_id}/channels/positions/",
            put(reindex_channels),
        )
        .route(
            "/communities/{community_id}/channels/{channel_id}/position/",
            put(move_channel),
        )
        .route(
            "/communities/{community_id}/channels/{channel_id}/",
            delete(delete_channel),
        )
}
