//! Category HTTP Handlers
//!
//! Every handler that changes positions holds the community's partition lock
//! and runs inside one transaction, so a rejected move writes nothing.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::ordering::OrderedEntry;
use super::{db, Category, CommunityList, CreateCategoryRequest, MoveCategoryRequest};

/// List the categories of a community in order
pub async fn list_categories(
    State(state): State<AppState>,
    Path(community_id): Path<i64>,
) -> Result<Json<Vec<Category>>, BackendError> {
    let mut conn = state.db_pool.acquire().await?;
    let categories = state
        .categories
        .list_entries(&mut conn, &CommunityList { community_id })
        .await?;
    Ok(Json(categories))
}

/// Create a category, appended to the end unless a position is given
pub async fn create_category(
    State(state): State<AppState>,
    Path(community_id): Path<i64>,
    Json(request): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<Category>), BackendError> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(BackendError::handler(StatusCode::BAD_REQUEST, "name must not be empty"));
    }

    let list = CommunityList { community_id };
    let _guard = state.locks.acquire(Category::TABLE, &list).await;
    let mut tx = state.begin_write().await?;
    let category = state
        .categories
        .create(&mut tx, Category::new(community_id, name), request.position)
        .await?;
    tx.commit().await?;

    tracing::info!(id = category.id, community_id, position = category.position, "Created category");
    Ok((StatusCode::CREATED, Json(category)))
}

/// Move a category between two neighbours
pub async fn move_category(
    State(state): State<AppState>,
    Path((community_id, category_id)): Path<(i64, i64)>,
    Json(request): Json<MoveCategoryRequest>,
) -> Result<Json<Category>, BackendError> {
    let list = CommunityList { community_id };
    let _guard = state.locks.acquire(Category::TABLE, &list).await;
    let mut tx = state.begin_write().await?;

    let mut category = db::find_category(&mut tx, community_id, category_id)
        .await?
        .ok_or(BackendError::not_found("category", category_id))?;

    state
        .categories
        .move_to_and_validate(&mut tx, &mut category, &list, request.after_id, request.before_id)
        .await?;
    tx.commit().await?;

    Ok(Json(category))
}

/// Renumber the categories of a community
pub async fn reindex_categories(
    State(state): State<AppState>,
    Path(community_id): Path<i64>,
) -> Result<StatusCode, BackendError> {
    let list = CommunityList { community_id };
    let _guard = state.locks.acquire(Category::TABLE, &list).await;
    let mut tx = state.begin_write().await?;
    state.categories.reindex(&mut tx, &list).await?;
    tx.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete a category and its channels
pub async fn delete_category(
    State(state): State<AppState>,
    Path((community_id, category_id)): Path<(i64, i64)>,
) -> Result<StatusCode, BackendError> {
    let mut conn = state.db_pool.acquire().await?;
    if !db::delete_category(&mut conn, community_id, category_id).await? {
        return Err(BackendError::not_found("category", category_id));
    }
    tracing::info!(id = category_id, community_id, "Deleted category");
    Ok(StatusCode::NO_CONTENT)
}
