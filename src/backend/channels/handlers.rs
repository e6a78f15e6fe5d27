//! Channel HTTP Handlers
//!
//! Same locking rules as categories, keyed by community and category. A move
//! between categories only locks the target list: the source list loses an
//! entry, which never changes the positions left behind.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::ordering::OrderedEntry;
use super::{
    db, Channel, ChannelList, ChannelListQuery, CreateChannelRequest, MoveChannelRequest,
};

/// List one channel list of a community in order
pub async fn list_channels(
    State(state): State<AppState>,
    Path(community_id): Path<i64>,
    Query(query): Query<ChannelListQuery>,
) -> Result<Json<Vec<Channel>>, BackendError> {
    let list = ChannelList {
        community_id,
        category_id: query.category_id,
    };
    let mut conn = state.db_pool.acquire().await?;
    let channels = state.channels.list_entries(&mut conn, &list).await?;
    Ok(Json(channels))
}

/// Create a channel in a category, or uncategorised
pub async fn create_channel(
    State(state): State<AppState>,
    Path(community_id): Path<i64>,
    Json(request): Json<CreateChannelRequest>,
) -> Result<(StatusCode, Json<Channel>), BackendError> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(BackendError::handler(StatusCode::BAD_REQUEST, "name must not be empty"));
    }

    let list = ChannelList {
        community_id,
        category_id: request.category_id,
    };
    let _guard = state.locks.acquire(Channel::TABLE, &list).await;
    let mut tx = state.begin_write().await?;

    if !db::category_exists(&mut tx, community_id, request.category_id).await? {
        return Err(BackendError::not_found("category", request.category_id.unwrap_or_default()));
    }

    let channel = Channel::new(community_id, request.category_id, name, request.kind);
    let channel = state.channels.create(&mut tx, channel, request.position).await?;
    tx.commit().await?;

    tracing::info!(
        id = channel.id,
        community_id,
        category_id = ?channel.category_id,
        position = channel.position,
        "Created channel"
    );
    Ok((StatusCode::CREATED, Json(channel)))
}

/// Move a channel between two neighbours, possibly into another category
pub async fn move_channel(
    State(state): State<AppState>,
    Path((community_id, channel_id)): Path<(i64, i64)>,
    Json(request): Json<MoveChannelRequest>,
) -> Result<Json<Channel>, BackendError> {
    let list = ChannelList {
        community_id,
        category_id: request.category_id,
    };
    let _guard = state.locks.acquire(Channel::TABLE, &list).await;
    let mut tx = state.begin_write().await?;

    let mut channel = db::find_channel(&mut tx, community_id, channel_id)
        .await?
        .ok_or(BackendError::not_found("channel", channel_id))?;

    if !db::category_exists(&mut tx, community_id, request.category_id).await? {
        return Err(BackendError::not_found("category", request.category_id.unwrap_or_default()));
    }

    let from = channel.category_id;
    state
        .channels
        .move_to_and_validate(&mut tx, &mut channel, &list, request.after_id, request.before_id)
        .await?;
    tx.commit().await?;

    if from != channel.category_id {
        tracing::info!(
            id = channel_id,
            from = ?from,
            to = ?channel.category_id,
            "Moved channel to another category"
        );
    }
    Ok(Json(channel))
}

/// Renumber one channel list
pub async fn reindex_channels(
    State(state): State<AppState>,
    Path(community_id): Path<i64>,
    Query(query): Query<ChannelListQuery>,
) -> Result<StatusCode, BackendError> {
    let list = ChannelList {
        community_id,
        category_id: query.category_id,
    };
    let _guard = state.locks.acquire(Channel::TABLE, &list).await;
    let mut tx = state.begin_write().await?;
    state.channels.reindex(&mut tx, &list).await?;
    tx.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete a channel
pub async fn delete_channel(
    State(state): State<AppState>,
    Path((community_id, channel_id)): Path<(i64, i64)>,
) -> Result<StatusCode, BackendError> {
    let mut conn = state.db_pool.acquire().await?;
    if !db::delete_channel(&mut conn, community_id, channel_id).await? {
        return Err(BackendError::not_found("channel", channel_id));
    }
    tracing::info!(id = channel_id, community_id, "Deleted channel");
    Ok(StatusCode::NO_CONTENT)
}
