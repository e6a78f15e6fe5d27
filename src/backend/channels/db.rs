//! Database operations for channels

use sqlx::SqliteConnection;

use crate::backend::categories::db::find_category;
use crate::ordering::OrderedEntry;
use super::Channel;

/// Get a channel by id, only if it belongs to the community
pub async fn find_channel(
    conn: &mut SqliteConnection,
    community_id: i64,
    channel_id: i64,
) -> Result<Option<Channel>, sqlx::Error> {
    let sql = format!(
        "SELECT {} FROM {} WHERE id = ? AND community_id = ?",
        Channel::COLUMNS,
        Channel::TABLE,
    );
    let row = sqlx::query(&sql)
        .bind(channel_id)
        .bind(community_id)
        .fetch_optional(&mut *conn)
        .await?;

    row.as_ref().map(Channel::from_row).transpose()
}

/// Whether `category_id` is a category of the community.
///
/// No category at all is always valid.
pub async fn category_exists(
    conn: &mut SqliteConnection,
    community_id: i64,
    category_id: Option<i64>,
) -> Result<bool, sqlx::Error> {
    match category_id {
        Some(id) => Ok(find_category(conn, community_id, id).await?.is_some()),
        None => Ok(true),
    }
}

/// Delete a channel
pub async fn delete_channel(
    conn: &mut SqliteConnection,
    community_id: i64,
    channel_id: i64,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        DELETE FROM channels
        WHERE id = ? AND community_id = ?
        "#,
    )
    .bind(channel_id)
    .bind(community_id)
    .execute(&mut *conn)
    .await?;

    Ok(result.rows_affected() > 0)
}
