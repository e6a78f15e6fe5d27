//! Database operations for categories
//!
//! Lookups scoped to a community. Ordering itself goes through the engine.

use sqlx::SqliteConnection;

use crate::ordering::OrderedEntry;
use super::Category;

/// Get a category by id, only if it belongs to the community
pub async fn find_category(
    conn: &mut SqliteConnection,
    community_id: i64,
    category_id: i64,
) -> Result<Option<Category>, sqlx::Error> {
    let sql = format!(
        "SELECT {} FROM {} WHERE id = ? AND community_id = ?",
        Category::COLUMNS,
        Category::TABLE,
    );
    let row = sqlx::query(&sql)
        .bind(category_id)
        .bind(community_id)
        .fetch_optional(&mut *conn)
        .await?;

    row.as_ref().map(Category::from_row).transpose()
}

/// Delete a category; its channels go with it.
///
/// Remaining categories keep their positions.
pub async fn delete_category(
    conn: &mut SqliteConnection,
    community_id: i64,
    category_id: i64,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        DELETE FROM categories
        WHERE id = ? AND community_id = ?
        "#,
    )
    .bind(category_id)
    .bind(community_id)
    .execute(&mut *conn)
    .await?;

    Ok(result.rows_affected() > 0)
}
