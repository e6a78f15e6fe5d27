//! Orderable Entries
//!
//! [`OrderedEntry`] is implemented by every table whose rows can be
//! reordered by users. The engine only needs the table name, the columns to
//! load, accessors for `id`, `position` and the partition key, and the extra
//! attributes written on insert.

use std::fmt;

use sqlx::sqlite::SqliteRow;

use super::key::{ListKey, SqlValue};

/// A row in a user-reorderable list
///
/// # Requirements
///
/// - the table has an integer primary key `id` and an integer `position`
/// - the partition columns named by `Self::ListId` are present on the table
/// - `COLUMNS` selects everything `from_row` reads
pub trait OrderedEntry: Sized + Send + Sync + Unpin + fmt::Debug {
    /// Partition key type
    type ListId: ListKey;

    /// Table holding the entries
    const TABLE: &'static str;

    /// Column list used when loading entries
    const COLUMNS: &'static str;

    /// Storage-assigned identity
    fn id(&self) -> i64;

    /// Current position within the partition
    fn position(&self) -> i64;

    /// Update the in-memory position
    fn set_position(&mut self, position: i64);

    /// Partition the entry currently belongs to
    fn list_id(&self) -> Self::ListId;

    /// Update the in-memory partition
    fn set_list_id(&mut self, list_id: Self::ListId);

    /// Build an entry from a row selected with `COLUMNS`
    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error>;

    /// Columns other than `id`, `position` and the partition written on insert
    fn attributes(&self) -> Vec<(&'static str, SqlValue)>;
}
