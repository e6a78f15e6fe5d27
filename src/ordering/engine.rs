//! Spaced List Engine
//!
//! Queries and placement primitives for [`OrderedEntry`] tables. Every
//! operation runs on a caller-provided connection, normally a transaction, and
//! issues its statements sequentially. Nothing here commits.
//!
//! # Placement
//!
//! - appending puts an entry one `spacing` after the current last entry
//! - prepending puts it one `spacing` before the current first entry
//! - inserting between two neighbours takes the floor of their average
//! - an empty partition starts at position `0`
//!
//! When a placement leaves the position bounds, or a midpoint has no integer
//! headroom left, the whole partition is reindexed to `0, spacing, 2 × spacing, …`
//! in a single `UPDATE` so readers never observe a half renumbered list.

use std::fmt;
use std::marker::PhantomData;

use sqlx::{Row, SqliteConnection};
use tracing::{debug, info};

use crate::shared::{InvalidMove, ListError, ListResult, Spacing};

use super::entry::OrderedEntry;
use super::key::ListKey;

/// Position range used by existence checks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Range {
    /// Anywhere in the partition
    Any,
    /// Strictly below a position
    Below(i64),
    /// Strictly above a position
    Above(i64),
    /// Strictly between two positions
    Between(i64, i64),
    /// Exactly at a position
    At(i64),
}

impl Range {
    fn condition(&self) -> &'static str {
        match self {
            Self::Any => "",
            Self::Below(_) => " AND position < ?",
            Self::Above(_) => " AND position > ?",
            Self::Between(_, _) => " AND position > ? AND position < ?",
            Self::At(_) => " AND position = ?",
        }
    }

    fn bounds(&self) -> Vec<i64> {
        match *self {
            Self::Any => Vec::new(),
            Self::Below(position) | Self::Above(position) | Self::At(position) => vec![position],
            Self::Between(low, high) => vec![low, high],
        }
    }
}

/// Where a freshly placed entry sorts among entries sharing its position
/// during a reindex
#[derive(Debug, Clone, Copy)]
enum Ties {
    Unordered,
    MovedFirst(i64),
    MovedLast(i64),
}

impl Ties {
    fn binds(self) -> (Option<i64>, i64) {
        match self {
            Self::Unordered => (None, 0),
            Self::MovedFirst(id) => (Some(id), -1),
            Self::MovedLast(id) => (Some(id), 1),
        }
    }
}

/// Ordering engine for one entry type
///
/// The engine is a zero-sized handle around the spacing configuration, cheap
/// to copy into every handler.
pub struct SpacedList<E> {
    spacing: Spacing,
    entry: PhantomData<fn() -> E>,
}

impl<E> Clone for SpacedList<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for SpacedList<E> {}

impl<E> fmt::Debug for SpacedList<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpacedList")
            .field("entry", &std::any::type_name::<E>())
            .field("spacing", &self.spacing)
            .finish()
    }
}

impl<E> Default for SpacedList<E> {
    fn default() -> Self {
        Self::new(Spacing::default())
    }
}

impl<E> SpacedList<E> {
    /// Create an engine with the given spacing and bounds
    pub fn new(spacing: Spacing) -> Self {
        Self {
            spacing,
            entry: PhantomData,
        }
    }

    /// Spacing and bounds in use
    pub fn spacing(&self) -> Spacing {
        self.spacing
    }
}

impl<E: OrderedEntry> SpacedList<E> {
    /// Load an entry by id, whatever partition it is in
    pub async fn find_by_id(&self, conn: &mut SqliteConnection, id: i64) -> ListResult<Option<E>> {
        let sql = format!("SELECT {} FROM {} WHERE id = ?", E::COLUMNS, E::TABLE);
        let row = sqlx::query(&sql).bind(id).fetch_optional(&mut *conn).await?;
        Ok(row.as_ref().map(E::from_row).transpose()?)
    }

    /// All entries of a partition in ascending position order
    pub async fn list_entries(
        &self,
        conn: &mut SqliteConnection,
        list_id: &E::ListId,
    ) -> ListResult<Vec<E>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE {} ORDER BY position ASC",
            E::COLUMNS,
            E::TABLE,
            <E::ListId as ListKey>::filter(),
        );
        let rows = list_id.bind(sqlx::query(&sql)).fetch_all(&mut *conn).await?;
        rows.iter()
            .map(|row| E::from_row(row).map_err(ListError::from))
            .collect()
    }

    /// Entry with the smallest position, if any
    pub async fn find_start(
        &self,
        conn: &mut SqliteConnection,
        list_id: &E::ListId,
    ) -> ListResult<Option<E>> {
        self.find_extreme(conn, list_id, "ASC").await
    }

    /// Entry with the largest position, if any
    pub async fn find_end(
        &self,
        conn: &mut SqliteConnection,
        list_id: &E::ListId,
    ) -> ListResult<Option<E>> {
        self.find_extreme(conn, list_id, "DESC").await
    }

    async fn find_extreme(
        &self,
        conn: &mut SqliteConnection,
        list_id: &E::ListId,
        direction: &str,
    ) -> ListResult<Option<E>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE {} ORDER BY position {} LIMIT 1",
            E::COLUMNS,
            E::TABLE,
            <E::ListId as ListKey>::filter(),
            direction,
        );
        let row = list_id.bind(sqlx::query(&sql)).fetch_optional(&mut *conn).await?;
        Ok(row.as_ref().map(E::from_row).transpose()?)
    }

    /// Whether the partition has no entries
    pub async fn is_empty(&self, conn: &mut SqliteConnection, list_id: &E::ListId) -> ListResult<bool> {
        Ok(!self.has_entries(conn, list_id, Range::Any, None).await?)
    }

    /// Whether no entry of the same partition sits before `entry`
    pub async fn is_first(&self, conn: &mut SqliteConnection, entry: &E) -> ListResult<bool> {
        let range = Range::Below(entry.position());
        Ok(!self.has_entries(conn, &entry.list_id(), range, None).await?)
    }

    /// Whether no entry of the same partition sits after `entry`
    pub async fn is_last(&self, conn: &mut SqliteConnection, entry: &E) -> ListResult<bool> {
        let range = Range::Above(entry.position());
        Ok(!self.has_entries(conn, &entry.list_id(), range, None).await?)
    }

    /// Whether any entry sits strictly between two positions of a partition
    pub async fn exists_between(
        &self,
        conn: &mut SqliteConnection,
        list_id: &E::ListId,
        low: i64,
        high: i64,
    ) -> ListResult<bool> {
        self.has_entries(conn, list_id, Range::Between(low, high), None).await
    }

    /// Whether `left` directly precedes (or is) `right` in the same partition
    pub async fn are_sequential(
        &self,
        conn: &mut SqliteConnection,
        left: &E,
        right: &E,
    ) -> ListResult<bool> {
        let list_id = left.list_id();
        if list_id != right.list_id() || left.position() > right.position() {
            return Ok(false);
        }
        Ok(!self
            .exists_between(conn, &list_id, left.position(), right.position())
            .await?)
    }

    /// Existence check over a position range, optionally ignoring one entry
    pub(super) async fn has_entries(
        &self,
        conn: &mut SqliteConnection,
        list_id: &E::ListId,
        range: Range,
        exclude: Option<i64>,
    ) -> ListResult<bool> {
        let sql = format!(
            "SELECT EXISTS (SELECT 1 FROM {} WHERE {}{} AND id IS NOT ?) AS found",
            E::TABLE,
            <E::ListId as ListKey>::filter(),
            range.condition(),
        );
        let mut query = list_id.bind(sqlx::query(&sql));
        for bound in range.bounds() {
            query = query.bind(bound);
        }
        let row = query.bind(exclude).fetch_one(&mut *conn).await?;
        let found: i64 = row.try_get("found")?;
        Ok(found != 0)
    }

    /// Insert a new entry and return it as stored.
    ///
    /// Without an explicit `position` the entry is appended to the end of its
    /// partition, or placed at `0` if the partition is empty. An explicit
    /// position must lie within the bounds and be free in the partition.
    pub async fn create(
        &self,
        conn: &mut SqliteConnection,
        mut entry: E,
        position: Option<i64>,
    ) -> ListResult<E> {
        let list_id = entry.list_id();
        let needs_reindex = match position {
            Some(position) => {
                self.check_free(conn, &list_id, position).await?;
                entry.set_position(position);
                false
            }
            None => self.place_at_end(conn, &mut entry, &list_id).await?,
        };

        let id = self.insert(conn, &entry).await?;
        debug!(table = E::TABLE, id, position = entry.position(), "created entry");

        if needs_reindex {
            self.reindex_partition(conn, &list_id, Ties::MovedLast(id)).await?;
        }

        self.find_by_id(conn, id)
            .await?
            .ok_or(ListError::Database(sqlx::Error::RowNotFound))
    }

    async fn check_free(
        &self,
        conn: &mut SqliteConnection,
        list_id: &E::ListId,
        position: i64,
    ) -> ListResult<()> {
        if !self.spacing.contains(position) {
            return Err(InvalidMove::PositionOutOfBounds {
                position,
                min: self.spacing.min_position,
                max: self.spacing.max_position,
            }
            .into());
        }
        if self.has_entries(conn, list_id, Range::At(position), None).await? {
            return Err(InvalidMove::PositionTaken { position }.into());
        }
        Ok(())
    }

    async fn insert(&self, conn: &mut SqliteConnection, entry: &E) -> ListResult<i64> {
        let attributes = entry.attributes();
        let mut columns: Vec<&str> = <E::ListId as ListKey>::columns().to_vec();
        columns.extend(attributes.iter().map(|(column, _)| *column));
        columns.push("position");

        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING id",
            E::TABLE,
            columns.join(", "),
            vec!["?"; columns.len()].join(", "),
        );
        let mut query = entry.list_id().bind(sqlx::query(&sql));
        for (_, value) in attributes {
            query = value.bind_to(query);
        }
        let row = query.bind(entry.position()).fetch_one(&mut *conn).await?;
        Ok(row.try_get("id")?)
    }

    /// Move an entry to the front of a partition
    pub async fn move_to_start(
        &self,
        conn: &mut SqliteConnection,
        entry: &mut E,
        list_id: &E::ListId,
    ) -> ListResult<()> {
        let needs_reindex = self.place_at_start(conn, entry, list_id).await?;
        self.save_placement(conn, entry).await?;
        if needs_reindex {
            self.reindex_around(conn, Ties::MovedFirst(entry.id()), entry).await?;
        }
        Ok(())
    }

    /// Move an entry to the back of a partition
    pub async fn move_to_end(
        &self,
        conn: &mut SqliteConnection,
        entry: &mut E,
        list_id: &E::ListId,
    ) -> ListResult<()> {
        let needs_reindex = self.place_at_end(conn, entry, list_id).await?;
        self.save_placement(conn, entry).await?;
        if needs_reindex {
            self.reindex_around(conn, Ties::MovedLast(entry.id()), entry).await?;
        }
        Ok(())
    }

    /// Move an entry directly in front of `before`, which the caller has
    /// checked is the first entry of its partition
    pub async fn move_before_first(
        &self,
        conn: &mut SqliteConnection,
        entry: &mut E,
        before: &E,
    ) -> ListResult<()> {
        let position = self.spacing.before(before.position());
        entry.set_list_id(before.list_id());
        entry.set_position(position);
        self.save_placement(conn, entry).await?;
        if self.spacing.underflows(position) {
            self.reindex_around(conn, Ties::MovedFirst(entry.id()), entry).await?;
        }
        Ok(())
    }

    /// Move an entry directly behind `after`, which the caller has checked is
    /// the last entry of its partition
    pub async fn move_after_last(
        &self,
        conn: &mut SqliteConnection,
        entry: &mut E,
        after: &E,
    ) -> ListResult<()> {
        let position = self.spacing.after(after.position());
        entry.set_list_id(after.list_id());
        entry.set_position(position);
        self.save_placement(conn, entry).await?;
        if self.spacing.overflows(position) {
            self.reindex_around(conn, Ties::MovedLast(entry.id()), entry).await?;
        }
        Ok(())
    }

    /// Move an entry between two adjacent neighbours.
    ///
    /// `after` must be positioned before `before` with nothing in between.
    /// When the midpoint lands on or next to a neighbour the partition is
    /// reindexed straight away. The moved entry sorts after anything it ties
    /// with, so it still ends up between its neighbours.
    pub async fn move_to_middle(
        &self,
        conn: &mut SqliteConnection,
        entry: &mut E,
        after: &E,
        before: &E,
    ) -> ListResult<()> {
        let position = self.spacing.midpoint(after.position(), before.position());
        entry.set_list_id(after.list_id());
        entry.set_position(position);
        self.save_placement(conn, entry).await?;
        if self
            .spacing
            .gap_exhausted(after.position(), position, before.position())
        {
            self.reindex_around(conn, Ties::MovedLast(entry.id()), entry).await?;
        }
        Ok(())
    }

    /// Place an entry at `0` in a partition the caller knows is empty
    pub async fn move_to_empty_list(
        &self,
        conn: &mut SqliteConnection,
        entry: &mut E,
        list_id: &E::ListId,
    ) -> ListResult<()> {
        entry.set_list_id(list_id.clone());
        entry.set_position(0);
        self.save_placement(conn, entry).await
    }

    /// Renumber a partition to `0, spacing, 2 × spacing, …` keeping its order.
    ///
    /// Returns the number of entries renumbered.
    pub async fn reindex(&self, conn: &mut SqliteConnection, list_id: &E::ListId) -> ListResult<u64> {
        self.reindex_partition(conn, list_id, Ties::Unordered).await
    }

    async fn place_at_start(
        &self,
        conn: &mut SqliteConnection,
        entry: &mut E,
        list_id: &E::ListId,
    ) -> ListResult<bool> {
        entry.set_list_id(list_id.clone());
        match self.find_start(conn, list_id).await? {
            None => {
                entry.set_position(0);
                Ok(false)
            }
            Some(first) => {
                let position = self.spacing.before(first.position());
                entry.set_position(position);
                Ok(self.spacing.underflows(position))
            }
        }
    }

    async fn place_at_end(
        &self,
        conn: &mut SqliteConnection,
        entry: &mut E,
        list_id: &E::ListId,
    ) -> ListResult<bool> {
        entry.set_list_id(list_id.clone());
        match self.find_end(conn, list_id).await? {
            None => {
                entry.set_position(0);
                Ok(false)
            }
            Some(last) => {
                let position = self.spacing.after(last.position());
                entry.set_position(position);
                Ok(self.spacing.overflows(position))
            }
        }
    }

    async fn save_placement(&self, conn: &mut SqliteConnection, entry: &E) -> ListResult<()> {
        let sql = format!(
            "UPDATE {} SET {}, position = ? WHERE id = ?",
            E::TABLE,
            <E::ListId as ListKey>::assignments(),
        );
        entry
            .list_id()
            .bind(sqlx::query(&sql))
            .bind(entry.position())
            .bind(entry.id())
            .execute(&mut *conn)
            .await?;
        debug!(
            table = E::TABLE,
            id = entry.id(),
            position = entry.position(),
            list = %entry.list_id().describe(),
            "placed entry"
        );
        Ok(())
    }

    async fn reindex_around(
        &self,
        conn: &mut SqliteConnection,
        ties: Ties,
        entry: &mut E,
    ) -> ListResult<()> {
        self.reindex_partition(conn, &entry.list_id(), ties).await?;

        let sql = format!("SELECT position FROM {} WHERE id = ?", E::TABLE);
        let row = sqlx::query(&sql)
            .bind(entry.id())
            .fetch_one(&mut *conn)
            .await?;
        entry.set_position(row.try_get("position")?);
        Ok(())
    }

    async fn reindex_partition(
        &self,
        conn: &mut SqliteConnection,
        list_id: &E::ListId,
        ties: Ties,
    ) -> ListResult<u64> {
        let sql = format!(
            "UPDATE {table} SET position = ranked.ordinal * ? \
             FROM ( \
                 SELECT id, ROW_NUMBER() OVER ( \
                     ORDER BY position ASC, CASE WHEN id = ? THEN ? ELSE 0 END ASC \
                 ) - 1 AS ordinal \
                 FROM {table} WHERE {filter} \
             ) AS ranked \
             WHERE {table}.id = ranked.id",
            table = E::TABLE,
            filter = <E::ListId as ListKey>::filter(),
        );
        let (moved_id, moved_rank) = ties.binds();
        let query = sqlx::query(&sql)
            .bind(self.spacing.spacing)
            .bind(moved_id)
            .bind(moved_rank);
        let result = list_id.bind(query).execute(&mut *conn).await?;

        info!(
            table = E::TABLE,
            list = %list_id.describe(),
            rows = result.rows_affected(),
            "reindexed partition"
        );
        Ok(result.rows_affected())
    }
}
