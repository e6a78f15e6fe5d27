//! Validated Moves
//!
//! Clients send "put this entry after X and before Y" based on what they last
//! saw. By the time the request arrives the list may have changed, so every
//! claim about adjacency is checked against the store before anything is
//! written. A rejected move leaves the transaction untouched.
//!
//! The entry being moved is never counted as its own neighbour: moving an
//! entry into the gap it already occupies is accepted.

use sqlx::SqliteConnection;
use tracing::debug;

use crate::shared::{InvalidMove, ListResult};

use super::engine::{Range, SpacedList};
use super::entry::OrderedEntry;

/// Where a validated move will put the entry
#[derive(Debug)]
enum Target<E> {
    Between { after: E, before: E },
    BeforeFirst(E),
    AfterLast(E),
    EmptyList,
}

impl<E: OrderedEntry> SpacedList<E> {
    /// Move `entry` into `list_id` between `after_id` and `before_id`.
    ///
    /// - both given: they must be adjacent, `after` first
    /// - only `before`: it must be the first entry of the list
    /// - only `after`: it must be the last entry of the list
    /// - neither: the list must be empty
    ///
    /// On success `entry` carries its new position and partition.
    pub async fn move_to_and_validate(
        &self,
        conn: &mut SqliteConnection,
        entry: &mut E,
        list_id: &E::ListId,
        after_id: Option<i64>,
        before_id: Option<i64>,
    ) -> ListResult<()> {
        let target = match self
            .validate_move(conn, entry.id(), list_id, after_id, before_id)
            .await
        {
            Ok(target) => target,
            Err(error) => {
                debug!(
                    table = E::TABLE,
                    id = entry.id(),
                    ?after_id,
                    ?before_id,
                    %error,
                    "rejected move"
                );
                return Err(error);
            }
        };

        match target {
            Target::Between { after, before } => {
                self.move_to_middle(conn, entry, &after, &before).await
            }
            Target::BeforeFirst(before) => self.move_before_first(conn, entry, &before).await,
            Target::AfterLast(after) => self.move_after_last(conn, entry, &after).await,
            Target::EmptyList => self.move_to_empty_list(conn, entry, list_id).await,
        }
    }

    async fn validate_move(
        &self,
        conn: &mut SqliteConnection,
        id: i64,
        list_id: &E::ListId,
        after_id: Option<i64>,
        before_id: Option<i64>,
    ) -> ListResult<Target<E>> {
        if after_id.is_some() && after_id == before_id {
            return Err(InvalidMove::AmbiguousNeighbors.into());
        }
        if after_id == Some(id) || before_id == Some(id) {
            return Err(InvalidMove::SelfReference { id }.into());
        }

        let after = match after_id {
            Some(after_id) => Some(self.resolve_neighbor(conn, list_id, "after", after_id).await?),
            None => None,
        };
        let before = match before_id {
            Some(before_id) => Some(self.resolve_neighbor(conn, list_id, "before", before_id).await?),
            None => None,
        };

        match (after, before) {
            (Some(after), Some(before)) => {
                if after.position() >= before.position() {
                    return Err(InvalidMove::NeighborsOutOfOrder {
                        after_id: after.id(),
                        before_id: before.id(),
                    }
                    .into());
                }
                let between = Range::Between(after.position(), before.position());
                if self.has_entries(conn, list_id, between, Some(id)).await? {
                    return Err(InvalidMove::NeighborsNotAdjacent {
                        after_id: after.id(),
                        before_id: before.id(),
                    }
                    .into());
                }
                Ok(Target::Between { after, before })
            }
            (None, Some(before)) => {
                let below = Range::Below(before.position());
                if self.has_entries(conn, list_id, below, Some(id)).await? {
                    return Err(InvalidMove::ExpectedFirstButIsNot { id: before.id() }.into());
                }
                Ok(Target::BeforeFirst(before))
            }
            (Some(after), None) => {
                let above = Range::Above(after.position());
                if self.has_entries(conn, list_id, above, Some(id)).await? {
                    return Err(InvalidMove::ExpectedLastButIsNot { id: after.id() }.into());
                }
                Ok(Target::AfterLast(after))
            }
            (None, None) => {
                if self.has_entries(conn, list_id, Range::Any, Some(id)).await? {
                    return Err(InvalidMove::PartitionNotEmpty.into());
                }
                Ok(Target::EmptyList)
            }
        }
    }

    async fn resolve_neighbor(
        &self,
        conn: &mut SqliteConnection,
        list_id: &E::ListId,
        side: &'static str,
        id: i64,
    ) -> ListResult<E> {
        let neighbor = self
            .find_by_id(conn, id)
            .await?
            .ok_or(InvalidMove::NeighborNotFound { side, id })?;
        if neighbor.list_id() != *list_id {
            return Err(InvalidMove::NeighborInWrongPartition { side, id }.into());
        }
        Ok(neighbor)
    }
}
