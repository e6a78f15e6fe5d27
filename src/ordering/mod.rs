//! Ordering Engine
//!
//! Spaced positional indexing for user-reorderable lists stored in SQLite.
//!
//! # Overview
//!
//! Each orderable table implements [`OrderedEntry`] and names a partition key
//! type implementing [`ListKey`]. [`SpacedList`] then offers the list
//! operations for that table:
//!
//! - **Queries**: `find_start`, `find_end`, `is_empty`, `is_first`, `is_last`,
//!   `are_sequential`, `find_by_id`, `list_entries`
//! - **Placement**: `create`, `move_to_start`, `move_to_end`,
//!   `move_before_first`, `move_after_last`, `move_to_middle`,
//!   `move_to_empty_list`
//! - **Maintenance**: `reindex`
//! - **Validated moves**: `move_to_and_validate`, the entry point for client
//!   requests naming an `after_id` and/or `before_id`
//!
//! # Transactions
//!
//! Operations take a `&mut SqliteConnection` and never commit. Run a logical
//! move inside one transaction and hold the partition's lock from
//! [`PartitionLocks`] until it commits.
//!
//! # Example
//!
//! ```rust,no_run
//! use spaced_list::ordering::SpacedList;
//! # use spaced_list::backend::categories::{Category, CommunityList};
//! # async fn example(pool: sqlx::SqlitePool) -> Result<(), spaced_list::shared::ListError> {
//! let categories = SpacedList::<Category>::default();
//! let mut tx = pool.begin().await?;
//! let list = CommunityList { community_id: 1 };
//! let first = categories.find_start(&mut tx, &list).await?;
//! categories.reindex(&mut tx, &list).await?;
//! tx.commit().await?;
//! # Ok(())
//! # }
//! ```

/// Partition key trait and bound values
pub mod key;

/// Orderable entry trait
pub mod entry;

/// Queries and placement primitives
pub mod engine;

/// Move validation
pub mod validate;

/// Per-partition locks
pub mod locks;

pub use key::{ListKey, SqlValue};
pub use entry::OrderedEntry;
pub use engine::SpacedList;
pub use locks::{PartitionGuard, PartitionLocks};
