/**
 * Application State Management
 *
 * `AppState` is the central state container shared by all handlers:
 * - the SQLite connection pool
 * - one ordering engine per orderable table
 * - the partition lock registry serialising reorders of the same list
 *
 * Everything inside is cheap to clone (`Arc`s and `Copy` handles).
 *
 * # Example
 *
 * ```rust,no_run
 * use spaced_list::backend::server::state::AppState;
 * use axum::extract::State;
 *
 * async fn handler(State(state): State<AppState>) {
 *     let mut conn = state.db_pool.acquire().await.unwrap();
 *     // ...
 * }
 * ```
 */

use axum::extract::FromRef;
use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::backend::categories::Category;
use crate::backend::channels::Channel;
use crate::ordering::{PartitionLocks, SpacedList};
use crate::shared::ListConfig;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db_pool: SqlitePool,

    /// Ordering engine for categories
    pub categories: SpacedList<Category>,

    /// Ordering engine for channels
    pub channels: SpacedList<Channel>,

    /// Per-partition locks held for the duration of a reorder
    pub locks: PartitionLocks,
}

impl AppState {
    /// Build state around an initialised pool
    pub fn new(db_pool: SqlitePool, list_config: &ListConfig) -> Self {
        let spacing = list_config.spacing();
        Self {
            db_pool,
            categories: SpacedList::new(spacing),
            channels: SpacedList::new(spacing),
            locks: PartitionLocks::new(),
        }
    }

    /// Begin a transaction that takes SQLite's write lock up front.
    ///
    /// A deferred transaction that reads and then writes can fail with
    /// `SQLITE_BUSY_SNAPSHOT` in WAL mode when another connection committed in
    /// between, without waiting on the busy timeout. `BEGIN IMMEDIATE` queues
    /// writers on the busy timeout instead.
    pub async fn begin_write(&self) -> Result<Transaction<'static, Sqlite>, sqlx::Error> {
        self.db_pool.begin_with("BEGIN IMMEDIATE").await
    }
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(state: &AppState) -> Self {
        state.db_pool.clone()
    }
}
