//! Partition Locks
//!
//! Two requests reordering the same partition at once could both read the
//! same neighbours and write colliding positions, or race a reindex. Every
//! mutation of a partition therefore holds that partition's lock for the
//! whole transaction. Partitions are independent of each other.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use super::key::ListKey;

/// Held while a partition is being reordered
pub type PartitionGuard = OwnedMutexGuard<()>;

/// Registry of per-partition locks
#[derive(Clone, Default)]
pub struct PartitionLocks {
    locks: Arc<Mutex<HashMap<String, Arc<AsyncMutex<()>>>>>,
}

impl PartitionLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive ownership of a partition of `table`
    pub async fn acquire<K: ListKey>(&self, table: &str, list_id: &K) -> PartitionGuard {
        let key = format!("{}:{}", table, list_id.describe());
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            locks.entry(key).or_default().clone()
        };
        lock.lock_owned().await
    }

    /// Drop locks nobody is holding or waiting on
    pub fn cleanup_idle(&self) {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|_, lock| Arc::strong_count(lock) > 1);
    }

    /// Number of partitions with a registered lock (for debugging)
    pub fn len(&self) -> usize {
        self.locks.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
