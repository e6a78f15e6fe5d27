//! Shared Error Types
//!
//! Errors produced by the ordering engine.
//!
//! # Error Categories
//!
//! - `InvalidMove` - a move request that contradicts the current order of the
//!   partition, or an explicit position that is out of range or taken. These
//!   are caller errors and are raised before any write.
//! - `ListError::Database` - storage failures, passed through untouched so the
//!   caller can roll its transaction back.
//!
//! # Usage
//!
//! ```rust
//! use spaced_list::shared::error::{InvalidMove, ListError};
//!
//! let error: ListError = InvalidMove::PartitionNotEmpty.into();
//! assert!(error.is_invalid_move());
//! ```
use thiserror::Error;

/// Reasons a validated move is rejected
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidMove {
    /// `after_id` and `before_id` name the same entry
    #[error("after_id and before_id must be different")]
    AmbiguousNeighbors,

    /// A neighbour id is the id of the entry being moved
    #[error("entry {id} cannot be positioned relative to itself")]
    SelfReference {
        /// Id of the moving entry
        id: i64,
    },

    /// A neighbour id does not resolve to any entry
    #[error("{side} entry {id} not found")]
    NeighborNotFound {
        /// Which neighbour (`after` or `before`)
        side: &'static str,
        /// The unresolved id
        id: i64,
    },

    /// A neighbour lives in another partition than the target list
    #[error("{side} entry {id} belongs to a different list")]
    NeighborInWrongPartition {
        /// Which neighbour (`after` or `before`)
        side: &'static str,
        /// The neighbour id
        id: i64,
    },

    /// Both neighbours given but `after` is not positioned before `before`
    #[error("after entry {after_id} must be positioned before entry {before_id}")]
    NeighborsOutOfOrder {
        /// Id of the `after` neighbour
        after_id: i64,
        /// Id of the `before` neighbour
        before_id: i64,
    },

    /// Both neighbours given but other entries sit between them
    #[error("entries {after_id} and {before_id} are not adjacent")]
    NeighborsNotAdjacent {
        /// Id of the `after` neighbour
        after_id: i64,
        /// Id of the `before` neighbour
        before_id: i64,
    },

    /// Only `before` given but it is not the first entry of its list
    #[error("entry {id} is not the first in its list")]
    ExpectedFirstButIsNot {
        /// Id of the `before` neighbour
        id: i64,
    },

    /// Only `after` given but it is not the last entry of its list
    #[error("entry {id} is not the last in its list")]
    ExpectedLastButIsNot {
        /// Id of the `after` neighbour
        id: i64,
    },

    /// No neighbours given but the target list has entries
    #[error("target list is not empty, after_id or before_id is required")]
    PartitionNotEmpty,

    /// An explicit position lies outside the allowed range
    #[error("position {position} is outside the allowed range [{min}, {max}]")]
    PositionOutOfBounds {
        /// The requested position
        position: i64,
        /// Smallest allowed position
        min: i64,
        /// Largest allowed position
        max: i64,
    },

    /// An explicit position is already held by another entry of the list
    #[error("position {position} is already taken in the target list")]
    PositionTaken {
        /// The requested position
        position: i64,
    },
}

/// Errors returned by ordering engine operations
#[derive(Debug, Error)]
pub enum ListError {
    /// The requested move was rejected, nothing was written
    #[error("Invalid move: {0}")]
    InvalidMove(#[from] InvalidMove),

    /// Underlying storage failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ListError {
    /// Whether this error is a rejected move rather than a storage failure
    pub fn is_invalid_move(&self) -> bool {
        matches!(self, Self::InvalidMove(_))
    }

    /// The rejection reason, if this is a rejected move
    pub fn invalid_move(&self) -> Option<&InvalidMove> {
        match self {
            Self::InvalidMove(reason) => Some(reason),
            Self::Database(_) => None,
        }
    }
}

/// Result type for ordering engine operations
pub type ListResult<T> = Result<T, ListError>;
