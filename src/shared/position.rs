//! Position Arithmetic
//!
//! Pure helpers for spaced integer positions. Entries in a partition are kept
//! `spacing` apart after a reindex, so most moves can pick a free integer
//! between two neighbours without touching any other row.
//!
//! # Bounds
//!
//! Positions live in `[min_position, max_position]`, both multiples of the
//! spacing. With the defaults (spacing 4096, 500 slots below zero, 1000 above)
//! that is `[-2_048_000, 4_096_000]`.
//!
//! # Example
//!
//! ```rust
//! use spaced_list::shared::position::Spacing;
//!
//! let spacing = Spacing::default();
//! assert_eq!(spacing.after(8192), 12288);
//! assert_eq!(spacing.midpoint(0, 4096), 2048);
//! ```

use serde::{Deserialize, Serialize};

/// Default gap between freshly reindexed neighbours
pub const DEFAULT_SPACING: i64 = 4096;

/// Default number of spacing slots below zero
pub const DEFAULT_MIN_SLOTS: i64 = 500;

/// Default number of spacing slots above zero
pub const DEFAULT_MAX_SLOTS: i64 = 1000;

/// Spacing and bounds used by the ordering engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spacing {
    /// Gap left between neighbours after a reindex
    pub spacing: i64,
    /// Smallest allowed position
    pub min_position: i64,
    /// Largest allowed position
    pub max_position: i64,
}

impl Default for Spacing {
    fn default() -> Self {
        Self::new(DEFAULT_SPACING, DEFAULT_MIN_SLOTS, DEFAULT_MAX_SLOTS)
    }
}

impl Spacing {
    /// Build bounds from a spacing and the number of slots on each side of zero
    pub fn new(spacing: i64, min_slots: i64, max_slots: i64) -> Self {
        Self {
            spacing,
            min_position: spacing.saturating_mul(min_slots).saturating_neg(),
            max_position: spacing.saturating_mul(max_slots),
        }
    }

    /// Position one slot before `first`.
    ///
    /// Saturates at `i64::MIN`; the result then underflows and the caller
    /// reindexes.
    pub fn before(&self, first: i64) -> i64 {
        first.saturating_sub(self.spacing)
    }

    /// Position one slot after `last`, saturating at `i64::MAX`
    pub fn after(&self, last: i64) -> i64 {
        last.saturating_add(self.spacing)
    }

    /// Floor of the average of two positions.
    ///
    /// Uses euclidean division so negative sums round towards negative
    /// infinity, keeping the result at or above `after`.
    pub fn midpoint(&self, after: i64, before: i64) -> i64 {
        // the floor average of two i64 always fits in i64
        (i128::from(after) + i128::from(before)).div_euclid(2) as i64
    }

    /// Whether a position has dropped below the lower bound
    pub fn underflows(&self, position: i64) -> bool {
        position < self.min_position
    }

    /// Whether a position has passed the upper bound
    pub fn overflows(&self, position: i64) -> bool {
        position > self.max_position
    }

    /// Whether a position lies within `[min_position, max_position]`
    pub fn contains(&self, position: i64) -> bool {
        (self.min_position..=self.max_position).contains(&position)
    }

    /// Whether a freshly computed midpoint left no headroom on either side.
    ///
    /// True when the new position sits on, or one integer away from, one of
    /// its neighbours.
    pub fn gap_exhausted(&self, after: i64, position: i64, before: i64) -> bool {
        position.saturating_sub(after) <= 1 || before.saturating_sub(position) <= 1
    }
}
