//! Shared Module
//!
//! Types that do not touch storage or HTTP: position arithmetic, the
//! invalid-move taxonomy, and the ordering configuration. Both the ordering
//! engine and the backend build on these.

/// Spaced position arithmetic
pub mod position;

/// Shared error types
pub mod error;

/// Ordering configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use position::Spacing;
pub use error::{InvalidMove, ListError, ListResult};
pub use config::{ListConfig, ListConfigBuilder, ConfigError};
