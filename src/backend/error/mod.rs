//! Backend Error Module
//!
//! Error types returned by HTTP handlers, and their conversion into HTTP
//! responses.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - IntoResponse implementation
//! ```
//!
//! # HTTP Response Conversion
//!
//! Rejected moves become `409 Conflict` carrying the rejection reason,
//! missing entries `404 Not Found`, storage failures `500` with a generic
//! message. Bodies are JSON: `{"error": ..., "status": ...}`.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::BackendError;
