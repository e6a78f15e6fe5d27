//! Backend Module
//!
//! Server-side code: an Axum HTTP server exposing ordered categories and
//! channels of communities. Only compiled when the `ssr` feature is enabled.
//!
//! # Architecture
//!
//! - **`server`** - Server initialization, application state, configuration
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`categories`** - Categories, one ordered list per community
//! - **`channels`** - Channels, one ordered list per category
//! - **`schema`** - SQLite schema and migrations
//! - **`error`** - Backend-specific error types
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Server binary
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── categories/     - Category entity and handlers
//! ├── channels/       - Channel entity and handlers
//! ├── schema.rs       - Database schema
//! └── error/          - Error types
//! ```
//!
//! # State Management
//!
//! `AppState` holds the connection pool, one `SpacedList` engine per table
//! and the partition locks. Handlers that write positions take the lock of
//! the list they write to and run in a single transaction.
//!
//! # Error Handling
//!
//! - Rejected moves become `409 Conflict` with the reason as message
//! - Unknown communities' entries become `404 Not Found`
//! - Database failures become `500` without leaking details

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Database schema
pub mod schema;

/// Ordered channel categories
pub mod categories;

/// Ordered channels
pub mod channels;

/// Re-export commonly used types
pub use server::{create_app, AppState, ServerConfig};
pub use error::BackendError;
pub use categories::{Category, CommunityList};
pub use channels::{Channel, ChannelKind, ChannelList};
