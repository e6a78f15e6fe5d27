//! Spaced List - Main Library
//!
//! Ordered lists stored in SQLite, where moving one entry writes one row.
//!
//! # Overview
//!
//! Entries carry an integer `position` spaced far apart (4096 by default), so
//! an entry can be dropped between two neighbours by taking the midpoint of
//! their positions. Only when a gap runs out, or a position leaves the allowed
//! range, is the whole list renumbered.
//!
//! # Module Structure
//!
//! - **`shared`** - Position arithmetic, error types, ordering configuration
//!
//! - **`ordering`** - The engine, generic over any table that implements
//!   [`ordering::OrderedEntry`]
//!   - Start/end queries, placement primitives, reindexing
//!   - Validated moves from client `after_id`/`before_id` requests
//!   - Per-partition locks
//!
//! - **`backend`** - Axum server (only compiled with the `ssr` feature)
//!   - Community categories and channels as ordered tables
//!   - Configuration, schema bootstrap, routes, error responses
//!
//! # Feature Flags
//!
//! - **`ssr`** (default) - HTTP server, tracing subscriber and `.env` loading
//!
//! # Usage
//!
//! ```rust,no_run
//! use spaced_list::backend::server::{create_app, ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::load()?;
//! let app = create_app(&config).await?;
//! let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! - [`shared::InvalidMove`] - why a requested move was rejected
//! - [`shared::ListError`] - engine result type, invalid move or database error
//! - `backend::BackendError` - HTTP-facing errors with status codes

/// Shared types and data structures
pub mod shared;

/// Spaced ordering engine
pub mod ordering;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;
