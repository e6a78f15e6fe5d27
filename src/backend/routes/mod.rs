//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation
//! └── api_routes.rs   - Category and channel endpoints
//! ```
//!
//! # Route Organization
//!
//! 1. **Health** - `GET /health`
//! 2. **API Routes** - ordered categories and channels per community
//! 3. **Fallback Handler** - JSON 404 for everything else
//!
//! All routes share [`AppState`](crate::backend::server::AppState) and are
//! wrapped in a tracing layer.

/// Main router creation
pub mod router;

/// API endpoint handlers
pub mod api_routes;

// Re-export commonly used functions
pub use router::create_router;
