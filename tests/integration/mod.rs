//! Integration tests
//!
//! HTTP tests run against the full router with a private in-memory database.

pub mod database;
