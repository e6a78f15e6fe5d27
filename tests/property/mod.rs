//! Property-based tests
//!
//! Random sequences of list operations checked against a plain `Vec` model.
