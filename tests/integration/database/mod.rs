//! Database integration tests

mod concurrency_test;
