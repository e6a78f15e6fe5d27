//! Custom assertion macros and utilities
//!
//! Provides enhanced assertion macros for better test output and
//! more descriptive error messages.

/// Assert that a result is ok and return the value
///
/// This macro unwraps a Result, providing a better error message
/// if the result is an error.
#[macro_export]
macro_rules! assert_ok {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
    ($result:expr, $message:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("{}: {:?}", $message, e),
        }
    };
}

/// Assert that positions are strictly increasing
#[macro_export]
macro_rules! assert_strictly_ordered {
    ($positions:expr) => {
        let positions: &[i64] = &$positions;
        for pair in positions.windows(2) {
            assert!(
                pair[0] < pair[1],
                "Positions are not strictly increasing: {:?}",
                positions
            );
        }
    };
}
