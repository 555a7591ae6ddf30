//! Custom assertion macros and utilities
//!
//! Provides assertions over the API's response envelopes.

use axum::http::StatusCode;
use axum_test::TestResponse;
use pretty_assertions::assert_eq;

/// Assert the status and the exact message of a response.
///
/// Success bodies carry `message`; error bodies carry `error` and `status`.
pub fn assert_message(response: &TestResponse, status: StatusCode, message: &str) {
    response.assert_status(status);
    let body: serde_json::Value = response.json();
    if status.is_success() {
        assert_eq!(body["message"].as_str(), Some(message), "body: {}", body);
    } else {
        assert_eq!(body["error"].as_str(), Some(message), "body: {}", body);
        assert_eq!(body["status"].as_u64(), Some(u64::from(status.as_u16())), "body: {}", body);
    }
}

/// Assert that a string contains a substring
#[macro_export]
macro_rules! assert_contains {
    ($haystack:expr, $needle:expr) => {
        assert!(
            $haystack.contains($needle),
            "Expected '{}' to contain '{}'",
            $haystack,
            $needle
        );
    };
}
