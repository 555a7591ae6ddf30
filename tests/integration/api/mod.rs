//! API integration tests
//!
//! Integration tests for all API endpoints

mod auth_test;
mod chat_test;
mod friends_test;
mod groups_test;
