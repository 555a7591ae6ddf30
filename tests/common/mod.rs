//! Common test utilities and helpers
//!
//! This module provides shared utilities for all tests including:
//! - Test servers over the in-memory store
//! - Authentication test helpers
//! - Recording media and chat services
//! - Custom assertion macros

pub mod assertions;
pub mod auth_helpers;
pub mod fakes;

// Re-export commonly used utilities
pub use auth_helpers::*;
