//! Backend Error Module
//!
//! This module defines the error type returned by every handler and engine
//! operation, and its conversion into an HTTP response.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - IntoResponse implementation
//! ```
//!
//! # Propagation
//!
//! Validation problems are detected at the boundary and returned with their
//! specific kind. Failures of collaborators (store, media host, chat service)
//! arrive through `From` conversions and become `Internal`, whose detail is
//! logged and replaced by a generic message in the response.

pub mod types;

pub mod conversion;

pub use types::{BackendError, INTERNAL_MESSAGE};
