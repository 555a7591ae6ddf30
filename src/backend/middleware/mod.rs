//! Middleware Module
//!
//! This module contains the HTTP middleware of the backend server.
//!
//! # Architecture
//!
//! The middleware module currently provides:
//!
//! - **`auth`** - The authentication gate for protected routes
//!
//! # Example
//!
//! ```rust,no_run
//! use axum::{middleware, Router};
//! use shuvomedia::backend::middleware::auth_middleware;
//! use shuvomedia::backend::server::state::AppState;
//!
//! fn protect(state: AppState, routes: Router<AppState>) -> Router<AppState> {
//!     routes.route_layer(middleware::from_fn_with_state(state, auth_middleware))
//! }
//! ```

pub mod auth;

pub use auth::{auth_middleware, authenticate, AuthUser, Identity};
