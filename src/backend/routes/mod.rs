//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation, body limit, tracing, CORS
//! ├── api_routes.rs   - `/api/user` account, profile and friend routes
//! └── chat_routes.rs  - `/api/chats` routes
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use shuvomedia::backend::routes::create_router;
//! use shuvomedia::backend::server::config::SigningSecret;
//! use shuvomedia::backend::server::state::AppState;
//! use shuvomedia::backend::store::Stores;
//!
//! let state = AppState::new(Stores::memory(), &SigningSecret::new("dev-secret"));
//! let router = create_router(state);
//! ```

/// Main router creation
pub mod router;

/// `/api/chats` routes
pub mod chat_routes;

/// `/api/user` routes
pub mod api_routes;

pub use router::{cors_layer, create_router};
