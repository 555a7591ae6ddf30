//! Backend Module
//!
//! All server-side code for the shuvomedia API: accounts and sessions,
//! profiles, the friend graph and the chat-service bridge.
//!
//! # Architecture
//!
//! - **`server`** - Configuration, application state, startup
//! - **`routes`** - Route tables and router assembly
//! - **`middleware`** - The authentication gate
//! - **`auth`** - Registration, login, session tokens and cookies
//! - **`profile`** - Reading and updating profiles, avatar forms
//! - **`friends`** - Friend requests, friend lists, recommendations
//! - **`chat`** - Chat identity sync and chat tokens
//! - **`integrations`** - Cloudinary and Stream HTTP clients
//! - **`store`** - User and friend-graph storage (Postgres or memory)
//! - **`error`** - `BackendError` and its HTTP mapping
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Server binary
//! ├── server/         - Config, state, initialization
//! ├── routes/         - Route configuration
//! ├── middleware/     - Authentication gate
//! ├── auth/           - Accounts and sessions
//! ├── profile/        - Profile handlers
//! ├── friends/        - Friend-graph engine and handlers
//! ├── chat/           - Chat bridge
//! ├── integrations/   - External services
//! ├── store/          - Storage traits and implementations
//! └── error/          - Error types
//! ```
//!
//! # Error Handling
//!
//! Handlers return `Result<_, BackendError>`. Every error renders as
//! `{"error": "...", "status": <code>}` with the matching status code;
//! internal failures are logged and answered with a generic message.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Chat-service bridge
pub mod chat;

/// Backend error types
pub mod error;

/// Authentication and user management
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// User profiles
pub mod profile;

/// Friend requests and friend lists
pub mod friends;

/// External service clients
pub mod integrations;

/// Storage
pub mod store;

pub use error::BackendError;
pub use routes::create_router;
pub use server::{create_app, AppState, ServerConfig};
