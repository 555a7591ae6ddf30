//! Shuvomedia - Social Graph Backend
//!
//! The API behind a small social network: email/password accounts with
//! cookie sessions, editable profiles with avatar uploads, a friend graph
//! driven by friend requests, and a bridge that mirrors users into an
//! external chat service and issues chat tokens.
//!
//! # Module Structure
//!
//! - **`shared`** - Wire types and validation shared by every layer
//!   - Public profiles, friend requests, profile updates
//!   - Input validation and its error type
//!
//! - **`backend`** - The Axum server
//!   - Routes, authentication gate, handlers
//!   - Postgres and in-memory stores
//!   - Cloudinary and Stream clients
//!
//! # Usage
//!
//! ```rust,no_run
//! use shuvomedia::backend::server::{create_app, ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let app = create_app(&config).await?;
//! let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! For tests and local development the router can run entirely in memory:
//!
//! ```rust,no_run
//! use shuvomedia::backend::routes::create_router;
//! use shuvomedia::backend::server::{config::SigningSecret, AppState};
//! use shuvomedia::backend::store::Stores;
//!
//! let app = create_router(AppState::new(Stores::memory(), &SigningSecret::new("dev")));
//! ```

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;
