//! Server Module
//!
//! Everything needed to go from environment variables to a running Axum
//! router.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── config.rs       - Configuration loading and validation
//! ├── state.rs        - AppState and its builder methods
//! └── init.rs         - Store selection, integrations, app creation
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use shuvomedia::backend::server::{config::ServerConfig, create_app};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let app = create_app(&config).await?;
//! # Ok(())
//! # }
//! ```

/// Application state management
pub mod state;

/// Server configuration loading
pub mod config;

/// Server initialization
pub mod init;

pub use config::ServerConfig;
pub use init::{build_state, create_app, StartupError};
pub use state::AppState;
