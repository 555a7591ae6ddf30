//! Authentication Handlers Module
//!
//! This module contains the HTTP handlers for the public account endpoints.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs       - Module exports and documentation
//! ├── types.rs     - Request and response types
//! ├── register.rs  - User registration handler
//! ├── login.rs     - User authentication handler
//! └── logout.rs    - Session cookie removal
//! ```
//!
//! # Handlers
//!
//! - **`register`** - POST /api/user/register
//! - **`login`** - POST /api/user/login
//! - **`logout`** - POST /api/user/logout
//!
//! Register and login set the `token` cookie; logout expires it.

/// Request and response types
pub mod types;

/// Register handler
pub mod register;

/// Login handler
pub mod login;

/// Logout handler
pub mod logout;

pub use types::{AuthResponse, LoginRequest, MessageResponse, RegisterRequest};

pub use login::login;
pub use logout::logout;
pub use register::register;
