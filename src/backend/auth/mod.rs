//! Authentication Module
//!
//! This module handles user registration, login and session management.
//!
//! # Architecture
//!
//! - **`users`** - Stored user record and its client-facing views
//! - **`password`** - bcrypt hashing on the blocking pool
//! - **`sessions`** - Signed session tokens (HS256, 15 days)
//! - **`cookies`** - The `token` session cookie
//! - **`handlers`** - HTTP handlers for register, login and logout
//!
//! # Authentication Flow
//!
//! 1. **Register**: details validated → user stored → token set in cookie
//! 2. **Login**: credentials verified → token set in cookie
//! 3. **Protected routes**: the gate in `middleware::auth` reads the cookie,
//!    verifies the token and loads the user
//!
//! # Security
//!
//! - Passwords are hashed with bcrypt and never serialized
//! - Tokens expire after 15 days, checked with zero leeway
//! - The cookie is HttpOnly, and Secure in production

pub mod cookies;
pub mod handlers;
pub mod password;
pub mod sessions;
pub mod users;

pub use cookies::SessionCookie;
pub use password::PasswordHasher;
pub use sessions::TokenCodec;
pub use users::User;
