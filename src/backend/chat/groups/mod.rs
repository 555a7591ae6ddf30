//! Chat Groups
//!
//! - **`engine`** - Group create, list and update, and the matching
//!   channel calls
//! - **`form`** - JSON or multipart request body with an optional image
//! - **`handlers`** - HTTP handlers for the `/api/chats/groups` routes

pub mod engine;
pub mod form;
pub mod handlers;

pub use form::GroupForm;
pub use handlers::{create_group, get_groups, update_group};
