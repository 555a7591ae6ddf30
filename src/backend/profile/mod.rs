//! Profile Module
//!
//! Reading and updating user profiles. Updates accept JSON or a multipart
//! form with an avatar, see `form`.

pub mod form;
pub mod handlers;

pub use form::{Avatar, ProfileForm, MAX_AVATAR_BYTES};
pub use handlers::{get_me, get_profile, update_profile, ProfileResponse};
