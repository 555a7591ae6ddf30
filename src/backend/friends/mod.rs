//! Friends Module
//!
//! Friend requests and the friend graph.
//!
//! - **`engine`** - Request lifecycle, recommendations and listings; the
//!   only writer of friend sets
//! - **`handlers`** - HTTP handlers for the `/api/user` friend routes

pub mod engine;
pub mod handlers;

pub use handlers::{
    accept_friend_request, cancel_friend_request, get_friend_requests, get_friends,
    get_outgoing_friend_requests, get_recommendations, reject_friend_request,
    send_friend_request,
};
