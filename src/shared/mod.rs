//! Shared Module
//!
//! This module contains the wire types of the HTTP API: profiles, friend
//! requests and their response envelopes, plus the input validation rules
//! a client can apply before sending a request.
//!
//! # Overview
//!
//! Nothing in here touches storage or the network. The backend builds these
//! values from its own records; clients deserialize them.

pub mod error;

pub mod validation;

pub mod social;

pub use error::SharedError;
pub use social::{FriendRequest, FriendRequestStatus, ProfileUpdate, PublicProfile, UserProfile};
