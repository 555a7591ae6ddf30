//! Social Graph Types
//!
//! Profiles, friend requests, chat groups and the response envelopes of
//! the user and chat APIs.

pub mod friend_request;
pub mod group;
pub mod profile;

pub use friend_request::{
    AcceptFriendRequestResponse, FriendRequest, FriendRequestStatus, IncomingFriendRequest,
    ListFriendRequestsResponse, ListFriendsResponse, ListOutgoingRequestsResponse,
    OutgoingFriendRequest, RecommendationsResponse, RejectFriendRequestResponse,
    SendFriendRequestResponse,
};
pub use group::{
    Group, GroupResponse, GroupUpdate, GroupView, ListGroupsResponse, DEFAULT_GROUP_IMAGE,
};
pub use profile::{ProfileUpdate, PublicProfile, RelationshipStatus, Role, UserProfile};
