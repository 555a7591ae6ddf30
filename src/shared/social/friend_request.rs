//! Friend Request Data Structure
//!
//! Represents friend requests between users and the listing views the API
//! returns for them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::profile::PublicProfile;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum FriendRequestStatus {
    #[default]
    Pending,
    /// Claimed by the recipient; friend sets are being updated.
    Accepted,
    Rejected,
}

impl FriendRequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FriendRequestStatus::Pending => "pending",
            FriendRequestStatus::Accepted => "accepted",
            FriendRequestStatus::Rejected => "rejected",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(FriendRequestStatus::Pending),
            "accepted" => Some(FriendRequestStatus::Accepted),
            "rejected" => Some(FriendRequestStatus::Rejected),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FriendRequest {
    pub id: Uuid,
    pub sender: Uuid,
    pub recipient: Uuid,
    #[serde(default)]
    pub status: FriendRequestStatus,
    pub created_at: DateTime<Utc>,
}

impl FriendRequest {
    pub fn new(sender: Uuid, recipient: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender,
            recipient,
            status: FriendRequestStatus::Pending,
            created_at: Utc::now(),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == FriendRequestStatus::Pending
    }

    /// Whether this request is between `a` and `b`, in either direction.
    pub fn involves_pair(&self, a: Uuid, b: Uuid) -> bool {
        (self.sender == a && self.recipient == b) || (self.sender == b && self.recipient == a)
    }

    /// The other party, seen from `user_id`.
    pub fn counterpart_of(&self, user_id: Uuid) -> Uuid {
        if self.sender == user_id {
            self.recipient
        } else {
            self.sender
        }
    }
}

/// A pending request addressed to the caller, with the sender joined in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IncomingFriendRequest {
    pub id: Uuid,
    pub sender: PublicProfile,
    pub recipient: Uuid,
    pub status: FriendRequestStatus,
    pub created_at: DateTime<Utc>,
}

/// A pending request sent by the caller, with the recipient joined in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OutgoingFriendRequest {
    pub id: Uuid,
    pub sender: Uuid,
    pub recipient: PublicProfile,
    pub status: FriendRequestStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendFriendRequestResponse {
    pub message: String,
    pub friend_request: FriendRequest,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcceptFriendRequestResponse {
    pub message: String,
    pub friend: PublicProfile,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectFriendRequestResponse {
    pub message: String,
    pub sender: PublicProfile,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFriendRequestsResponse {
    pub message: String,
    pub friend_requests: Vec<IncomingFriendRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOutgoingRequestsResponse {
    pub message: String,
    pub outgoing_requests: Vec<OutgoingFriendRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListFriendsResponse {
    pub message: String,
    pub friends: Vec<PublicProfile>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationsResponse {
    pub message: String,
    pub users: Vec<PublicProfile>,
}
