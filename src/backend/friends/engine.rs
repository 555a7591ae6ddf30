/**
 * Friend Request Engine
 *
 * The lifecycle of a friend request and the only code that writes friend
 * sets. Every operation takes the acting user as resolved by the
 * authentication gate.
 *
 * # Lifecycle
 *
 * ```text
 * send ──> pending ──accept──> accepted ──> (friends added, deleted)
 *             │
 *             ├──reject──> deleted
 *             └──cancel──> deleted
 * ```
 *
 * # Concurrency
 *
 * Accept first claims the request with a conditional update (`pending` or
 * an earlier interrupted `accepted` becomes `accepted`). Cancel and reject
 * only delete rows that are still `pending`. So of an accept racing a
 * cancel, exactly one wins and the other sees `NotFound`. Adding a friend
 * is idempotent, which makes a retried accept safe after a partial failure.
 */

use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use crate::backend::auth::users::User;
use crate::backend::error::BackendError;
use crate::backend::store::Stores;
use crate::shared::social::{
    FriendRequest, FriendRequestStatus, IncomingFriendRequest, OutgoingFriendRequest,
    PublicProfile,
};

const REQUEST_NOT_FOUND: &str = "Friend request not found";

fn request_not_found() -> BackendError {
    BackendError::not_found(REQUEST_NOT_FOUND)
}

/// Send a friend request from `actor` to `recipient_id`.
pub async fn send_request(
    stores: &Stores,
    actor: &User,
    recipient_id: Uuid,
) -> Result<FriendRequest, BackendError> {
    if recipient_id == actor.id {
        return Err(BackendError::invalid_input(
            "You cannot send a friend request to yourself",
        ));
    }

    let recipient = stores
        .users
        .find_by_id(recipient_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Recipient not found"))?;

    if stores
        .graph
        .find_open_between(actor.id, recipient.id)
        .await?
        .is_some()
    {
        return Err(BackendError::conflict("Friend request already exists"));
    }

    if actor.is_friend_of(recipient.id) || recipient.is_friend_of(actor.id) {
        return Err(BackendError::conflict("User is already a friend"));
    }

    // The store's pair uniqueness catches a concurrent send that slipped
    // past the check above.
    let request = stores
        .graph
        .create_request(FriendRequest::new(actor.id, recipient.id))
        .await?;

    tracing::info!(
        "Friend request {} sent from {} to {}",
        request.id,
        actor.id,
        recipient.id
    );
    Ok(request)
}

/// Withdraw a pending request. Only the sender may cancel.
pub async fn cancel_request(
    stores: &Stores,
    actor: &User,
    request_id: Uuid,
) -> Result<(), BackendError> {
    let request = stores
        .graph
        .find_request(request_id)
        .await?
        .filter(FriendRequest::is_pending)
        .ok_or_else(request_not_found)?;

    if request.sender != actor.id {
        tracing::warn!("User {} tried to cancel request {}", actor.id, request_id);
        return Err(BackendError::forbidden(
            "You are not authorized to cancel this request",
        ));
    }

    if !stores
        .graph
        .delete_request(request_id, FriendRequestStatus::Pending)
        .await?
    {
        return Err(request_not_found());
    }

    tracing::info!("Friend request {} cancelled", request_id);
    Ok(())
}

/// Accept a request addressed to `actor`. Returns the new friend.
pub async fn accept_request(
    stores: &Stores,
    actor: &User,
    request_id: Uuid,
) -> Result<PublicProfile, BackendError> {
    let request = stores
        .graph
        .find_request(request_id)
        .await?
        .filter(|r| r.status != FriendRequestStatus::Rejected)
        .ok_or_else(request_not_found)?;

    if request.recipient != actor.id {
        tracing::warn!("User {} tried to accept request {}", actor.id, request_id);
        return Err(BackendError::forbidden(
            "You are not authorized to accept this request",
        ));
    }

    let sender = stores
        .users
        .find_by_id(request.sender)
        .await?
        .ok_or_else(|| BackendError::not_found("User not found"))?;

    if !stores.graph.claim_for_accept(request_id, actor.id).await? {
        return Err(request_not_found());
    }

    stores.graph.add_friend(actor.id, sender.id).await?;
    stores.graph.add_friend(sender.id, actor.id).await?;

    // A concurrent retry may already have removed it.
    stores
        .graph
        .delete_request(request_id, FriendRequestStatus::Accepted)
        .await?;

    tracing::info!("Users {} and {} are now friends", sender.id, actor.id);
    Ok(sender.to_public())
}

/// Decline a pending request addressed to `actor`. Returns the sender.
pub async fn reject_request(
    stores: &Stores,
    actor: &User,
    request_id: Uuid,
) -> Result<PublicProfile, BackendError> {
    let request = stores
        .graph
        .find_request(request_id)
        .await?
        .filter(FriendRequest::is_pending)
        .ok_or_else(request_not_found)?;

    if request.recipient != actor.id {
        tracing::warn!("User {} tried to reject request {}", actor.id, request_id);
        return Err(BackendError::forbidden(
            "You are not authorized to reject this request",
        ));
    }

    let sender = stores
        .users
        .find_by_id(request.sender)
        .await?
        .ok_or_else(|| BackendError::not_found("User not found"))?;

    if !stores
        .graph
        .delete_request(request_id, FriendRequestStatus::Pending)
        .await?
    {
        return Err(request_not_found());
    }

    tracing::info!("Friend request {} rejected", request_id);
    Ok(sender.to_public())
}

/// Users `actor` could send a request to: everyone except themself, their
/// friends, and anyone they already have a request with.
pub async fn recommendations(
    stores: &Stores,
    actor: &User,
) -> Result<Vec<PublicProfile>, BackendError> {
    let engaged: HashSet<Uuid> = stores
        .graph
        .open_for_user(actor.id)
        .await?
        .iter()
        .map(|r| r.counterpart_of(actor.id))
        .collect();

    let users = stores.users.list_except(actor.id).await?;
    Ok(users
        .iter()
        .filter(|u| !actor.is_friend_of(u.id) && !u.is_friend_of(actor.id))
        .filter(|u| !engaged.contains(&u.id))
        .map(User::to_public)
        .collect())
}

/// `actor`'s friends, ordered by name.
pub async fn friends_of(stores: &Stores, actor: &User) -> Result<Vec<PublicProfile>, BackendError> {
    let ids: Vec<Uuid> = actor.friends.iter().copied().collect();
    let mut friends: Vec<PublicProfile> = stores
        .users
        .find_many(&ids)
        .await?
        .iter()
        .map(User::to_public)
        .collect();
    friends.sort_by(|a, b| a.full_name.cmp(&b.full_name).then(a.id.cmp(&b.id)));
    Ok(friends)
}

async fn profiles_by_id(
    stores: &Stores,
    ids: Vec<Uuid>,
) -> Result<HashMap<Uuid, PublicProfile>, BackendError> {
    Ok(stores
        .users
        .find_many(&ids)
        .await?
        .iter()
        .map(|u| (u.id, u.to_public()))
        .collect())
}

/// Pending requests addressed to `actor`, newest first, with senders joined.
pub async fn incoming_pending(
    stores: &Stores,
    actor: &User,
) -> Result<Vec<IncomingFriendRequest>, BackendError> {
    let requests = stores.graph.pending_for_recipient(actor.id).await?;
    let senders = profiles_by_id(stores, requests.iter().map(|r| r.sender).collect()).await?;

    Ok(requests
        .into_iter()
        .filter_map(|r| {
            let sender = senders.get(&r.sender).cloned();
            if sender.is_none() {
                tracing::warn!("Request {} names unknown sender {}", r.id, r.sender);
            }
            sender.map(|sender| IncomingFriendRequest {
                id: r.id,
                sender,
                recipient: r.recipient,
                status: r.status,
                created_at: r.created_at,
            })
        })
        .collect())
}

/// Pending requests sent by `actor`, newest first, with recipients joined.
pub async fn outgoing_pending(
    stores: &Stores,
    actor: &User,
) -> Result<Vec<OutgoingFriendRequest>, BackendError> {
    let requests = stores.graph.pending_for_sender(actor.id).await?;
    let recipients = profiles_by_id(stores, requests.iter().map(|r| r.recipient).collect()).await?;

    Ok(requests
        .into_iter()
        .filter_map(|r| {
            let recipient = recipients.get(&r.recipient).cloned();
            if recipient.is_none() {
                tracing::warn!("Request {} names unknown recipient {}", r.id, r.recipient);
            }
            recipient.map(|recipient| OutgoingFriendRequest {
                id: r.id,
                sender: r.sender,
                recipient,
                status: r.status,
                created_at: r.created_at,
            })
        })
        .collect())
}
