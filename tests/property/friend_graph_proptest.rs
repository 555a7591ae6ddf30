//! Property tests for the friend graph
//!
//! Drives random sequences of send/cancel/accept/reject through the engine
//! and checks the graph after every step: friendship is symmetric, nobody
//! befriends themselves, and at most one request exists per pair.

use std::collections::HashSet;

use proptest::prelude::*;
use uuid::Uuid;

use shuvomedia::backend::auth::User;
use shuvomedia::backend::friends::engine;
use shuvomedia::backend::store::Stores;

const USERS: usize = 4;

#[derive(Debug, Clone)]
enum Op {
    Send(usize, usize),
    Cancel(usize, usize),
    Accept(usize, usize),
    Reject(usize, usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    let pair = (0..USERS, 0..USERS);
    prop_oneof![
        pair.clone().prop_map(|(a, b)| Op::Send(a, b)),
        pair.clone().prop_map(|(a, b)| Op::Cancel(a, b)),
        pair.clone().prop_map(|(a, b)| Op::Accept(a, b)),
        pair.prop_map(|(a, b)| Op::Reject(a, b)),
    ]
}

async fn load(stores: &Stores, id: Uuid) -> User {
    stores.users.find_by_id(id).await.unwrap().unwrap()
}

/// Run `op` with user `a` acting. Request-resolving ops act on whatever
/// request exists between `a` and `b`; engine errors are expected and
/// ignored, only the resulting graph is checked.
async fn apply(stores: &Stores, ids: &[Uuid], op: &Op) {
    let (a, b) = match op {
        Op::Send(a, b) | Op::Cancel(a, b) | Op::Accept(a, b) | Op::Reject(a, b) => (*a, *b),
    };
    let actor = load(stores, ids[a]).await;

    if let Op::Send(..) = op {
        let _ = engine::send_request(stores, &actor, ids[b]).await;
        return;
    }

    let Some(request) = stores.graph.find_open_between(ids[a], ids[b]).await.unwrap() else {
        return;
    };
    let _ = match op {
        Op::Cancel(..) => engine::cancel_request(stores, &actor, request.id).await.map(|_| ()),
        Op::Accept(..) => engine::accept_request(stores, &actor, request.id).await.map(|_| ()),
        Op::Reject(..) => engine::reject_request(stores, &actor, request.id).await.map(|_| ()),
        Op::Send(..) => Ok(()),
    };
}

async fn check_invariants(stores: &Stores, ids: &[Uuid]) {
    for &id in ids {
        let user = load(stores, id).await;
        assert!(!user.friends.contains(&id), "user {} befriended themselves", id);
        for &friend in &user.friends {
            let other = load(stores, friend).await;
            assert!(other.friends.contains(&id), "friendship {} -> {} is one-sided", id, friend);
        }

        let mut pairs = HashSet::new();
        for request in stores.graph.open_for_user(id).await.unwrap() {
            let pair = if request.sender < request.recipient {
                (request.sender, request.recipient)
            } else {
                (request.recipient, request.sender)
            };
            assert!(pairs.insert(pair), "more than one request for pair {:?}", pair);
            assert!(request.is_pending(), "resolved request {} left behind", request.id);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_friend_graph_stays_consistent(ops in prop::collection::vec(op_strategy(), 1..40)) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();

        runtime.block_on(async {
            let stores = Stores::memory();
            let mut ids = Vec::with_capacity(USERS);
            for i in 0..USERS {
                let user = User::new(
                    Uuid::new_v4(),
                    format!("User {}", i),
                    format!("user{}@example.com", i),
                    "hash".to_string(),
                );
                ids.push(user.id);
                stores.users.create(user).await.unwrap();
            }

            for op in &ops {
                apply(&stores, &ids, op).await;
                check_invariants(&stores, &ids).await;
            }
        });
    }
}
