//! Swap lifecycle service.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{
    NewSwapRequest, SwapLifecycle, SwapRepository, SwapWithParties, UserRepository,
};
use crate::domain::{Error, PublicProfile, SwapId, SwapRequest, SwapStatus, UserId};

/// Implements [`SwapLifecycle`] over the swap and user stores.
#[derive(Clone)]
pub struct SwapService<S, U> {
    swaps: Arc<S>,
    users: Arc<U>,
}

impl<S, U> SwapService<S, U> {
    /// Create the service over the given stores.
    pub fn new(swaps: Arc<S>, users: Arc<U>) -> Self {
        Self { swaps, users }
    }
}

impl<S, U> SwapService<S, U>
where
    S: SwapRepository,
    U: UserRepository,
{
    async fn profile_of(&self, id: &UserId) -> Result<Option<PublicProfile>, Error> {
        Ok(self.users.find_by_id(id).await?.map(PublicProfile::from))
    }
}

#[async_trait]
impl<S, U> SwapLifecycle for SwapService<S, U>
where
    S: SwapRepository,
    U: UserRepository,
{
    async fn request(&self, request: NewSwapRequest) -> Result<SwapRequest, Error> {
        if request.requester == request.receiver {
            return Err(Error::invalid_request("cannot request a swap with yourself")
                .with_details(json!({ "field": "receiver", "code": "self_swap" })));
        }
        for (party, field) in [(&request.requester, "requester"), (&request.receiver, "receiver")] {
            if self.users.find_by_id(party).await?.is_none() {
                return Err(Error::not_found(format!("{field} not found")));
            }
        }

        let now = Utc::now();
        let swap = SwapRequest {
            id: SwapId::random(),
            requester: request.requester,
            receiver: request.receiver,
            skill_offered: request.skill_offered,
            skill_wanted: request.skill_wanted,
            message: request.message,
            status: SwapStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        self.swaps.save(&swap).await?;
        info!(swap_id = %swap.id, requester = %swap.requester, receiver = %swap.receiver, "swap requested");
        Ok(swap)
    }

    async fn list_for_user(&self, user: &UserId) -> Result<Vec<SwapWithParties>, Error> {
        let swaps = self.swaps.list_for_user(user).await?;
        let mut out = Vec::with_capacity(swaps.len());
        for swap in swaps {
            let requester_profile = self.profile_of(&swap.requester).await?;
            let receiver_profile = self.profile_of(&swap.receiver).await?;
            out.push(SwapWithParties {
                swap,
                requester_profile,
                receiver_profile,
            });
        }
        Ok(out)
    }

    async fn update_status(&self, id: &SwapId, target: SwapStatus) -> Result<SwapRequest, Error> {
        let mut swap = self
            .swaps
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found("swap not found"))?;
        swap.transition(target, Utc::now()).map_err(|err| {
            Error::invalid_request(err.to_string()).with_details(json!({
                "from": err.from.as_str(),
                "to": err.to.as_str(),
                "code": "invalid_transition",
            }))
        })?;
        self.swaps.save(&swap).await?;
        info!(swap_id = %swap.id, status = %swap.status, "swap status updated");
        Ok(swap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::auth::hash_password;
    use crate::domain::{Availability, EmailAddress, ErrorCode, NewUser};
    use crate::outbound::persistence::MemoryStore;

    async fn seeded_user(store: &MemoryStore, email: &str) -> UserId {
        let user = NewUser {
            name: "Someone".into(),
            email: EmailAddress::new(email).expect("valid email"),
            password_hash: hash_password("secret"),
            location: None,
            profile_photo: None,
            skills_offered: vec!["Guitar".into()],
            skills_wanted: vec![],
            availability: Availability::default(),
            is_public: true,
        }
        .into_user(UserId::random(), Utc::now());
        UserRepository::save(store, &user).await.expect("seed user");
        user.id
    }

    fn service(store: &MemoryStore) -> SwapService<MemoryStore, MemoryStore> {
        SwapService::new(Arc::new(store.clone()), Arc::new(store.clone()))
    }

    fn new_request(requester: UserId, receiver: UserId) -> NewSwapRequest {
        NewSwapRequest {
            requester,
            receiver,
            skill_offered: "Guitar".into(),
            skill_wanted: "Spanish".into(),
            message: "swap?".into(),
        }
    }

    #[tokio::test]
    async fn self_swap_is_rejected() {
        let store = MemoryStore::default();
        let user = seeded_user(&store, "a@example.com").await;
        let err = service(&store)
            .request(new_request(user, user))
            .await
            .expect_err("self swap");
        assert_eq!(err.code, ErrorCode::InvalidRequest);
    }

    #[tokio::test]
    async fn unknown_party_is_not_found() {
        let store = MemoryStore::default();
        let user = seeded_user(&store, "a@example.com").await;
        let err = service(&store)
            .request(new_request(user, UserId::random()))
            .await
            .expect_err("unknown receiver");
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn listing_attaches_both_parties() {
        let store = MemoryStore::default();
        let requester = seeded_user(&store, "a@example.com").await;
        let receiver = seeded_user(&store, "b@example.com").await;
        let swaps = service(&store);
        swaps
            .request(new_request(requester, receiver))
            .await
            .expect("swap created");

        for user in [requester, receiver] {
            let listed = swaps.list_for_user(&user).await.expect("listing");
            assert_eq!(listed.len(), 1);
            let entry = listed.first().expect("one swap");
            assert_eq!(
                entry.requester_profile.as_ref().map(|p| p.id),
                Some(requester)
            );
            assert_eq!(
                entry.receiver_profile.as_ref().map(|p| p.id),
                Some(receiver)
            );
        }
        let uninvolved = seeded_user(&store, "c@example.com").await;
        assert!(swaps
            .list_for_user(&uninvolved)
            .await
            .expect("listing")
            .is_empty());
    }

    #[tokio::test]
    async fn invalid_transition_leaves_status_unchanged() {
        let store = MemoryStore::default();
        let requester = seeded_user(&store, "a@example.com").await;
        let receiver = seeded_user(&store, "b@example.com").await;
        let swaps = service(&store);
        let swap = swaps
            .request(new_request(requester, receiver))
            .await
            .expect("swap created");
        swaps
            .update_status(&swap.id, SwapStatus::Rejected)
            .await
            .expect("reject");

        let err = swaps
            .update_status(&swap.id, SwapStatus::Accepted)
            .await
            .expect_err("terminal state");
        assert_eq!(err.code, ErrorCode::InvalidRequest);
        let stored = SwapRepository::find_by_id(&store, &swap.id)
            .await
            .expect("lookup")
            .expect("swap exists");
        assert_eq!(stored.status, SwapStatus::Rejected);
    }

    #[tokio::test]
    async fn unknown_swap_is_not_found() {
        let store = MemoryStore::default();
        let err = service(&store)
            .update_status(&SwapId::random(), SwapStatus::Accepted)
            .await
            .expect_err("unknown swap");
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
