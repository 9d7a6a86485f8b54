//! In-memory document store.
//!
//! One `RwLock`-guarded collection per entity, keyed by id. Each repository
//! call takes the lock once, so individual operations are atomic and two
//! concurrent writers to the same document race last-write-wins — the same
//! guarantee (and the same gap) a per-document store would give. Listings
//! are sorted by creation time so responses stay deterministic.
//!
//! Clones share the same underlying collections; hand each component a clone
//! rather than reaching for a global.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{FeedbackRepository, StoreError, SwapRepository, UserRepository};
use crate::domain::{
    EmailAddress, Feedback, FeedbackId, SwapId, SwapRequest, SwapStatus, User, UserId,
};

#[derive(Default)]
struct Collections {
    users: RwLock<HashMap<UserId, User>>,
    swaps: RwLock<HashMap<SwapId, SwapRequest>>,
    feedback: RwLock<HashMap<FeedbackId, Feedback>>,
}

/// Shared in-memory store implementing all three repository ports.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Collections>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn sorted_by_creation<T, K: Ord>(mut items: Vec<T>, key: impl Fn(&T) -> K) -> Vec<T> {
    items.sort_by_key(key);
    items
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn save(&self, user: &User) -> Result<(), StoreError> {
        self.inner.users.write().await.insert(user.id, user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, StoreError> {
        Ok(self.inner.users.read().await.get(id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, StoreError> {
        Ok(self
            .inner
            .users
            .read()
            .await
            .values()
            .find(|u| &u.email == email)
            .cloned())
    }

    async fn delete(&self, id: &UserId) -> Result<bool, StoreError> {
        Ok(self.inner.users.write().await.remove(id).is_some())
    }

    async fn list_browsable(&self, skill: Option<&str>) -> Result<Vec<User>, StoreError> {
        let users = self.inner.users.read().await;
        let matching = users
            .values()
            .filter(|u| u.is_browsable())
            .filter(|u| skill.is_none_or(|s| u.offers_or_wants(s)))
            .cloned()
            .collect();
        Ok(sorted_by_creation(matching, |u| (u.created_at, u.id)))
    }

    async fn list_banned(&self) -> Result<Vec<User>, StoreError> {
        let users = self.inner.users.read().await;
        let banned = users.values().filter(|u| u.banned).cloned().collect();
        Ok(sorted_by_creation(banned, |u| (u.created_at, u.id)))
    }

    async fn count_by_ban_state(&self) -> Result<(u64, u64), StoreError> {
        let users = self.inner.users.read().await;
        let banned = users.values().filter(|u| u.banned).count() as u64;
        let active = users.len() as u64 - banned;
        Ok((active, banned))
    }
}

#[async_trait]
impl SwapRepository for MemoryStore {
    async fn save(&self, swap: &SwapRequest) -> Result<(), StoreError> {
        self.inner.swaps.write().await.insert(swap.id, swap.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &SwapId) -> Result<Option<SwapRequest>, StoreError> {
        Ok(self.inner.swaps.read().await.get(id).cloned())
    }

    async fn list_for_user(&self, user: &UserId) -> Result<Vec<SwapRequest>, StoreError> {
        let swaps = self.inner.swaps.read().await;
        let involved = swaps
            .values()
            .filter(|s| &s.requester == user || &s.receiver == user)
            .cloned()
            .collect();
        Ok(sorted_by_creation(involved, |s| (s.created_at, s.id)))
    }

    async fn exists_between(
        &self,
        requester: &UserId,
        receiver: &UserId,
    ) -> Result<bool, StoreError> {
        Ok(self
            .inner
            .swaps
            .read()
            .await
            .values()
            .any(|s| &s.requester == requester && &s.receiver == receiver))
    }

    async fn delete_for_user(&self, user: &UserId) -> Result<u64, StoreError> {
        let mut swaps = self.inner.swaps.write().await;
        let before = swaps.len();
        swaps.retain(|_, s| &s.requester != user && &s.receiver != user);
        Ok((before - swaps.len()) as u64)
    }

    async fn count_with_status(&self, status: SwapStatus) -> Result<u64, StoreError> {
        Ok(self
            .inner
            .swaps
            .read()
            .await
            .values()
            .filter(|s| s.status == status)
            .count() as u64)
    }

    async fn count(&self) -> Result<u64, StoreError> {
        Ok(self.inner.swaps.read().await.len() as u64)
    }
}

#[async_trait]
impl FeedbackRepository for MemoryStore {
    async fn insert(&self, feedback: &Feedback) -> Result<(), StoreError> {
        self.inner
            .feedback
            .write()
            .await
            .insert(feedback.id, feedback.clone());
        Ok(())
    }

    async fn list_for_ratee(&self, user: &UserId) -> Result<Vec<Feedback>, StoreError> {
        let feedback = self.inner.feedback.read().await;
        let received = feedback
            .values()
            .filter(|f| &f.to == user)
            .cloned()
            .collect();
        Ok(sorted_by_creation(received, |f| (f.created_at, f.id)))
    }

    async fn delete_for_user(&self, user: &UserId) -> Result<Vec<Feedback>, StoreError> {
        let mut feedback = self.inner.feedback.write().await;
        let mut removed = Vec::new();
        feedback.retain(|_, f| {
            if &f.from == user || &f.to == user {
                removed.push(f.clone());
                false
            } else {
                true
            }
        });
        Ok(sorted_by_creation(removed, |f| (f.created_at, f.id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use crate::domain::auth::hash_password;
    use crate::domain::{Availability, NewUser};

    fn user(email: &str) -> User {
        NewUser {
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
        .into_user(UserId::random(), Utc::now())
    }

    #[tokio::test]
    async fn clones_share_collections() {
        let store = MemoryStore::new();
        let clone = store.clone();
        let u = user("ada@example.com");
        UserRepository::save(&store, &u).await.expect("save");
        let found = UserRepository::find_by_id(&clone, &u.id)
            .await
            .expect("lookup");
        assert_eq!(found.map(|f| f.id), Some(u.id));
    }

    #[tokio::test]
    async fn save_is_an_upsert() {
        let store = MemoryStore::new();
        let mut u = user("ada@example.com");
        UserRepository::save(&store, &u).await.expect("insert");
        u.name = "Renamed".into();
        UserRepository::save(&store, &u).await.expect("replace");
        let found = UserRepository::find_by_id(&store, &u.id)
            .await
            .expect("lookup")
            .expect("exists");
        assert_eq!(found.name, "Renamed");
    }

    #[tokio::test]
    async fn email_lookup_is_exact() {
        let store = MemoryStore::new();
        let u = user("ada@example.com");
        UserRepository::save(&store, &u).await.expect("save");
        let email = EmailAddress::new("Ada@example.com").expect("valid email");
        assert!(UserRepository::find_by_email(&store, &email)
            .await
            .expect("lookup")
            .is_none());
    }

    #[tokio::test]
    async fn exists_between_is_directional() {
        let store = MemoryStore::new();
        let a = UserId::random();
        let b = UserId::random();
        let now = Utc::now();
        let swap = SwapRequest {
            id: SwapId::random(),
            requester: a,
            receiver: b,
            skill_offered: "Guitar".into(),
            skill_wanted: "Spanish".into(),
            message: String::new(),
            status: SwapStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        SwapRepository::save(&store, &swap).await.expect("save");
        assert!(store.exists_between(&a, &b).await.expect("query"));
        assert!(!store.exists_between(&b, &a).await.expect("query"));
    }
}
