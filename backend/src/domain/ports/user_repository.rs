//! Driven port for user persistence.

use async_trait::async_trait;

use crate::domain::{EmailAddress, User, UserId};

use super::StoreError;

/// Storage contract for the user directory.
///
/// `save` upserts by id; reads return `None`/empty rather than erroring for
/// absent documents. Listing order is creation time, oldest first, so
/// responses are deterministic.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert or replace a user document by id.
    async fn save(&self, user: &User) -> Result<(), StoreError>;

    /// Fetch a user by id.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, StoreError>;

    /// Fetch a user by email (exact match).
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, StoreError>;

    /// Remove a user document. Returns whether a document existed.
    async fn delete(&self, id: &UserId) -> Result<bool, StoreError>;

    /// Public, non-banned profiles, optionally filtered by an exact skill
    /// match against either skill list.
    async fn list_browsable(&self, skill: Option<&str>) -> Result<Vec<User>, StoreError>;

    /// All banned users.
    async fn list_banned(&self) -> Result<Vec<User>, StoreError>;

    /// Counts of active (not banned) and banned users.
    async fn count_by_ban_state(&self) -> Result<(u64, u64), StoreError>;
}
