//! Driven port for swap-request persistence.

use async_trait::async_trait;

use crate::domain::{SwapId, SwapRequest, SwapStatus, UserId};

use super::StoreError;

/// Storage contract for swap requests.
#[async_trait]
pub trait SwapRepository: Send + Sync {
    /// Insert or replace a swap document by id.
    async fn save(&self, swap: &SwapRequest) -> Result<(), StoreError>;

    /// Fetch a swap by id.
    async fn find_by_id(&self, id: &SwapId) -> Result<Option<SwapRequest>, StoreError>;

    /// All swaps naming `user` as requester or receiver, oldest first.
    async fn list_for_user(&self, user: &UserId) -> Result<Vec<SwapRequest>, StoreError>;

    /// Whether a swap exists with the given requester and receiver.
    async fn exists_between(
        &self,
        requester: &UserId,
        receiver: &UserId,
    ) -> Result<bool, StoreError>;

    /// Remove every swap naming `user` as either party. Returns the number
    /// removed.
    async fn delete_for_user(&self, user: &UserId) -> Result<u64, StoreError>;

    /// Count swaps in the given status.
    async fn count_with_status(&self, status: SwapStatus) -> Result<u64, StoreError>;

    /// Count all swaps.
    async fn count(&self) -> Result<u64, StoreError>;
}
