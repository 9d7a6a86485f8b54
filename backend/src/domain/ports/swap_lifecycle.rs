//! Driving port for the swap lifecycle.

use async_trait::async_trait;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{Error, PublicProfile, SwapId, SwapRequest, SwapStatus, UserId};

/// Input for creating a swap request. The requester comes from the
/// authenticated identity, never from the request body.
#[derive(Debug, Clone)]
pub struct NewSwapRequest {
    pub requester: UserId,
    pub receiver: UserId,
    pub skill_offered: String,
    pub skill_wanted: String,
    pub message: String,
}

/// A swap with both parties' public profiles attached.
///
/// A party is `None` only in the window where a cascading user deletion has
/// removed the profile but not yet this swap.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SwapWithParties {
    #[serde(flatten)]
    pub swap: SwapRequest,
    pub requester_profile: Option<PublicProfile>,
    pub receiver_profile: Option<PublicProfile>,
}

/// Use-cases around creating and transitioning swap requests.
#[async_trait]
pub trait SwapLifecycle: Send + Sync {
    /// Create a pending swap between two distinct, existing users.
    async fn request(&self, request: NewSwapRequest) -> Result<SwapRequest, Error>;

    /// All swaps naming `user` as either party, with profiles attached.
    async fn list_for_user(&self, user: &UserId) -> Result<Vec<SwapWithParties>, Error>;

    /// Apply an explicit status transition to a swap.
    async fn update_status(&self, id: &SwapId, target: SwapStatus) -> Result<SwapRequest, Error>;
}
