//! Driving port for admin moderation.

use async_trait::async_trait;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{Error, User, UserId};

/// Aggregate swap counts for the admin dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SwapStats {
    pub total: u64,
    pub pending: u64,
    pub accepted: u64,
}

/// Aggregate user counts for the admin dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub active: u64,
    pub banned: u64,
}

/// Moderation use-cases. Every operation takes the acting user and fails
/// with `Forbidden` unless that user holds the admin role.
#[async_trait]
pub trait AdminModeration: Send + Sync {
    /// Set the banned flag on a user. Does not delete anything.
    async fn ban(&self, actor: &UserId, user: &UserId) -> Result<User, Error>;

    /// Clear the banned flag on a user.
    async fn unban(&self, actor: &UserId, user: &UserId) -> Result<User, Error>;

    /// List all banned users.
    async fn banned_users(&self, actor: &UserId) -> Result<Vec<User>, Error>;

    /// Remove a user and cascade: every swap and feedback record naming the
    /// user as either party is removed, and the aggregates of ratees who
    /// lost feedback are recomputed. There is no soft delete or undo.
    async fn delete_user(&self, actor: &UserId, user: &UserId) -> Result<(), Error>;

    /// Counts of total/pending/accepted swaps.
    async fn swap_stats(&self, actor: &UserId) -> Result<SwapStats, Error>;

    /// Counts of active/banned users.
    async fn user_stats(&self, actor: &UserId) -> Result<UserStats, Error>;
}
