//! Admin moderation service.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

use crate::domain::feedback::rating_summary;
use crate::domain::ports::{
    AdminModeration, FeedbackRepository, SwapRepository, SwapStats, UserRepository, UserStats,
};
use crate::domain::{Error, Role, SwapStatus, User, UserId};

/// Implements [`AdminModeration`] over all three stores.
#[derive(Clone)]
pub struct ModerationService<U, S, F> {
    users: Arc<U>,
    swaps: Arc<S>,
    feedback: Arc<F>,
}

impl<U, S, F> ModerationService<U, S, F> {
    /// Create the service over the given stores.
    pub fn new(users: Arc<U>, swaps: Arc<S>, feedback: Arc<F>) -> Self {
        Self {
            users,
            swaps,
            feedback,
        }
    }
}

impl<U, S, F> ModerationService<U, S, F>
where
    U: UserRepository,
    S: SwapRepository,
    F: FeedbackRepository,
{
    async fn require_admin(&self, actor: &UserId) -> Result<(), Error> {
        let is_admin = self
            .users
            .find_by_id(actor)
            .await?
            .is_some_and(|u| u.role == Role::Admin);
        if is_admin {
            Ok(())
        } else {
            Err(Error::forbidden("admin access required"))
        }
    }

    async fn set_banned(&self, user: &UserId, banned: bool) -> Result<User, Error> {
        let mut user = self
            .users
            .find_by_id(user)
            .await?
            .ok_or_else(|| Error::not_found("user not found"))?;
        user.banned = banned;
        user.updated_at = Utc::now();
        self.users.save(&user).await?;
        Ok(user)
    }
}

#[async_trait]
impl<U, S, F> AdminModeration for ModerationService<U, S, F>
where
    U: UserRepository,
    S: SwapRepository,
    F: FeedbackRepository,
{
    async fn ban(&self, actor: &UserId, user: &UserId) -> Result<User, Error> {
        self.require_admin(actor).await?;
        let user = self.set_banned(user, true).await?;
        info!(user_id = %user.id, "user banned");
        Ok(user)
    }

    async fn unban(&self, actor: &UserId, user: &UserId) -> Result<User, Error> {
        self.require_admin(actor).await?;
        let user = self.set_banned(user, false).await?;
        info!(user_id = %user.id, "user unbanned");
        Ok(user)
    }

    async fn banned_users(&self, actor: &UserId) -> Result<Vec<User>, Error> {
        self.require_admin(actor).await?;
        Ok(self.users.list_banned().await?)
    }

    async fn delete_user(&self, actor: &UserId, user: &UserId) -> Result<(), Error> {
        self.require_admin(actor).await?;
        if !self.users.delete(user).await? {
            return Err(Error::not_found("user not found"));
        }
        let removed_swaps = self.swaps.delete_for_user(user).await?;
        let removed_feedback = self.feedback.delete_for_user(user).await?;

        // Feedback authored by the deleted user changes other users'
        // aggregates; bring those back in line with the remaining set.
        let affected: BTreeSet<UserId> = removed_feedback
            .iter()
            .map(|f| f.to)
            .filter(|ratee| ratee != user)
            .collect();
        for ratee in affected {
            let Some(mut ratee_user) = self.users.find_by_id(&ratee).await? else {
                continue;
            };
            let ratings: Vec<_> = self
                .feedback
                .list_for_ratee(&ratee)
                .await?
                .iter()
                .map(|f| f.rating)
                .collect();
            let summary = rating_summary(&ratings);
            ratee_user.rating = summary.rating;
            ratee_user.review_count = summary.review_count;
            ratee_user.updated_at = Utc::now();
            self.users.save(&ratee_user).await?;
        }

        info!(
            user_id = %user,
            removed_swaps,
            removed_feedback = removed_feedback.len(),
            "user deleted with cascade"
        );
        Ok(())
    }

    async fn swap_stats(&self, actor: &UserId) -> Result<SwapStats, Error> {
        self.require_admin(actor).await?;
        Ok(SwapStats {
            total: self.swaps.count().await?,
            pending: self.swaps.count_with_status(SwapStatus::Pending).await?,
            accepted: self.swaps.count_with_status(SwapStatus::Accepted).await?,
        })
    }

    async fn user_stats(&self, actor: &UserId) -> Result<UserStats, Error> {
        self.require_admin(actor).await?;
        let (active, banned) = self.users.count_by_ban_state().await?;
        Ok(UserStats { active, banned })
    }
}
