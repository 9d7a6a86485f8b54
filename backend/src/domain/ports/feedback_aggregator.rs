//! Driving port for feedback submission and rating aggregation.

use async_trait::async_trait;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{Error, Feedback, PublicProfile, Rating, SwapId, UserId};

/// Input for leaving feedback. The rater comes from the authenticated
/// identity, never from the request body.
#[derive(Debug, Clone)]
pub struct NewFeedback {
    pub swap_id: SwapId,
    pub from: UserId,
    pub to: UserId,
    pub rating: Rating,
    pub comment: String,
}

/// Feedback with the rater's public profile attached.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackWithRater {
    #[serde(flatten)]
    pub feedback: Feedback,
    pub rater_profile: Option<PublicProfile>,
}

/// Use-cases around feedback and the derived aggregate rating.
#[async_trait]
pub trait FeedbackAggregator: Send + Sync {
    /// Store feedback for a completed swap and recompute the ratee's
    /// aggregate rating from the full feedback set.
    async fn submit(&self, submission: NewFeedback) -> Result<Feedback, Error>;

    /// All feedback naming `user` as ratee, rater profiles attached.
    async fn list_for_user(&self, user: &UserId) -> Result<Vec<FeedbackWithRater>, Error>;
}
