//! Feedback service and rating aggregation.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{info, warn};

use crate::domain::feedback::{rating_summary, Feedback, FeedbackId};
use crate::domain::ports::{
    FeedbackAggregator, FeedbackRepository, FeedbackWithRater, NewFeedback, SwapRepository,
    UserRepository,
};
use crate::domain::{Error, PublicProfile, SwapStatus, UserId};

/// Implements [`FeedbackAggregator`] over the feedback, swap, and user stores.
#[derive(Clone)]
pub struct FeedbackService<F, S, U> {
    feedback: Arc<F>,
    swaps: Arc<S>,
    users: Arc<U>,
}

impl<F, S, U> FeedbackService<F, S, U> {
    /// Create the service over the given stores.
    pub fn new(feedback: Arc<F>, swaps: Arc<S>, users: Arc<U>) -> Self {
        Self {
            feedback,
            swaps,
            users,
        }
    }
}

impl<F, S, U> FeedbackService<F, S, U>
where
    F: FeedbackRepository,
    S: SwapRepository,
    U: UserRepository,
{
    /// Recompute `ratee`'s aggregate from the complete feedback set.
    ///
    /// Full recompute rather than a running average: correctness over
    /// performance at this scale.
    async fn reaggregate(&self, ratee: &UserId) -> Result<(), Error> {
        let Some(mut user) = self.users.find_by_id(ratee).await? else {
            // The ratee can vanish mid-flight via an admin cascade delete;
            // there is nothing left to update then.
            warn!(user_id = %ratee, "skipping rating recompute for absent user");
            return Ok(());
        };
        let ratings: Vec<_> = self
            .feedback
            .list_for_ratee(ratee)
            .await?
            .iter()
            .map(|f| f.rating)
            .collect();
        let summary = rating_summary(&ratings);
        user.rating = summary.rating;
        user.review_count = summary.review_count;
        user.updated_at = Utc::now();
        self.users.save(&user).await?;
        Ok(())
    }
}

#[async_trait]
impl<F, S, U> FeedbackAggregator for FeedbackService<F, S, U>
where
    F: FeedbackRepository,
    S: SwapRepository,
    U: UserRepository,
{
    async fn submit(&self, submission: NewFeedback) -> Result<Feedback, Error> {
        let swap = self
            .swaps
            .find_by_id(&submission.swap_id)
            .await?
            .ok_or_else(|| Error::not_found("swap not found"))?;
        if swap.status != SwapStatus::Completed {
            return Err(Error::invalid_request(
                "feedback requires a completed swap",
            ));
        }
        let parties_match = (submission.from == swap.requester && submission.to == swap.receiver)
            || (submission.from == swap.receiver && submission.to == swap.requester);
        if !parties_match {
            return Err(Error::forbidden(
                "feedback is restricted to the swap's participants",
            ));
        }

        let feedback = Feedback {
            id: FeedbackId::random(),
            swap_id: submission.swap_id,
            from: submission.from,
            to: submission.to,
            rating: submission.rating,
            comment: submission.comment,
            created_at: Utc::now(),
        };
        self.feedback.insert(&feedback).await?;
        self.reaggregate(&feedback.to).await?;
        info!(feedback_id = %feedback.id, ratee = %feedback.to, "feedback recorded");
        Ok(feedback)
    }

    async fn list_for_user(&self, user: &UserId) -> Result<Vec<FeedbackWithRater>, Error> {
        let records = self.feedback.list_for_ratee(user).await?;
        let mut out = Vec::with_capacity(records.len());
        for feedback in records {
            let rater_profile = self
                .users
                .find_by_id(&feedback.from)
                .await?
                .map(PublicProfile::from);
            out.push(FeedbackWithRater {
                feedback,
                rater_profile,
            });
        }
        Ok(out)
    }
}
