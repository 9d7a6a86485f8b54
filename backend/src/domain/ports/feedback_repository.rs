//! Driven port for feedback persistence.

use async_trait::async_trait;

use crate::domain::{Feedback, UserId};

use super::StoreError;

/// Storage contract for feedback records.
#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    /// Insert a feedback document. Feedback is immutable, so there is no
    /// update path.
    async fn insert(&self, feedback: &Feedback) -> Result<(), StoreError>;

    /// All feedback naming `user` as ratee, oldest first.
    async fn list_for_ratee(&self, user: &UserId) -> Result<Vec<Feedback>, StoreError>;

    /// Remove every feedback record naming `user` as either party, returning
    /// the removed records so callers can re-aggregate affected ratees.
    async fn delete_for_user(&self, user: &UserId) -> Result<Vec<Feedback>, StoreError>;
}
