//! Feedback entity and rating aggregation.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{Error, SwapId, UserId};

/// Stable feedback identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct FeedbackId(Uuid);

impl FeedbackId {
    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for FeedbackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Checked 1–5 rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "u8", into = "u8")]
// utoipa does not support minimum/maximum on unnamed-field structs; the 1-5
// range is enforced by `Rating::new` and the serde `try_from` boundary.
#[schema(value_type = u8, example = 4)]
pub struct Rating(u8);

impl Rating {
    /// Validate and construct a [`Rating`]. Values outside 1–5 are rejected
    /// at this boundary rather than trusted from the wire.
    pub fn new(value: u8) -> Result<Self, Error> {
        if (1..=5).contains(&value) {
            Ok(Self(value))
        } else {
            Err(Error::invalid_request("rating must be between 1 and 5")
                .with_details(json!({ "field": "rating", "code": "out_of_range" })))
        }
    }

    /// Numeric value.
    pub fn value(self) -> u8 {
        self.0
    }
}

impl From<Rating> for u8 {
    fn from(value: Rating) -> Self {
        value.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A rating and comment left for the ratee of a completed swap.
///
/// Immutable once stored; removed only by cascading user deletion.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id: FeedbackId,
    pub swap_id: SwapId,
    /// The feedback author.
    pub from: UserId,
    /// The feedback recipient.
    pub to: UserId,
    pub rating: Rating,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

/// Aggregate rating derived from a user's complete received-feedback set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingSummary {
    /// Arithmetic mean rounded to one decimal place; 0.0 when unreviewed.
    pub rating: f64,
    pub review_count: u32,
}

/// Compute the aggregate over the full set of received ratings.
///
/// Always a full recompute rather than an incremental running average: the
/// scan is cheap at this system's scale and cannot drift.
pub fn rating_summary(ratings: &[Rating]) -> RatingSummary {
    if ratings.is_empty() {
        return RatingSummary {
            rating: 0.0,
            review_count: 0,
        };
    }
    let sum: u32 = ratings.iter().map(|r| u32::from(r.value())).sum();
    let mean = f64::from(sum) / ratings.len() as f64;
    RatingSummary {
        rating: (mean * 10.0).round() / 10.0,
        review_count: ratings.len() as u32,
    }
}
