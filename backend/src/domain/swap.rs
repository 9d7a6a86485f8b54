//! Swap request entity and status lifecycle.
//!
//! ## Lifecycle
//! Every swap starts `pending`. Transitions are one-directional:
//!
//! ```text
//! pending  -> accepted | rejected | cancelled | completed
//! accepted -> completed | cancelled
//! ```
//!
//! `rejected`, `cancelled`, and `completed` are terminal, and `pending` is
//! never a valid target. Transitions only happen through explicit user
//! actions; there is no timeout-based expiry.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::UserId;

/// Stable swap identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct SwapId(Uuid);

impl SwapId {
    /// Wrap an existing UUID.
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SwapId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The five swap lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SwapStatus {
    Pending,
    Accepted,
    Rejected,
    Cancelled,
    Completed,
}

impl SwapStatus {
    /// Parse a wire value; anything outside the five-value set is rejected.
    pub fn parse(raw: &str) -> Result<Self, InvalidStatus> {
        match raw {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            "cancelled" => Ok(Self::Cancelled),
            "completed" => Ok(Self::Completed),
            other => Err(InvalidStatus {
                value: other.to_owned(),
            }),
        }
    }

    /// Whether no further transitions are allowed out of this state.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Rejected | Self::Cancelled | Self::Completed)
    }

    /// Wire representation (lowercase).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for SwapStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A status string outside the allowed five-value set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid swap status: {value:?}")]
pub struct InvalidStatus {
    pub value: String,
}

/// A transition the lifecycle does not permit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cannot transition swap from {from} to {to}")]
pub struct InvalidTransition {
    pub from: SwapStatus,
    pub to: SwapStatus,
}

/// A proposed or executed exchange of one user's offered skill for another's.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SwapRequest {
    pub id: SwapId,
    pub requester: UserId,
    pub receiver: UserId,
    pub skill_offered: String,
    pub skill_wanted: String,
    pub message: String,
    pub status: SwapStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SwapRequest {
    /// Apply a one-directional status transition, touching `updated_at`.
    ///
    /// Returns [`InvalidTransition`] when the current state does not admit
    /// the target; the stored status is left unchanged in that case.
    pub fn transition(
        &mut self,
        target: SwapStatus,
        now: DateTime<Utc>,
    ) -> Result<(), InvalidTransition> {
        let allowed = match (self.status, target) {
            // A swap can never return to pending.
            (_, SwapStatus::Pending) => false,
            (SwapStatus::Pending, _) => true,
            (SwapStatus::Accepted, SwapStatus::Completed | SwapStatus::Cancelled) => true,
            _ => false,
        };
        if !allowed {
            return Err(InvalidTransition {
                from: self.status,
                to: target,
            });
        }
        self.status = target;
        self.updated_at = now;
        Ok(())
    }
}
