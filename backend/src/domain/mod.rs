//! Domain entities, services, and ports.
//!
//! Everything here is transport agnostic: inbound adapters translate these
//! types to and from HTTP, and outbound adapters implement the driven ports
//! against a concrete store.

pub mod auth;
pub mod directory;
pub mod error;
pub mod feedback;
pub mod feedback_service;
pub mod moderation;
pub mod ports;
pub mod swap;
pub mod swaps;
pub mod user;

pub use self::directory::DirectoryService;
pub use self::error::{Error, ErrorCode};
pub use self::feedback::{Feedback, FeedbackId, Rating, RatingSummary};
pub use self::feedback_service::FeedbackService;
pub use self::moderation::ModerationService;
pub use self::swap::{InvalidStatus, InvalidTransition, SwapId, SwapRequest, SwapStatus};
pub use self::swaps::SwapService;
pub use self::user::{
    Availability, EmailAddress, NewUser, ProfileUpdate, PublicProfile, Role, User, UserId,
};

/// Convenient result alias for domain operations.
pub type ApiResult<T> = Result<T, Error>;
