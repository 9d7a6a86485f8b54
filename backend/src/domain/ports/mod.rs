//! Domain ports.
//!
//! Driving ports (use-cases) are what inbound adapters call; driven ports
//! (repositories) are what the domain services call into storage through.
//! Adapters implement the driven side; services implement the driving side.

mod admin_moderation;
mod feedback_aggregator;
mod feedback_repository;
mod swap_lifecycle;
mod swap_repository;
mod user_directory;
mod user_repository;

pub use admin_moderation::{AdminModeration, SwapStats, UserStats};
pub use feedback_aggregator::{FeedbackAggregator, FeedbackWithRater, NewFeedback};
pub use feedback_repository::FeedbackRepository;
pub use swap_lifecycle::{NewSwapRequest, SwapLifecycle, SwapWithParties};
pub use swap_repository::SwapRepository;
pub use user_directory::UserDirectory;
pub use user_repository::UserRepository;

/// Errors raised by store adapters.
///
/// The in-memory adapter never fails, but the port keeps the error surface a
/// document-store adapter would need; services map these onto a 500.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The store could not be reached.
    #[error("store connection failed: {message}")]
    Connection { message: String },
    /// A query or mutation failed during execution.
    #[error("store query failed: {message}")]
    Query { message: String },
}

impl From<StoreError> for crate::domain::Error {
    fn from(error: StoreError) -> Self {
        crate::domain::Error::internal(error.to_string())
    }
}
