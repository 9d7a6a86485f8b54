//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{AdminModeration, FeedbackAggregator, SwapLifecycle, UserDirectory};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub directory: Arc<dyn UserDirectory>,
    pub swaps: Arc<dyn SwapLifecycle>,
    pub feedback: Arc<dyn FeedbackAggregator>,
    pub moderation: Arc<dyn AdminModeration>,
}
