//! HTTP inbound adapter exposing the REST endpoints.

pub mod admin;
pub mod auth;
pub mod error;
pub mod feedbacks;
pub mod health;
pub mod state;
pub mod swaps;
pub mod users;

pub use crate::domain::ApiResult;
