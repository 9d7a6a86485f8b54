//! Driving port for the user directory.

use async_trait::async_trait;

use crate::domain::{Error, NewUser, ProfileUpdate, User, UserId};

/// Use-cases around user identity, profiles, and browsing.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Register a new user. Fails with a conflict when the email is taken.
    async fn register(&self, new_user: NewUser) -> Result<User, Error>;

    /// Verify credentials, returning the matching user.
    ///
    /// Every failure mode (unknown email, wrong password) collapses into the
    /// same unauthorized error so the endpoint does not leak which emails
    /// are registered.
    async fn login(&self, email: &str, password: &str) -> Result<User, Error>;

    /// Public, non-banned profiles, optionally filtered by an exact skill
    /// match against either skill list.
    async fn browse(&self, skill: Option<&str>) -> Result<Vec<User>, Error>;

    /// Fetch a single profile as seen by `viewer`.
    ///
    /// Visible when the profile is public, the viewer owns it, the viewer is
    /// an admin, or the viewer has an existing swap naming that user as
    /// receiver; otherwise forbidden.
    async fn profile(&self, viewer: &UserId, id: &UserId) -> Result<User, Error>;

    /// Apply an allow-listed update to the caller's own profile.
    async fn update_profile(&self, owner: &UserId, update: ProfileUpdate) -> Result<User, Error>;
}
