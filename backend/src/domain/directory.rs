//! User directory service.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use tracing::info;

use crate::domain::auth::verify_password;
use crate::domain::ports::{SwapRepository, UserDirectory, UserRepository};
use crate::domain::{EmailAddress, Error, NewUser, ProfileUpdate, Role, User, UserId};

/// Implements [`UserDirectory`] over the user and swap stores.
///
/// The swap store is only consulted for the profile-visibility rule: a viewer
/// with an existing swap naming the profile owner as receiver may see a
/// private profile.
#[derive(Clone)]
pub struct DirectoryService<U, S> {
    users: Arc<U>,
    swaps: Arc<S>,
}

impl<U, S> DirectoryService<U, S> {
    /// Create the service over the given stores.
    pub fn new(users: Arc<U>, swaps: Arc<S>) -> Self {
        Self { users, swaps }
    }
}

#[async_trait]
impl<U, S> UserDirectory for DirectoryService<U, S>
where
    U: UserRepository,
    S: SwapRepository,
{
    async fn register(&self, new_user: NewUser) -> Result<User, Error> {
        if self.users.find_by_email(&new_user.email).await?.is_some() {
            return Err(Error::conflict("email already registered")
                .with_details(json!({ "field": "email", "code": "duplicate_email" })));
        }
        let user = new_user.into_user(UserId::random(), Utc::now());
        self.users.save(&user).await?;
        info!(user_id = %user.id, "user registered");
        Ok(user)
    }

    async fn login(&self, email: &str, password: &str) -> Result<User, Error> {
        let rejected = || Error::unauthorized("invalid credentials");
        let email = EmailAddress::new(email).map_err(|_| rejected())?;
        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or_else(rejected)?;
        if !verify_password(password, &user.password_hash) {
            return Err(rejected());
        }
        Ok(user)
    }

    async fn browse(&self, skill: Option<&str>) -> Result<Vec<User>, Error> {
        Ok(self.users.list_browsable(skill).await?)
    }

    async fn profile(&self, viewer: &UserId, id: &UserId) -> Result<User, Error> {
        let user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found("user not found"))?;

        if user.is_public || viewer == id {
            return Ok(user);
        }
        let viewer_is_admin = self
            .users
            .find_by_id(viewer)
            .await?
            .is_some_and(|u| u.role == Role::Admin);
        if viewer_is_admin || self.swaps.exists_between(viewer, id).await? {
            return Ok(user);
        }
        Err(Error::forbidden("this profile is private"))
    }

    async fn update_profile(&self, owner: &UserId, update: ProfileUpdate) -> Result<User, Error> {
        let mut user = self
            .users
            .find_by_id(owner)
            .await?
            .ok_or_else(|| Error::not_found("user not found"))?;
        update.apply(&mut user, Utc::now());
        self.users.save(&user).await?;
        Ok(user)
    }
}
