//! User entity and profile value objects.
//!
//! ## Invariants
//! - `email` is a validated [`EmailAddress`] and unique across the directory
//!   (uniqueness enforced by the registration use-case).
//! - `rating` always equals the mean of received feedback ratings rounded to
//!   one decimal place; `review_count` the count of such entries.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::Error;

/// Stable user identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Wrap an existing UUID.
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for UserId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Validated email address.
///
/// Validation is deliberately shallow: non-empty, no surrounding whitespace,
/// exactly one `@` with text on both sides. Deliverability is not our concern.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, example = "ada@example.com")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`].
    pub fn new(raw: impl Into<String>) -> Result<Self, Error> {
        let raw = raw.into();
        let valid = raw.trim() == raw
            && raw
                .split_once('@')
                .is_some_and(|(local, host)| !local.is_empty() && !host.is_empty() && !host.contains('@'));
        if valid {
            Ok(Self(raw))
        } else {
            Err(Error::invalid_request("invalid email address")
                .with_details(json!({ "field": "email", "code": "invalid_email" })))
        }
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Weekly availability flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub weekends: bool,
    pub evenings: bool,
}

/// Platform role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

/// Application user with profile, moderation state, and rating aggregates.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: EmailAddress,
    /// Never serialized; login compares against this hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub location: Option<String>,
    pub profile_photo: Option<String>,
    pub skills_offered: Vec<String>,
    pub skills_wanted: Vec<String>,
    pub availability: Availability,
    pub is_public: bool,
    pub role: Role,
    pub banned: bool,
    /// Mean of received ratings rounded to one decimal place; 0.0 when unreviewed.
    pub rating: f64,
    pub review_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Whether either skill list contains `skill` (case-sensitive exact match).
    pub fn offers_or_wants(&self, skill: &str) -> bool {
        self.skills_offered.iter().any(|s| s == skill)
            || self.skills_wanted.iter().any(|s| s == skill)
    }

    /// Whether this user may appear in the public browse listing.
    pub fn is_browsable(&self) -> bool {
        self.is_public && !self.banned
    }
}

/// Validated input for registering a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: EmailAddress,
    pub password_hash: String,
    pub location: Option<String>,
    pub profile_photo: Option<String>,
    pub skills_offered: Vec<String>,
    pub skills_wanted: Vec<String>,
    pub availability: Availability,
    pub is_public: bool,
}

impl NewUser {
    /// Materialise a [`User`] with defaults for role, moderation, and ratings.
    pub fn into_user(self, id: UserId, now: DateTime<Utc>) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
            password_hash: self.password_hash,
            location: self.location,
            profile_photo: self.profile_photo,
            skills_offered: self.skills_offered,
            skills_wanted: self.skills_wanted,
            availability: self.availability,
            is_public: self.is_public,
            role: Role::User,
            banned: false,
            rating: 0.0,
            review_count: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Allow-listed profile update.
///
/// Only the fields listed here can be changed through the profile endpoint;
/// `role`, `banned`, and the rating aggregates are deliberately absent so a
/// caller cannot smuggle privilege or moderation changes into a profile edit.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub location: Option<Option<String>>,
    pub profile_photo: Option<Option<String>>,
    pub skills_offered: Option<Vec<String>>,
    pub skills_wanted: Option<Vec<String>>,
    pub availability: Option<Availability>,
    pub is_public: Option<bool>,
}

impl ProfileUpdate {
    /// Merge the update into `user`, touching `updated_at`.
    pub fn apply(self, user: &mut User, now: DateTime<Utc>) {
        if let Some(name) = self.name {
            user.name = name;
        }
        if let Some(location) = self.location {
            user.location = location;
        }
        if let Some(photo) = self.profile_photo {
            user.profile_photo = photo;
        }
        if let Some(offered) = self.skills_offered {
            user.skills_offered = offered;
        }
        if let Some(wanted) = self.skills_wanted {
            user.skills_wanted = wanted;
        }
        if let Some(availability) = self.availability {
            user.availability = availability;
        }
        if let Some(is_public) = self.is_public {
            user.is_public = is_public;
        }
        user.updated_at = now;
    }
}

/// Public view of a profile: password and moderation internals stripped.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicProfile {
    pub id: UserId,
    pub name: String,
    pub email: EmailAddress,
    pub location: Option<String>,
    pub profile_photo: Option<String>,
    pub skills_offered: Vec<String>,
    pub skills_wanted: Vec<String>,
    pub availability: Availability,
    pub rating: f64,
    pub review_count: u32,
    pub join_date: DateTime<Utc>,
}

impl From<User> for PublicProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            location: user.location,
            profile_photo: user.profile_photo,
            skills_offered: user.skills_offered,
            skills_wanted: user.skills_wanted,
            availability: user.availability,
            rating: user.rating,
            review_count: user.review_count,
            join_date: user.created_at,
        }
    }
}
