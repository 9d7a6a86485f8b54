//! User directory handlers.
//!
//! ```text
//! POST /api/users/register {"name":"Ada","email":"ada@example.com","password":"hunter2"}
//! POST /api/users/login    {"email":"ada@example.com","password":"hunter2"}
//! GET  /api/users/browse?skill=Guitar
//! GET  /api/users/profile/{id}
//! PUT  /api/users/profile  {"location":"Lisbon"}
//! ```

use actix_web::{get, post, put, web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::auth::hash_password;
use crate::domain::{
    ApiResult, Availability, EmailAddress, Error, NewUser, ProfileUpdate, PublicProfile, User,
    UserId,
};
use crate::inbound::http::auth::{AuthState, Identity};
use crate::inbound::http::state::HttpState;

/// Registration request body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub profile_photo: Option<String>,
    #[serde(default)]
    pub skills_offered: Vec<String>,
    #[serde(default)]
    pub skills_wanted: Vec<String>,
    #[serde(default)]
    pub availability: Availability,
    #[serde(default = "default_is_public")]
    pub is_public: bool,
}

fn default_is_public() -> bool {
    true
}

impl TryFrom<RegisterRequest> for NewUser {
    type Error = Error;

    fn try_from(value: RegisterRequest) -> Result<Self, Self::Error> {
        if value.name.trim().is_empty() {
            return Err(Error::invalid_request("name must not be empty")
                .with_details(json!({ "field": "name", "code": "empty_name" })));
        }
        if value.password.is_empty() {
            return Err(Error::invalid_request("password must not be empty")
                .with_details(json!({ "field": "password", "code": "empty_password" })));
        }
        Ok(NewUser {
            name: value.name,
            email: EmailAddress::new(value.email)?,
            password_hash: hash_password(&value.password),
            location: value.location,
            profile_photo: value.profile_photo,
            skills_offered: value.skills_offered,
            skills_wanted: value.skills_wanted,
            availability: value.availability,
            is_public: value.is_public,
        })
    }
}

/// Login request body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Authenticated user plus the bearer token to present on later calls.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
}

/// Profile update body.
///
/// Unknown fields are rejected outright so privileged fields (`role`,
/// `banned`, the rating aggregates) cannot ride along in a profile edit.
/// `location` and `profilePhoto` distinguish absent (leave alone) from
/// `null` (clear).
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "clearable")]
    pub location: Option<Option<String>>,
    #[serde(default, deserialize_with = "clearable")]
    pub profile_photo: Option<Option<String>>,
    pub skills_offered: Option<Vec<String>>,
    pub skills_wanted: Option<Vec<String>>,
    pub availability: Option<Availability>,
    pub is_public: Option<bool>,
}

// Present-but-null means "clear the field"; a plain Option cannot tell that
// apart from the field being absent.
fn clearable<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl From<UpdateProfileRequest> for ProfileUpdate {
    fn from(value: UpdateProfileRequest) -> Self {
        Self {
            name: value.name,
            location: value.location,
            profile_photo: value.profile_photo,
            skills_offered: value.skills_offered,
            skills_wanted: value.skills_wanted,
            availability: value.availability,
            is_public: value.is_public,
        }
    }
}

/// Browse filter.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct BrowseQuery {
    /// Exact skill to filter on, matched against both skill lists.
    pub skill: Option<String>,
}

/// Register a new account and issue a bearer token.
#[utoipa::path(
    post,
    path = "/api/users/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Email already registered", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "register",
    security([])
)]
#[post("/users/register")]
pub async fn register(
    state: web::Data<HttpState>,
    auth: web::Data<AuthState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let new_user = NewUser::try_from(payload.into_inner())?;
    let user = state.directory.register(new_user).await?;
    let token = auth.issue_token(&user.id);
    Ok(HttpResponse::Created().json(AuthResponse { user, token }))
}

/// Verify credentials and issue a bearer token.
#[utoipa::path(
    post,
    path = "/api/users/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = AuthResponse),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/users/login")]
pub async fn login(
    state: web::Data<HttpState>,
    auth: web::Data<AuthState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    let user = state.directory.login(&body.email, &body.password).await?;
    let token = auth.issue_token(&user.id);
    Ok(HttpResponse::Ok().json(AuthResponse { user, token }))
}

/// List public, non-banned profiles, optionally filtered by skill.
#[utoipa::path(
    get,
    path = "/api/users/browse",
    params(BrowseQuery),
    responses(
        (status = 200, description = "Browsable profiles", body = [PublicProfile]),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "browseUsers",
    security([])
)]
#[get("/users/browse")]
pub async fn browse(
    state: web::Data<HttpState>,
    query: web::Query<BrowseQuery>,
) -> ApiResult<web::Json<Vec<PublicProfile>>> {
    let users = state.directory.browse(query.skill.as_deref()).await?;
    Ok(web::Json(users.into_iter().map(PublicProfile::from).collect()))
}

/// Fetch a profile, subject to the visibility rules.
#[utoipa::path(
    get,
    path = "/api/users/profile/{id}",
    params(("id" = UserId, Path, description = "Profile owner")),
    responses(
        (status = 200, description = "Profile", body = User),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Profile is private", body = Error),
        (status = 404, description = "No such user", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "getProfile"
)]
#[get("/users/profile/{id}")]
pub async fn profile(
    state: web::Data<HttpState>,
    identity: Identity,
    path: web::Path<UserId>,
) -> ApiResult<web::Json<User>> {
    let owner = path.into_inner();
    let user = state.directory.profile(&identity.user_id, &owner).await?;
    Ok(web::Json(user))
}

/// Update the caller's own profile.
#[utoipa::path(
    put,
    path = "/api/users/profile",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated profile", body = User),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "updateProfile"
)]
#[put("/users/profile")]
pub async fn update_profile(
    state: web::Data<HttpState>,
    identity: Identity,
    payload: web::Json<UpdateProfileRequest>,
) -> ApiResult<web::Json<User>> {
    let update = ProfileUpdate::from(payload.into_inner());
    let user = state
        .directory
        .update_profile(&identity.user_id, update)
        .await?;
    Ok(web::Json(user))
}
