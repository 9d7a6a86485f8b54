//! Admin moderation handlers.
//!
//! Every route requires the caller to hold the admin role; the services
//! enforce that, so these handlers stay thin.
//!
//! ```text
//! PATCH  /api/admin/ban/{userId}
//! PATCH  /api/admin/unban/{userId}
//! GET    /api/admin/banned-users
//! DELETE /api/admin/users/{userId}
//! GET    /api/admin/stats/swaps
//! GET    /api/admin/stats/users
//! ```

use actix_web::{delete, get, patch, web, HttpResponse};

use crate::domain::ports::{SwapStats, UserStats};
use crate::domain::{ApiResult, Error, User, UserId};
use crate::inbound::http::auth::Identity;
use crate::inbound::http::state::HttpState;

/// Ban a user, hiding them from browse and search.
#[utoipa::path(
    patch,
    path = "/api/admin/ban/{userId}",
    params(("userId" = UserId, Path, description = "User to ban")),
    responses(
        (status = 200, description = "Banned user", body = User),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Caller is not an admin", body = Error),
        (status = 404, description = "No such user", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["admin"],
    operation_id = "banUser"
)]
#[patch("/admin/ban/{user_id}")]
pub async fn ban_user(
    state: web::Data<HttpState>,
    identity: Identity,
    path: web::Path<UserId>,
) -> ApiResult<web::Json<User>> {
    let target = path.into_inner();
    let user = state.moderation.ban(&identity.user_id, &target).await?;
    Ok(web::Json(user))
}

/// Lift a ban.
#[utoipa::path(
    patch,
    path = "/api/admin/unban/{userId}",
    params(("userId" = UserId, Path, description = "User to unban")),
    responses(
        (status = 200, description = "Unbanned user", body = User),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Caller is not an admin", body = Error),
        (status = 404, description = "No such user", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["admin"],
    operation_id = "unbanUser"
)]
#[patch("/admin/unban/{user_id}")]
pub async fn unban_user(
    state: web::Data<HttpState>,
    identity: Identity,
    path: web::Path<UserId>,
) -> ApiResult<web::Json<User>> {
    let target = path.into_inner();
    let user = state.moderation.unban(&identity.user_id, &target).await?;
    Ok(web::Json(user))
}

/// List all banned users.
#[utoipa::path(
    get,
    path = "/api/admin/banned-users",
    responses(
        (status = 200, description = "Banned users", body = [User]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Caller is not an admin", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["admin"],
    operation_id = "listBannedUsers"
)]
#[get("/admin/banned-users")]
pub async fn banned_users(
    state: web::Data<HttpState>,
    identity: Identity,
) -> ApiResult<web::Json<Vec<User>>> {
    let users = state.moderation.banned_users(&identity.user_id).await?;
    Ok(web::Json(users))
}

/// Permanently remove a user and everything referencing them.
#[utoipa::path(
    delete,
    path = "/api/admin/users/{userId}",
    params(("userId" = UserId, Path, description = "User to delete")),
    responses(
        (status = 204, description = "User and references removed"),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Caller is not an admin", body = Error),
        (status = 404, description = "No such user", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["admin"],
    operation_id = "deleteUser"
)]
#[delete("/admin/users/{user_id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    identity: Identity,
    path: web::Path<UserId>,
) -> ApiResult<HttpResponse> {
    let target = path.into_inner();
    state
        .moderation
        .delete_user(&identity.user_id, &target)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Swap counts for the admin dashboard.
#[utoipa::path(
    get,
    path = "/api/admin/stats/swaps",
    responses(
        (status = 200, description = "Swap counts", body = SwapStats),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Caller is not an admin", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["admin"],
    operation_id = "swapStats"
)]
#[get("/admin/stats/swaps")]
pub async fn swap_stats(
    state: web::Data<HttpState>,
    identity: Identity,
) -> ApiResult<web::Json<SwapStats>> {
    let stats = state.moderation.swap_stats(&identity.user_id).await?;
    Ok(web::Json(stats))
}

/// User counts for the admin dashboard.
#[utoipa::path(
    get,
    path = "/api/admin/stats/users",
    responses(
        (status = 200, description = "User counts", body = UserStats),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Caller is not an admin", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["admin"],
    operation_id = "userStats"
)]
#[get("/admin/stats/users")]
pub async fn user_stats(
    state: web::Data<HttpState>,
    identity: Identity,
) -> ApiResult<web::Json<UserStats>> {
    let stats = state.moderation.user_stats(&identity.user_id).await?;
    Ok(web::Json(stats))
}
