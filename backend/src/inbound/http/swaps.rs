//! Swap lifecycle handlers.
//!
//! ```text
//! POST  /api/swaps/request {"receiver":"...","skillOffered":"Guitar","skillWanted":"Spanish"}
//! GET   /api/swaps/{userId}
//! PATCH /api/swaps/{id}    {"status":"accepted"}
//! ```

use actix_web::{get, patch, post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::ports::{NewSwapRequest, SwapWithParties};
use crate::domain::{ApiResult, Error, SwapId, SwapRequest, SwapStatus, UserId};
use crate::inbound::http::auth::Identity;
use crate::inbound::http::state::HttpState;

/// Swap creation body. The requester is always the authenticated caller.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSwapRequest {
    pub receiver: UserId,
    pub skill_offered: String,
    pub skill_wanted: String,
    #[serde(default)]
    pub message: String,
}

/// Status transition body.
///
/// The status arrives as a raw string so that anything outside the known
/// set maps to a 400 with a stable message instead of a serde error.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateSwapStatusRequest {
    pub status: String,
}

/// Create a pending swap request.
#[utoipa::path(
    post,
    path = "/api/swaps/request",
    request_body = CreateSwapRequest,
    responses(
        (status = 201, description = "Swap created", body = SwapRequest),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "No such receiver", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["swaps"],
    operation_id = "requestSwap"
)]
#[post("/swaps/request")]
pub async fn request_swap(
    state: web::Data<HttpState>,
    identity: Identity,
    payload: web::Json<CreateSwapRequest>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    let swap = state
        .swaps
        .request(NewSwapRequest {
            requester: identity.user_id,
            receiver: body.receiver,
            skill_offered: body.skill_offered,
            skill_wanted: body.skill_wanted,
            message: body.message,
        })
        .await?;
    Ok(HttpResponse::Created().json(swap))
}

/// List every swap naming the given user as either party.
#[utoipa::path(
    get,
    path = "/api/swaps/{userId}",
    params(("userId" = UserId, Path, description = "Either party of the swaps")),
    responses(
        (status = 200, description = "Swaps with party profiles", body = [SwapWithParties]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["swaps"],
    operation_id = "listSwaps"
)]
#[get("/swaps/{user_id}")]
pub async fn list_swaps(
    state: web::Data<HttpState>,
    _identity: Identity,
    path: web::Path<UserId>,
) -> ApiResult<web::Json<Vec<SwapWithParties>>> {
    let user = path.into_inner();
    let swaps = state.swaps.list_for_user(&user).await?;
    Ok(web::Json(swaps))
}

/// Apply a status transition to a swap.
#[utoipa::path(
    patch,
    path = "/api/swaps/{id}",
    params(("id" = SwapId, Path, description = "Swap to transition")),
    request_body = UpdateSwapStatusRequest,
    responses(
        (status = 200, description = "Updated swap", body = SwapRequest),
        (status = 400, description = "Invalid status or transition", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "No such swap", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["swaps"],
    operation_id = "updateSwapStatus"
)]
#[patch("/swaps/{id}")]
pub async fn update_swap_status(
    state: web::Data<HttpState>,
    _identity: Identity,
    path: web::Path<SwapId>,
    payload: web::Json<UpdateSwapStatusRequest>,
) -> ApiResult<web::Json<SwapRequest>> {
    let target = SwapStatus::parse(&payload.status).map_err(|err| {
        Error::invalid_request("invalid swap status")
            .with_details(json!({ "field": "status", "value": err.value }))
    })?;
    let id = path.into_inner();
    let swap = state.swaps.update_status(&id, target).await?;
    Ok(web::Json(swap))
}
