//! Feedback handlers.
//!
//! ```text
//! POST /api/feedbacks {"swapId":"...","to":"...","rating":5,"comment":"great"}
//! GET  /api/feedbacks/{userId}
//! ```

use actix_web::{get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{FeedbackWithRater, NewFeedback};
use crate::domain::{ApiResult, Error, Feedback, Rating, SwapId, UserId};
use crate::inbound::http::auth::Identity;
use crate::inbound::http::state::HttpState;

/// Feedback submission body. The rater is always the authenticated caller;
/// the rating deserializer rejects values outside 1–5.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateFeedbackRequest {
    pub swap_id: SwapId,
    pub to: UserId,
    pub rating: Rating,
    #[serde(default)]
    pub comment: String,
}

/// Leave feedback on a completed swap and refresh the ratee's aggregate.
#[utoipa::path(
    post,
    path = "/api/feedbacks",
    request_body = CreateFeedbackRequest,
    responses(
        (status = 201, description = "Feedback stored", body = Feedback),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Caller is not a participant", body = Error),
        (status = 404, description = "No such swap", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["feedbacks"],
    operation_id = "submitFeedback"
)]
#[post("/feedbacks")]
pub async fn submit_feedback(
    state: web::Data<HttpState>,
    identity: Identity,
    payload: web::Json<CreateFeedbackRequest>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    let feedback = state
        .feedback
        .submit(NewFeedback {
            swap_id: body.swap_id,
            from: identity.user_id,
            to: body.to,
            rating: body.rating,
            comment: body.comment,
        })
        .await?;
    Ok(HttpResponse::Created().json(feedback))
}

/// List feedback received by a user, rater profiles attached.
#[utoipa::path(
    get,
    path = "/api/feedbacks/{userId}",
    params(("userId" = UserId, Path, description = "The ratee")),
    responses(
        (status = 200, description = "Received feedback", body = [FeedbackWithRater]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["feedbacks"],
    operation_id = "listFeedback"
)]
#[get("/feedbacks/{user_id}")]
pub async fn list_feedback(
    state: web::Data<HttpState>,
    _identity: Identity,
    path: web::Path<UserId>,
) -> ApiResult<web::Json<Vec<FeedbackWithRater>>> {
    let user = path.into_inner();
    let feedback = state.feedback.list_for_user(&user).await?;
    Ok(web::Json(feedback))
}
