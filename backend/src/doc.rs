//! OpenAPI documentation configuration.
//!
//! Defines [`ApiDoc`], the generated OpenAPI specification for the REST API.
//! The specification backs Swagger UI in debug builds and can be exported
//! for external tooling.

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::ports::{FeedbackWithRater, SwapStats, SwapWithParties, UserStats};
use crate::domain::{
    Availability, EmailAddress, Error, ErrorCode, Feedback, FeedbackId, PublicProfile, Rating,
    Role, SwapId, SwapRequest, SwapStatus, User, UserId,
};
use crate::inbound::http::feedbacks::CreateFeedbackRequest;
use crate::inbound::http::swaps::{CreateSwapRequest, UpdateSwapStatusRequest};
use crate::inbound::http::users::{
    AuthResponse, LoginRequest, RegisterRequest, UpdateProfileRequest,
};

/// Enrich the generated document with the bearer-token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerToken",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "SkillSwap backend API",
        description = "HTTP interface for the skill-exchange platform: user directory, swap lifecycle, feedback, and admin moderation."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerToken" = [])),
    paths(
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::users::browse,
        crate::inbound::http::users::profile,
        crate::inbound::http::users::update_profile,
        crate::inbound::http::swaps::request_swap,
        crate::inbound::http::swaps::list_swaps,
        crate::inbound::http::swaps::update_swap_status,
        crate::inbound::http::feedbacks::submit_feedback,
        crate::inbound::http::feedbacks::list_feedback,
        crate::inbound::http::admin::ban_user,
        crate::inbound::http::admin::unban_user,
        crate::inbound::http::admin::banned_users,
        crate::inbound::http::admin::delete_user,
        crate::inbound::http::admin::swap_stats,
        crate::inbound::http::admin::user_stats,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        User,
        UserId,
        PublicProfile,
        EmailAddress,
        Availability,
        Role,
        SwapRequest,
        SwapId,
        SwapStatus,
        SwapWithParties,
        Feedback,
        FeedbackId,
        Rating,
        FeedbackWithRater,
        SwapStats,
        UserStats,
        RegisterRequest,
        LoginRequest,
        AuthResponse,
        UpdateProfileRequest,
        CreateSwapRequest,
        UpdateSwapStatusRequest,
        CreateFeedbackRequest,
    )),
    tags(
        (name = "users", description = "Registration, login, browsing, and profiles"),
        (name = "swaps", description = "Swap request lifecycle"),
        (name = "feedbacks", description = "Feedback and rating aggregation"),
        (name = "admin", description = "Moderation endpoints, admin role required"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
