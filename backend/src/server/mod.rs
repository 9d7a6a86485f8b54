//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App, HttpServer, Scope};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::inbound::http::admin::{
    ban_user, banned_users, delete_user, swap_stats, unban_user, user_stats,
};
use crate::inbound::http::auth::AuthState;
use crate::inbound::http::feedbacks::{list_feedback, submit_feedback};
use crate::inbound::http::health::{live, ready, HealthState};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::swaps::{list_swaps, request_swap, update_swap_status};
use crate::inbound::http::users::{browse, login, profile, register, update_profile};
use crate::middleware::Trace;
use crate::domain::{DirectoryService, FeedbackService, ModerationService, SwapService};
use crate::outbound::persistence::MemoryStore;

/// Wire the shared in-memory store into the domain services behind the
/// driving ports. Tests reuse this to get a fully wired state around a
/// store they can seed directly.
pub fn build_http_state(store: Arc<MemoryStore>) -> HttpState {
    HttpState {
        directory: Arc::new(DirectoryService::new(store.clone(), store.clone())),
        swaps: Arc::new(SwapService::new(store.clone(), store.clone())),
        feedback: Arc::new(FeedbackService::new(store.clone(), store.clone(), store.clone())),
        moderation: Arc::new(ModerationService::new(store.clone(), store.clone(), store)),
    }
}

/// All REST endpoints mounted under `/api`.
pub fn api_scope() -> Scope {
    web::scope("/api")
        .service(register)
        .service(login)
        .service(browse)
        .service(profile)
        .service(update_profile)
        .service(request_swap)
        .service(list_swaps)
        .service(update_swap_status)
        .service(submit_feedback)
        .service(list_feedback)
        .service(ban_user)
        .service(unban_user)
        .service(banned_users)
        .service(delete_user)
        .service(swap_stats)
        .service(user_stats)
}

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    auth_state: web::Data<AuthState>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        auth_state,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(auth_state)
        .wrap(Trace)
        .service(api_scope())
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided health state and
/// configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let store = Arc::new(MemoryStore::new());
    create_server_with_store(health_state, config, store)
}

/// As [`create_server`], but around a caller-supplied store so deployments
/// and tests can seed data before the listener starts.
pub fn create_server_with_store(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
    store: Arc<MemoryStore>,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = web::Data::new(build_http_state(store));
    let ServerConfig {
        bind_addr,
        token_secret,
        token_ttl,
    } = config;
    let auth_state = web::Data::new(AuthState::new(token_secret, token_ttl));

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            auth_state: auth_state.clone(),
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
