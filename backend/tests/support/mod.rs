//! Shared helpers for the HTTP integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::test::TestRequest;
use actix_web::{web, App};
use chrono::{Duration, Utc};
use serde_json::Value;

use skillswap_backend::domain::auth::hash_password;
use skillswap_backend::domain::ports::UserRepository;
use skillswap_backend::domain::{Availability, EmailAddress, NewUser, Role, User, UserId};
use skillswap_backend::inbound::http::auth::AuthState;
use skillswap_backend::outbound::persistence::MemoryStore;
use skillswap_backend::server::{api_scope, build_http_state};
use skillswap_backend::Trace;

/// Signing secret shared by the app under test and `token_for`.
pub const TEST_SECRET: &[u8] = b"integration-test-secret";

/// Password every seeded user can log in with.
pub const TEST_PASSWORD: &str = "hunter2";

/// Build the full REST app around a seedable store.
pub fn test_app(
    store: Arc<MemoryStore>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(build_http_state(store)))
        .app_data(web::Data::new(AuthState::new(
            TEST_SECRET.to_vec(),
            Duration::hours(1),
        )))
        .wrap(Trace)
        .service(api_scope())
}

/// Mint a bearer token the app under test will accept.
pub fn token_for(user: &UserId) -> String {
    AuthState::new(TEST_SECRET.to_vec(), Duration::hours(1)).issue_token(user)
}

fn with_token(req: TestRequest, token: Option<&str>) -> TestRequest {
    match token {
        Some(token) => req.insert_header(("Authorization", format!("Bearer {token}"))),
        None => req,
    }
}

pub fn get(uri: &str, token: Option<&str>) -> TestRequest {
    with_token(TestRequest::get().uri(uri), token)
}

pub fn post(uri: &str, token: Option<&str>, body: &Value) -> TestRequest {
    with_token(TestRequest::post().uri(uri).set_json(body), token)
}

pub fn put(uri: &str, token: Option<&str>, body: &Value) -> TestRequest {
    with_token(TestRequest::put().uri(uri).set_json(body), token)
}

pub fn patch(uri: &str, token: Option<&str>, body: &Value) -> TestRequest {
    with_token(TestRequest::patch().uri(uri).set_json(body), token)
}

pub fn patch_empty(uri: &str, token: Option<&str>) -> TestRequest {
    with_token(TestRequest::patch().uri(uri), token)
}

pub fn delete(uri: &str, token: Option<&str>) -> TestRequest {
    with_token(TestRequest::delete().uri(uri), token)
}

/// Seed a user straight into the store, bypassing the register endpoint.
pub async fn seed_user(
    store: &MemoryStore,
    name: &str,
    email: &str,
    offered: &[&str],
    wanted: &[&str],
    is_public: bool,
) -> User {
    let user = NewUser {
        name: name.into(),
        email: EmailAddress::new(email).expect("valid email"),
        password_hash: hash_password(TEST_PASSWORD),
        location: None,
        profile_photo: None,
        skills_offered: offered.iter().map(|s| (*s).to_owned()).collect(),
        skills_wanted: wanted.iter().map(|s| (*s).to_owned()).collect(),
        availability: Availability::default(),
        is_public,
    }
    .into_user(UserId::random(), Utc::now());
    UserRepository::save(store, &user).await.expect("seed user");
    user
}

/// Seed an admin. Admins are provisioned out of band; there is no endpoint
/// that grants the role.
pub async fn seed_admin(store: &MemoryStore) -> User {
    let mut admin = seed_user(store, "Root", "root@example.com", &[], &[], false).await;
    admin.role = Role::Admin;
    UserRepository::save(store, &admin)
        .await
        .expect("seed admin");
    admin
}
