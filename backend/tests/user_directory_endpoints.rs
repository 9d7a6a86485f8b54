//! End-to-end tests for registration, login, browsing, and profiles.

mod support;

use std::sync::Arc;

use actix_web::test;
use serde_json::{json, Value};

use skillswap_backend::domain::ports::SwapRepository;
use skillswap_backend::domain::{SwapId, SwapRequest, SwapStatus};
use skillswap_backend::outbound::persistence::MemoryStore;

use support::{get, patch, post, put, seed_admin, seed_user, test_app, token_for, TEST_PASSWORD};

fn register_body(name: &str, email: &str) -> Value {
    json!({
        "name": name,
        "email": email,
        "password": TEST_PASSWORD,
        "skillsOffered": ["Guitar"],
        "skillsWanted": ["Spanish"],
    })
}

#[actix_web::test]
async fn register_issues_a_token_and_hides_the_password() {
    let store = Arc::new(MemoryStore::new());
    let app = test::init_service(test_app(store)).await;

    let res = test::call_service(
        &app,
        post(
            "/api/users/register",
            None,
            &register_body("Ada", "ada@example.com"),
        )
        .to_request(),
    )
    .await;
    assert_eq!(res.status().as_u16(), 201);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["user"]["name"], "Ada");
    assert_eq!(body["user"]["role"], "user");
    assert_eq!(body["user"]["rating"], 0.0);
    assert!(body["user"].get("passwordHash").is_none());
    assert!(body["user"].get("password_hash").is_none());
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
}

#[actix_web::test]
async fn duplicate_email_is_a_conflict() {
    let store = Arc::new(MemoryStore::new());
    let app = test::init_service(test_app(store)).await;

    let first = test::call_service(
        &app,
        post(
            "/api/users/register",
            None,
            &register_body("Ada", "ada@example.com"),
        )
        .to_request(),
    )
    .await;
    assert_eq!(first.status().as_u16(), 201);

    let second = test::call_service(
        &app,
        post(
            "/api/users/register",
            None,
            &register_body("Imposter", "ada@example.com"),
        )
        .to_request(),
    )
    .await;
    assert_eq!(second.status().as_u16(), 409);
    let body: Value = test::read_body_json(second).await;
    assert_eq!(body["code"], "conflict");
    assert_eq!(body["message"], "email already registered");
}

#[actix_web::test]
async fn malformed_email_is_rejected() {
    let store = Arc::new(MemoryStore::new());
    let app = test::init_service(test_app(store)).await;

    let res = test::call_service(
        &app,
        post(
            "/api/users/register",
            None,
            &register_body("Ada", "not-an-email"),
        )
        .to_request(),
    )
    .await;
    assert_eq!(res.status().as_u16(), 400);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["details"]["field"], "email");
}

#[actix_web::test]
async fn login_checks_credentials_without_leaking_which_failed() {
    let store = Arc::new(MemoryStore::new());
    seed_user(
        &store,
        "Ada",
        "ada@example.com",
        &["Guitar"],
        &[],
        true,
    )
    .await;
    let app = test::init_service(test_app(store)).await;

    let ok = test::call_service(
        &app,
        post(
            "/api/users/login",
            None,
            &json!({ "email": "ada@example.com", "password": TEST_PASSWORD }),
        )
        .to_request(),
    )
    .await;
    assert_eq!(ok.status().as_u16(), 200);
    let body: Value = test::read_body_json(ok).await;
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));

    for payload in [
        json!({ "email": "ada@example.com", "password": "wrong" }),
        json!({ "email": "nobody@example.com", "password": TEST_PASSWORD }),
    ] {
        let res = test::call_service(
            &app,
            post("/api/users/login", None, &payload).to_request(),
        )
        .await;
        assert_eq!(res.status().as_u16(), 401);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["message"], "invalid credentials");
    }
}

#[actix_web::test]
async fn browse_filters_by_exact_skill_and_hides_the_hidden() {
    let store = Arc::new(MemoryStore::new());
    seed_user(&store, "Ada", "ada@example.com", &["Guitar"], &[], true).await;
    seed_user(&store, "Bea", "bea@example.com", &[], &["Guitar"], true).await;
    seed_user(&store, "Cal", "cal@example.com", &["guitar"], &[], true).await;
    seed_user(&store, "Dee", "dee@example.com", &["Guitar"], &[], false).await;
    let banned = seed_user(&store, "Eve", "eve@example.com", &["Guitar"], &[], true).await;
    let admin = seed_admin(&store).await;
    let admin_token = token_for(&admin.id);
    let app = test::init_service(test_app(store)).await;

    let res = test::call_service(
        &app,
        patch(
            &format!("/api/admin/ban/{}", banned.id),
            Some(&admin_token),
            &json!({}),
        )
        .to_request(),
    )
    .await;
    assert_eq!(res.status().as_u16(), 200);

    let res = test::call_service(
        &app,
        get("/api/users/browse?skill=Guitar", None).to_request(),
    )
    .await;
    assert_eq!(res.status().as_u16(), 200);
    let body: Value = test::read_body_json(res).await;
    let names: Vec<&str> = body
        .as_array()
        .expect("array")
        .iter()
        .map(|u| u["name"].as_str().expect("name"))
        .collect();
    assert_eq!(names, vec!["Ada", "Bea"]);
    // Browse strips account internals.
    assert!(body[0].get("role").is_none());
    assert!(body[0].get("banned").is_none());
}

#[actix_web::test]
async fn private_profiles_are_visible_to_owner_admin_and_swap_partner_only() {
    let store = Arc::new(MemoryStore::new());
    let owner = seed_user(&store, "Ada", "ada@example.com", &["Guitar"], &[], false).await;
    let stranger = seed_user(&store, "Sam", "sam@example.com", &[], &[], true).await;
    let partner = seed_user(&store, "Pat", "pat@example.com", &[], &[], true).await;
    let admin = seed_admin(&store).await;
    let now = chrono::Utc::now();
    SwapRepository::save(
        &*store,
        &SwapRequest {
            id: SwapId::random(),
            requester: partner.id,
            receiver: owner.id,
            skill_offered: "Chess".into(),
            skill_wanted: "Guitar".into(),
            message: String::new(),
            status: SwapStatus::Pending,
            created_at: now,
            updated_at: now,
        },
    )
    .await
    .expect("seed swap");
    let app = test::init_service(test_app(store)).await;

    let uri = format!("/api/users/profile/{}", owner.id);
    for (viewer, expected) in [
        (owner.id, 200),
        (admin.id, 200),
        (partner.id, 200),
        (stranger.id, 403),
    ] {
        let res = test::call_service(
            &app,
            get(&uri, Some(&token_for(&viewer))).to_request(),
        )
        .await;
        assert_eq!(res.status().as_u16(), expected, "viewer: {viewer}");
    }

    let res = test::call_service(&app, get(&uri, None).to_request()).await;
    assert_eq!(res.status().as_u16(), 401);
}

#[actix_web::test]
async fn unknown_profile_is_not_found() {
    let store = Arc::new(MemoryStore::new());
    let viewer = seed_user(&store, "Sam", "sam@example.com", &[], &[], true).await;
    let app = test::init_service(test_app(store)).await;

    let res = test::call_service(
        &app,
        get(
            &format!("/api/users/profile/{}", uuid::Uuid::new_v4()),
            Some(&token_for(&viewer.id)),
        )
        .to_request(),
    )
    .await;
    assert_eq!(res.status().as_u16(), 404);
}

#[actix_web::test]
async fn profile_update_merges_allowed_fields() {
    let store = Arc::new(MemoryStore::new());
    let user = seed_user(&store, "Ada", "ada@example.com", &["Guitar"], &[], true).await;
    let token = token_for(&user.id);
    let app = test::init_service(test_app(store)).await;

    let res = test::call_service(
        &app,
        put(
            "/api/users/profile",
            Some(&token),
            &json!({ "location": "Lisbon", "skillsWanted": ["Welding"] }),
        )
        .to_request(),
    )
    .await;
    assert_eq!(res.status().as_u16(), 200);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["location"], "Lisbon");
    assert_eq!(body["skillsWanted"], json!(["Welding"]));
    assert_eq!(body["name"], "Ada");
    assert_eq!(body["skillsOffered"], json!(["Guitar"]));
}

#[actix_web::test]
async fn profile_update_rejects_privileged_fields() {
    let store = Arc::new(MemoryStore::new());
    let user = seed_user(&store, "Ada", "ada@example.com", &[], &[], true).await;
    let token = token_for(&user.id);
    let app = test::init_service(test_app(store)).await;

    for payload in [
        json!({ "role": "admin" }),
        json!({ "banned": false }),
        json!({ "rating": 5.0 }),
    ] {
        let res = test::call_service(
            &app,
            put("/api/users/profile", Some(&token), &payload).to_request(),
        )
        .await;
        assert_eq!(res.status().as_u16(), 400, "payload: {payload}");
    }
}
