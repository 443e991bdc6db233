//! End-to-end HTTP tests over in-memory stores and the mock notifier

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{test, web};
use serde_json::{json, Value};

use mg_api::{create_app, AppState};
use mg_core::domain::CodePurpose;
use mg_core::services::{CodeLifecycleConfig, ManualClock};
use mg_infra::email::MockEmailNotifier;
use mg_infra::memory::{InMemoryAccountRepository, InMemoryCodeStore};
use mg_infra::security::BcryptHasher;
use mg_shared::config::CorsConfig;

const START: i64 = 1_700_000_000_000;

struct Harness {
    state: web::Data<AppState>,
    notifier: Arc<MockEmailNotifier>,
    clock: Arc<ManualClock>,
}

fn harness() -> Harness {
    let notifier = Arc::new(MockEmailNotifier::new(10));
    let clock = Arc::new(ManualClock::new(START));
    let state = AppState::with_clock(
        Arc::new(InMemoryCodeStore::new()),
        Arc::new(InMemoryAccountRepository::new()),
        notifier.clone(),
        Arc::new(BcryptHasher::new(4)),
        clock.clone(),
        CodeLifecycleConfig::default(),
    );
    Harness {
        state: web::Data::new(state),
        notifier,
        clock,
    }
}

macro_rules! post {
    ($app:expr, $path:expr, $body:expr) => {{
        let req = test::TestRequest::post()
            .uri($path)
            .set_json($body)
            .to_request();
        let resp = test::call_service(&$app, req).await;
        let status = resp.status();
        let body: Value = test::read_body_json(resp).await;
        (status, body)
    }};
}

#[actix_rt::test]
async fn test_health_check() {
    let h = harness();
    let app = test::init_service(create_app(h.state.clone(), &CorsConfig::default())).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "mailgate-api");
}

#[actix_rt::test]
async fn test_send_and_verify_code_then_replay() {
    let h = harness();
    let app = test::init_service(create_app(h.state.clone(), &CorsConfig::default())).await;

    let (status, body) = post!(app, "/send-code", json!({ "email": "User@Example.com" }));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    let code = h
        .notifier
        .last_code("user@example.com", CodePurpose::Verification)
        .await
        .expect("code delivered");

    let (status, body) = post!(
        app,
        "/verify-code",
        json!({ "email": "user@example.com", "code": code })
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (status, body) = post!(
        app,
        "/verify-code",
        json!({ "email": "user@example.com", "code": code })
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "code_not_found");
    assert_eq!(body["message"], "No code found for this email");
}

#[actix_rt::test]
async fn test_wrong_code_keeps_record_live() {
    let h = harness();
    let app = test::init_service(create_app(h.state.clone(), &CorsConfig::default())).await;

    post!(app, "/send-code", json!({ "email": "a@x.com" }));
    let code = h
        .notifier
        .last_code("a@x.com", CodePurpose::Verification)
        .await
        .unwrap();
    let wrong = if code == "123456" { "654321" } else { "123456" };

    let (status, body) = post!(app, "/verify-code", json!({ "email": "a@x.com", "code": wrong }));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_code");

    let (status, _) = post!(app, "/verify-code", json!({ "email": "a@x.com", "code": code }));
    assert_eq!(status, StatusCode::OK);
}

#[actix_rt::test]
async fn test_overlong_code_is_invalid_code() {
    let h = harness();
    let app = test::init_service(create_app(h.state.clone(), &CorsConfig::default())).await;

    post!(app, "/send-code", json!({ "email": "a@x.com" }));
    let overlong = "1".repeat(64);

    let (status, body) = post!(
        app,
        "/verify-code",
        json!({ "email": "a@x.com", "code": overlong })
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_code");

    post!(app, "/register", json!({ "email": "b@x.com", "password": "pw" }));
    let (status, body) = post!(
        app,
        "/verify-activation-code",
        json!({ "email": "b@x.com", "code": overlong })
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_code");
}

#[actix_rt::test]
async fn test_expired_code_is_reported_then_gone() {
    let h = harness();
    let app = test::init_service(create_app(h.state.clone(), &CorsConfig::default())).await;

    post!(app, "/send-code", json!({ "email": "a@x.com" }));
    let code = h
        .notifier
        .last_code("a@x.com", CodePurpose::Verification)
        .await
        .unwrap();

    h.clock.advance(600_001);

    let (status, body) = post!(app, "/verify-code", json!({ "email": "a@x.com", "code": code }));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "code_expired");

    let (_, body) = post!(app, "/verify-code", json!({ "email": "a@x.com", "code": code }));
    assert_eq!(body["error"], "code_not_found");
}

#[actix_rt::test]
async fn test_invalid_email_is_rejected() {
    let h = harness();
    let app = test::init_service(create_app(h.state.clone(), &CorsConfig::default())).await;

    let (status, body) = post!(app, "/send-code", json!({ "email": "not-an-email" }));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
    assert_eq!(h.notifier.get_message_count(), 0);
}

#[actix_rt::test]
async fn test_missing_field_is_validation_error() {
    let h = harness();
    let app = test::init_service(create_app(h.state.clone(), &CorsConfig::default())).await;

    let (status, body) = post!(app, "/verify-code", json!({ "email": "a@x.com" }));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
}

#[actix_rt::test]
async fn test_delivery_failure_is_server_error() {
    let h = harness();
    h.notifier.set_simulate_failure(true);
    let app = test::init_service(create_app(h.state.clone(), &CorsConfig::default())).await;

    let (status, body) = post!(app, "/send-code", json!({ "email": "a@x.com" }));
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "notification_failed");
}

#[actix_rt::test]
async fn test_register_activate_login() {
    let h = harness();
    let app = test::init_service(create_app(h.state.clone(), &CorsConfig::default())).await;
    let credentials = json!({ "email": "new@x.com", "password": "hunter2" });

    let (status, body) = post!(app, "/register", credentials.clone());
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    let (status, body) = post!(app, "/login", credentials.clone());
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "account_not_active");

    let code = h
        .notifier
        .last_code("new@x.com", CodePurpose::Activation)
        .await
        .expect("activation code delivered");

    let (status, _) = post!(
        app,
        "/verify-activation-code",
        json!({ "email": "new@x.com", "code": code })
    );
    assert_eq!(status, StatusCode::OK);

    let (status, body) = post!(app, "/login", credentials.clone());
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["email"], "new@x.com");
    assert_eq!(body["user"]["is_active"], true);
    assert!(body["user"].get("password").is_none());

    let (status, body) = post!(app, "/register", credentials);
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "account_already_active");
}

#[actix_rt::test]
async fn test_login_with_wrong_password() {
    let h = harness();
    let app = test::init_service(create_app(h.state.clone(), &CorsConfig::default())).await;

    post!(app, "/register", json!({ "email": "a@x.com", "password": "right" }));
    let (status, body) = post!(app, "/login", json!({ "email": "a@x.com", "password": "wrong" }));
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "invalid_credentials");

    let (status, body) = post!(app, "/login", json!({ "email": "ghost@x.com", "password": "x" }));
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "invalid_credentials");
}

#[actix_rt::test]
async fn test_resend_activation_code() {
    let h = harness();
    let app = test::init_service(create_app(h.state.clone(), &CorsConfig::default())).await;

    let (status, body) = post!(app, "/send-activation-code", json!({ "email": "ghost@x.com" }));
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "user_not_found");

    post!(app, "/register", json!({ "email": "a@x.com", "password": "pw" }));
    let first = h
        .notifier
        .last_code("a@x.com", CodePurpose::Activation)
        .await
        .unwrap();

    h.clock.advance(600_001);
    let (_, body) = post!(
        app,
        "/verify-activation-code",
        json!({ "email": "a@x.com", "code": first })
    );
    assert_eq!(body["error"], "code_expired");

    let (status, _) = post!(app, "/send-activation-code", json!({ "email": "a@x.com" }));
    assert_eq!(status, StatusCode::OK);
    let second = h
        .notifier
        .last_code("a@x.com", CodePurpose::Activation)
        .await
        .unwrap();

    let (status, _) = post!(
        app,
        "/verify-activation-code",
        json!({ "email": "a@x.com", "code": second })
    );
    assert_eq!(status, StatusCode::OK);

    let (status, body) = post!(app, "/send-activation-code", json!({ "email": "a@x.com" }));
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "account_already_active");
}

#[actix_rt::test]
async fn test_malformed_json_body() {
    let h = harness();
    let app = test::init_service(create_app(h.state.clone(), &CorsConfig::default())).await;

    let req = test::TestRequest::post()
        .uri("/send-code")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "validation_error");
}

#[actix_rt::test]
async fn test_unknown_route() {
    let h = harness();
    let app = test::init_service(create_app(h.state.clone(), &CorsConfig::default())).await;

    let req = test::TestRequest::get().uri("/nope").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
