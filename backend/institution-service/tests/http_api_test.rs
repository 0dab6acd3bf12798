//! HTTP-level tests: the full router with JSON envelopes, status codes, and
//! bearer-token authorization.

use std::sync::Arc;

use actix_web::{test, web, App};
use chrono::Duration;
use serde_json::{json, Value};
use uuid::Uuid;

use institution_service::db::MemoryInstitutionStore;
use institution_service::routes;
use institution_service::security::TokenIssuer;
use institution_service::validators::PasswordPolicy;
use institution_service::AppState;

const TEST_SECRET: &str = "test-secret";

fn test_state() -> AppState {
    AppState::new(
        Arc::new(MemoryInstitutionStore::new()),
        TokenIssuer::new(TEST_SECRET, Duration::days(3)),
        PasswordPolicy::default(),
    )
}

macro_rules! test_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state.clone()))
                .configure(routes::configure),
        )
        .await
    };
}

fn acme_payload() -> Value {
    json!({
        "name": "Acme College",
        "email": "a@acme.edu",
        "password": "Str0ng!Pass",
        "accreditationNumber": "ACC-123"
    })
}

fn is_passkey(value: &Value) -> bool {
    value
        .as_str()
        .map(|s| s.len() == 8 && s.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()))
        .unwrap_or(false)
}

#[actix_web::test]
async fn signup_scenario_returns_created_profile_without_password_hash() {
    let state = test_state();
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/institutions/signup")
        .set_json(acme_payload())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], json!(true));
    assert!(is_passkey(&body["data"]["passkey"]));
    assert!(body["token"].as_str().is_some());

    let data = body["data"].as_object().unwrap();
    assert!(!data.contains_key("passwordHash"));
    assert!(!data.contains_key("password_hash"));
    assert!(!data.contains_key("password"));

    // Second signup reusing the accreditation number with a fresh email.
    let req = test::TestRequest::post()
        .uri("/api/v1/institutions/signup")
        .set_json(json!({
            "name": "Acme College Annex",
            "email": "annex@acme.edu",
            "password": "Str0ng!Pass",
            "accreditationNumber": "ACC-123"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"], json!("conflict"));
}

#[actix_web::test]
async fn login_roundtrip_and_wrong_password() {
    let state = test_state();
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/institutions/signup")
        .set_json(acme_payload())
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/institutions/login")
        .set_json(json!({ "email": "a@acme.edu", "password": "Str0ng!Pass" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["email"], json!("a@acme.edu"));
    assert!(body["token"].as_str().is_some());

    let req = test::TestRequest::post()
        .uri("/api/v1/institutions/login")
        .set_json(json!({ "email": "a@acme.edu", "password": "Wr0ng!Pass" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], json!("unauthorized"));
}

#[actix_web::test]
async fn profile_requires_a_valid_bearer_token() {
    let state = test_state();
    let app = test_app!(state);

    let req = test::TestRequest::get()
        .uri("/api/v1/institutions/profile")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    let req = test::TestRequest::get()
        .uri("/api/v1/institutions/profile")
        .insert_header(("Authorization", "Bearer garbage"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
async fn expired_token_is_rejected() {
    let state = test_state();
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/institutions/signup")
        .set_json(acme_payload())
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    let id = Uuid::parse_str(body["data"]["id"].as_str().unwrap()).unwrap();

    // Same secret, lifetime already elapsed — as if 3 days had passed.
    let expired = TokenIssuer::new(TEST_SECRET, Duration::days(-4))
        .issue(id)
        .unwrap();

    let req = test::TestRequest::get()
        .uri("/api/v1/institutions/profile")
        .insert_header(("Authorization", format!("Bearer {expired}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
async fn patch_profile_applies_allowed_fields_and_rejects_others() {
    let state = test_state();
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/institutions/signup")
        .set_json(acme_payload())
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    let token = body["token"].as_str().unwrap().to_string();

    let req = test::TestRequest::patch()
        .uri("/api/v1/institutions/profile")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({ "name": "Acme University", "website": "https://acme.edu" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["name"], json!("Acme University"));
    assert_eq!(body["data"]["website"], json!("https://acme.edu"));

    let req = test::TestRequest::patch()
        .uri("/api/v1/institutions/profile")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({ "accreditationNumber": "ACC-999" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], json!("invalid_input"));
    assert_eq!(body["message"], json!("Invalid updates"));
}

#[actix_web::test]
async fn passkey_rotation_returns_a_fresh_passkey() {
    let state = test_state();
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/institutions/signup")
        .set_json(acme_payload())
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    let token = body["token"].as_str().unwrap().to_string();
    let original_passkey = body["data"]["passkey"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri("/api/v1/institutions/passkey/regenerate")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], json!(true));
    assert!(is_passkey(&body["data"]["passkey"]));
    assert_ne!(body["data"]["passkey"].as_str().unwrap(), original_passkey);
}
