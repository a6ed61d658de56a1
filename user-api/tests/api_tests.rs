mod common;

use chrono::Duration;
use chrono::Utc;
use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;
use user_api::authentication::models::identity_claims;
use user_api::user::models::UserId;

#[tokio::test]
async fn test_create_user_success() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/users")
        .json(&json!({
            "name": "John Doe",
            "email": "john@mail.com",
            "password": "1234"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["name"], "John Doe");
    assert_eq!(body["data"]["email"], "john@mail.com");
    assert!(body["data"]["id"].is_string());
    assert!(body["data"]["created_at"].is_string());
    assert!(body["data"].get("password").is_none());
    assert!(body["data"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_create_user_stores_hashed_password() {
    let app = TestApp::spawn().await;

    let body = app.register("John Doe", "john@mail.com", "1234").await;
    let id = UserId::from_string(body["data"]["id"].as_str().unwrap()).unwrap();

    let stored = app.repository.remove(&id).expect("user persisted");
    assert_ne!(stored.password_hash, "1234");
    assert!(auth::PasswordHasher::new()
        .compare("1234", &stored.password_hash)
        .unwrap());
}

#[tokio::test]
async fn test_create_user_missing_field() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/users")
        .json(&json!({
            "email": "john@mail.com",
            "password": "1234"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status_code"], 400);
    assert_eq!(
        body["data"]["message"],
        "User validation failed: name is required"
    );
}

#[tokio::test]
async fn test_create_user_invalid_email() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/users")
        .json(&json!({
            "name": "John Doe",
            "email": "not-an-email",
            "password": "1234"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_user_wrong_field_type() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/users")
        .json(&json!({
            "name": 42,
            "email": "john@mail.com",
            "password": "1234"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status_code"], 400);
    assert!(body["data"]["message"].is_string());
}

#[tokio::test]
async fn test_create_user_malformed_json() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/users")
        .header("content-type", "application/json")
        .body(r#"{"name": "John Doe", "#)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status_code"], 400);
}

#[tokio::test]
async fn test_create_user_without_json_content_type() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/users")
        .body(r#"{"name":"John Doe","email":"john@mail.com","password":"1234"}"#)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status_code"], 400);
}

#[tokio::test]
async fn test_authenticate_wrong_field_type() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/users/authenticate")
        .json(&json!({
            "email": "john@mail.com",
            "password": 1234
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status_code"], 400);
}

#[tokio::test]
async fn test_create_user_duplicate_email() {
    let app = TestApp::spawn().await;

    app.register("John Doe", "john@mail.com", "1234").await;

    let response = app
        .post("/users")
        .json(&json!({
            "name": "John Doe",
            "email": "john@mail.com",
            "password": "1234"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .contains("already exists"));
}

#[tokio::test]
async fn test_authenticate_success() {
    let app = TestApp::spawn().await;

    app.register("John Doe", "john@mail.com", "1234").await;

    let response = app
        .post("/users/authenticate")
        .json(&json!({
            "email": "john@mail.com",
            "password": "1234"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(!body["data"]["token"].as_str().unwrap().is_empty());
    assert_eq!(body["data"]["user"]["name"], "John Doe");
    assert_eq!(body["data"]["user"]["email"], "john@mail.com");
}

#[tokio::test]
async fn test_authenticate_unknown_email() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/users/authenticate")
        .json(&json!({
            "email": "some-email@mail.com",
            "password": "1234"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "User not found");
}

#[tokio::test]
async fn test_authenticate_wrong_password() {
    let app = TestApp::spawn().await;

    app.register("John Doe", "john@mail.com", "1234").await;

    let response = app
        .post("/users/authenticate")
        .json(&json!({
            "email": "john@mail.com",
            "password": "wrong"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Password does not match");
}

#[tokio::test]
async fn test_profile_of_token_owner() {
    let app = TestApp::spawn().await;

    let created = app.register("John Doe", "john@mail.com", "1234").await;
    let token = app.login("john@mail.com", "1234").await;

    let response = app
        .get_with_token("/users/me", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["user"], created["data"]);
}

#[tokio::test]
async fn test_profile_accepts_bearer_token() {
    let app = TestApp::spawn().await;

    app.register("John Doe", "john@mail.com", "1234").await;
    let token = app.login("john@mail.com", "1234").await;

    let response = app
        .get("/users/me")
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_profile_of_deleted_user_is_not_found() {
    let app = TestApp::spawn().await;

    let created = app.register("John Doe", "john@mail.com", "1234").await;
    let token = app.login("john@mail.com", "1234").await;

    let id = UserId::from_string(created["data"]["id"].as_str().unwrap()).unwrap();
    app.repository.remove(&id);

    let response = app
        .get_with_token("/users/me", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "User not found");
}

#[tokio::test]
async fn test_profile_with_expired_token() {
    let app = TestApp::spawn().await;

    let created = app.register("John Doe", "john@mail.com", "1234").await;
    let id = UserId::from_string(created["data"]["id"].as_str().unwrap()).unwrap();
    let user = app.repository.remove(&id).unwrap();

    let now = Utc::now().timestamp();
    let claims = identity_claims(&user, Duration::hours(1))
        .with_issued_at(now - 7200)
        .with_expiration(now - 3600);
    let token = app.authenticator.generate_token(&claims).unwrap();

    let response = app
        .get_with_token("/users/me", &token)
        .send()
        .await
        .expect("Failed to execute request");

    // Rejected on expiry before the (now missing) user is looked up.
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Token expired");
}

#[tokio::test]
async fn test_profile_with_forged_token() {
    let app = TestApp::spawn().await;

    app.register("John Doe", "john@mail.com", "1234").await;
    let token = app.login("john@mail.com", "1234").await;
    let (payload, _) = token.rsplit_once('.').unwrap();
    let forged = format!("{}.{}", payload, "A".repeat(43));

    let response = app
        .get_with_token("/users/me", &forged)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_profile_without_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/users/me")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
