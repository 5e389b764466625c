//! 인증 API 통합 테스트
//! POST /api/v1/auth/register, /login, /refresh, /logout
//! GET  /api/v1/auth/me

mod common;

use axum::http::StatusCode;
use sea_orm::Set;
use serde_json::json;

#[tokio::test]
async fn register_should_create_active_member() {
    let app = common::setup().await;

    let (status, body) = app
        .post(
            "/api/v1/auth/register",
            None,
            json!({ "email": "new@healing.test", "password": common::PASSWORD, "name": "새회원" }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_success"], true);
    assert_eq!(body["result"]["email"], "new@healing.test");
    assert_eq!(body["result"]["is_active"], true);
    assert_eq!(body["result"]["is_admin"], false);
    assert!(body["result"].get("hashed_password").is_none());
}

#[tokio::test]
async fn duplicate_email_should_return_409() {
    let app = common::setup().await;
    app.register("dup@healing.test", "첫번째").await;

    let (status, body) = app
        .post(
            "/api/v1/auth/register",
            None,
            json!({ "email": "dup@healing.test", "password": common::PASSWORD, "name": "두번째" }),
        )
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "COMMON409");
    assert_eq!(body["is_success"], false);
}

#[tokio::test]
async fn malformed_email_should_return_400() {
    let app = common::setup().await;

    let (status, body) = app
        .post(
            "/api/v1/auth/register",
            None,
            json!({ "email": "not-an-email", "password": common::PASSWORD, "name": "회원" }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "COMMON400");
}

#[tokio::test]
async fn login_should_issue_tokens_and_cookie() {
    let app = common::setup().await;
    app.register("login@healing.test", "로그인").await;

    let (status, body) = app
        .post(
            "/api/v1/auth/login",
            None,
            json!({ "email": "login@healing.test", "password": common::PASSWORD }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["token_type"], "bearer");
    assert!(body["result"]["access_token"].as_str().is_some());
    assert!(body["result"]["refresh_token"].as_str().is_some());
    assert_eq!(body["result"]["user"]["email"], "login@healing.test");
}

#[tokio::test]
async fn wrong_password_and_unknown_email_should_be_indistinguishable() {
    let app = common::setup().await;
    app.register("member@healing.test", "회원").await;

    let (wrong_status, wrong_body) = app
        .post(
            "/api/v1/auth/login",
            None,
            json!({ "email": "member@healing.test", "password": "wrong-password" }),
        )
        .await;
    let (unknown_status, unknown_body) = app
        .post(
            "/api/v1/auth/login",
            None,
            json!({ "email": "nobody@healing.test", "password": common::PASSWORD }),
        )
        .await;

    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_body["code"], "AUTH4001");
    assert_eq!(wrong_body["message"], unknown_body["message"]);
}

#[tokio::test]
async fn inactive_account_should_be_rejected_with_distinct_code() {
    let app = common::setup().await;
    let id = app.register("inactive@healing.test", "휴면").await;
    app.set_flags(id, |active| active.is_active = Set(false)).await;

    let (status, body) = app
        .post(
            "/api/v1/auth/login",
            None,
            json!({ "email": "inactive@healing.test", "password": common::PASSWORD }),
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "AUTH4003");
}

#[tokio::test]
async fn me_should_require_valid_token() {
    let app = common::setup().await;
    let (_, token) = app.user("me@healing.test", "나").await;

    let (status, body) = app.get("/api/v1/auth/me", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["name"], "나");

    let (status, _) = app.get("/api/v1/auth/me", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = app.get("/api/v1/auth/me", Some("garbage")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "AUTH4001");
}

#[tokio::test]
async fn token_of_deactivated_user_should_stop_working() {
    let app = common::setup().await;
    let (id, token) = app.user("later@healing.test", "나중").await;
    app.set_flags(id, |active| active.is_active = Set(false)).await;

    let (status, body) = app.get("/api/v1/auth/me", Some(&token)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "AUTH4003");
}

#[tokio::test]
async fn refresh_should_issue_new_pair_and_reject_access_token() {
    let app = common::setup().await;
    app.register("refresh@healing.test", "갱신").await;
    let (_, login) = app
        .post(
            "/api/v1/auth/login",
            None,
            json!({ "email": "refresh@healing.test", "password": common::PASSWORD }),
        )
        .await;
    let refresh_token = login["result"]["refresh_token"].as_str().unwrap();
    let access_token = login["result"]["access_token"].as_str().unwrap();

    let (status, body) = app
        .post(
            "/api/v1/auth/refresh",
            None,
            json!({ "refresh_token": refresh_token }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["result"]["access_token"].as_str().is_some());

    let (status, _) = app
        .post(
            "/api/v1/auth/refresh",
            None,
            json!({ "refresh_token": access_token }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_should_succeed_without_token() {
    let app = common::setup().await;

    let (status, body) = app
        .request(axum::http::Method::POST, "/api/v1/auth/logout", None, None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_success"], true);
}
