//! 상담사 API 통합 테스트

mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn counselor_management_is_admin_only() {
    let app = common::setup().await;
    let (_, member) = app.user("member@healing.test", "회원").await;

    let (status, _) = app
        .post(
            "/api/v1/counselors",
            Some(&member),
            json!({ "name": "이상담", "email": "lee@healing.test" }),
        )
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn duplicate_counselor_email_should_conflict() {
    let app = common::setup().await;
    let (_, admin) = app.admin().await;
    app.create_counselor(&admin, "kim@healing.test").await;

    let (status, body) = app
        .post(
            "/api/v1/counselors",
            Some(&admin),
            json!({ "name": "다른 김상담", "email": "KIM@healing.test" }),
        )
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "COMMON409");
}

#[tokio::test]
async fn new_counselor_starts_with_zero_rating() {
    let app = common::setup().await;
    let (_, admin) = app.admin().await;
    let id = app.create_counselor(&admin, "kim@healing.test").await;

    let (status, body) = app.get(&format!("/api/v1/counselors/{id}"), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["rating"], 0.0);
    assert_eq!(body["result"]["total_reviews"], 0);
}

#[tokio::test]
async fn online_listing_excludes_offline_and_inactive() {
    let app = common::setup().await;
    let (_, admin) = app.admin().await;
    let online = app.create_counselor(&admin, "online@healing.test").await;
    let offline = app.create_counselor(&admin, "offline@healing.test").await;
    let inactive = app.create_counselor(&admin, "inactive@healing.test").await;

    app.put(
        &format!("/api/v1/counselors/{online}"),
        Some(&admin),
        json!({ "is_online": true }),
    )
    .await;
    app.put(
        &format!("/api/v1/counselors/{inactive}"),
        Some(&admin),
        json!({ "is_online": true, "is_active": false }),
    )
    .await;

    let (status, body) = app.get("/api/v1/counselors/online", None).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = body["result"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![online]);
    assert!(!ids.contains(&offline));
}

#[tokio::test]
async fn toggle_status_should_flip_active_flag() {
    let app = common::setup().await;
    let (_, admin) = app.admin().await;
    let id = app.create_counselor(&admin, "kim@healing.test").await;
    let uri = format!("/api/v1/counselors/{id}/toggle-status");

    let (status, body) = app.request(Method::PATCH, &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["is_active"], false);

    let (_, body) = app.request(Method::PUT, &uri, None, None).await;
    assert_eq!(body["result"]["is_active"], true);
}

#[tokio::test]
async fn deleting_counselor_should_return_404_afterwards() {
    let app = common::setup().await;
    let (_, admin) = app.admin().await;
    let id = app.create_counselor(&admin, "kim@healing.test").await;
    let uri = format!("/api/v1/counselors/{id}");

    let (status, _) = app.delete(&uri, Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.get(&uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
