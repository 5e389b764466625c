//! 회원 관리 API 통합 테스트

mod common;

use axum::http::StatusCode;
use healing_server::domain::healing::entity::healing_step;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use serde_json::json;

#[tokio::test]
async fn user_listing_is_admin_only() {
    let app = common::setup().await;
    let (_, member) = app.user("member@healing.test", "회원").await;
    let (_, admin) = app.admin().await;

    let (status, _) = app.get("/api/v1/users", Some(&member)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app.get("/api/v1/users?limit=1", Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["total"], 2);
    assert_eq!(body["result"]["items"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn member_can_update_own_profile() {
    let app = common::setup().await;
    let (_, token) = app.user("member@healing.test", "회원").await;

    let (status, body) = app
        .request(
            axum::http::Method::PATCH,
            "/api/v1/users/me",
            Some(&token),
            Some(json!({ "name": "새이름", "phone": "010-9876-5432" })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["name"], "새이름");
    assert_eq!(body["result"]["phone"], "010-9876-5432");
}

#[tokio::test]
async fn admin_can_grant_counselor_role() {
    let app = common::setup().await;
    let (member_id, member) = app.user("member@healing.test", "회원").await;
    let (_, admin) = app.admin().await;
    let uri = format!("/api/v1/users/{member_id}");

    let (status, _) = app
        .request(
            axum::http::Method::PATCH,
            &uri,
            Some(&member),
            Some(json!({ "is_admin": true })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .request(
            axum::http::Method::PATCH,
            &uri,
            Some(&admin),
            Some(json!({ "is_counselor": true })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["is_counselor"], true);
    assert_eq!(body["result"]["is_admin"], false);
}

#[tokio::test]
async fn deleting_user_should_cascade_to_owned_records() {
    let app = common::setup().await;
    let (_, admin) = app.admin().await;
    let counselor_id = app.create_counselor(&admin, "kim@healing.test").await;
    let (member_id, member) = app.user("member@healing.test", "회원").await;

    let consultation_id = app.create_consultation(Some(&member), "지워질 상담").await;
    let (_, review) = app
        .post(
            "/api/v1/reviews",
            Some(&member),
            json!({ "counselor_id": counselor_id, "rating": 5, "title": "후기", "content": "좋아요" }),
        )
        .await;
    let review_id = review["result"]["id"].as_i64().unwrap();
    let (_, post) = app
        .post(
            "/api/v1/boards",
            Some(&member),
            json!({ "title": "남을 글", "content": "내용" }),
        )
        .await;
    let board_id = post["result"]["id"].as_i64().unwrap();
    let (status, _) = app
        .put(
            &format!("/api/v1/consultations/{consultation_id}/healing/steps/1"),
            Some(&member),
            json!({ "answers": [{ "question": "요즘 기분은?", "answer": "조금 나아졌어요" }] }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .delete(&format!("/api/v1/users/{member_id}"), Some(&admin))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .get(&format!("/api/v1/consultations/{consultation_id}"), Some(&admin))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .get(&format!("/api/v1/reviews/{review_id}"), Some(&admin))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app.get(&format!("/api/v1/boards/{board_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["result"]["user_id"].is_null());

    let remaining_steps = healing_step::Entity::find()
        .filter(healing_step::Column::UserId.eq(member_id))
        .count(&app.state.db)
        .await
        .unwrap();
    assert_eq!(remaining_steps, 0);

    let (status, _) = app.get("/api/v1/auth/me", Some(&member)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn withdrawal_should_remove_account() {
    let app = common::setup().await;
    let (_, token) = app.user("leaving@healing.test", "탈퇴").await;

    let (status, _) = app.delete("/api/v1/users/me", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .post(
            "/api/v1/auth/login",
            None,
            json!({ "email": "leaving@healing.test", "password": common::PASSWORD }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "AUTH4001");
}

/// 승인 후기 작성 후 상담사 평점 집계를 확인하고 후기 ID 반환
async fn approved_review(
    app: &common::TestApp,
    admin: &str,
    author: &str,
    counselor_id: i64,
    rating: i32,
) -> i64 {
    let (status, body) = app
        .post(
            "/api/v1/reviews",
            Some(author),
            json!({ "counselor_id": counselor_id, "rating": rating, "title": "후기", "content": "도움이 됐어요" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "create review failed: {body}");
    let review_id = body["result"]["id"].as_i64().unwrap();

    let (status, _) = app
        .put(
            &format!("/api/v1/reviews/{review_id}"),
            Some(admin),
            json!({ "is_approved": true }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    review_id
}

#[tokio::test]
async fn deleting_user_should_recompute_counselor_rating() {
    let app = common::setup().await;
    let (_, admin) = app.admin().await;
    let counselor_id = app.create_counselor(&admin, "kim@healing.test").await;
    let (member_id, member) = app.user("member@healing.test", "회원").await;
    let (_, other) = app.user("other@healing.test", "다른회원").await;

    approved_review(&app, &admin, &member, counselor_id, 5).await;
    approved_review(&app, &admin, &other, counselor_id, 3).await;

    let uri = format!("/api/v1/counselors/{counselor_id}");
    let (_, before) = app.get(&uri, None).await;
    assert_eq!(before["result"]["total_reviews"], 2);
    assert_eq!(before["result"]["rating"], 4.0);

    let (status, _) = app
        .delete(&format!("/api/v1/users/{member_id}"), Some(&admin))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, after) = app.get(&uri, None).await;
    assert_eq!(after["result"]["total_reviews"], 1);
    assert_eq!(after["result"]["rating"], 3.0);
}

#[tokio::test]
async fn withdrawal_should_reset_rating_of_only_review() {
    let app = common::setup().await;
    let (_, admin) = app.admin().await;
    let counselor_id = app.create_counselor(&admin, "kim@healing.test").await;
    let (_, member) = app.user("member@healing.test", "회원").await;
    approved_review(&app, &admin, &member, counselor_id, 5).await;

    let (status, _) = app.delete("/api/v1/users/me", Some(&member)).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = app
        .get(&format!("/api/v1/counselors/{counselor_id}"), None)
        .await;
    assert_eq!(body["result"]["total_reviews"], 0);
    assert_eq!(body["result"]["rating"], 0.0);
}
