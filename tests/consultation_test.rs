//! 상담 신청 API 통합 테스트

mod common;

use std::collections::HashSet;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn guest_can_submit_consultation_and_it_starts_pending() {
    let app = common::setup().await;

    let (status, body) = app
        .post(
            "/api/v1/consultations",
            None,
            common::consultation_body("비회원 상담"),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["status"], "pending");
    assert!(body["result"]["user_id"].is_null());
    assert_eq!(body["result"]["is_confidential"], true);
}

#[tokio::test]
async fn member_consultation_should_be_linked_and_listed_as_mine() {
    let app = common::setup().await;
    let (user_id, token) = app.user("client@healing.test", "내담자").await;
    let (_, other) = app.user("other@healing.test", "다른사람").await;

    app.create_consultation(Some(&token), "내 상담").await;
    app.create_consultation(Some(&other), "남의 상담").await;

    let (status, body) = app.get("/api/v1/consultations", Some(&token)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["total"], 1);
    assert_eq!(body["result"]["items"][0]["title"], "내 상담");
    assert_eq!(body["result"]["items"][0]["user_id"], user_id);
}

#[tokio::test]
async fn unknown_counselor_should_be_rejected() {
    let app = common::setup().await;
    let mut body = common::consultation_body("상담사 지정");
    body["counselor_id"] = json!(9999);

    let (status, _) = app.post("/api/v1/consultations", None, body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn invalid_contact_phone_should_fail_before_write() {
    let app = common::setup().await;
    let mut body = common::consultation_body("전화번호 오류");
    body["contact_phone"] = json!("not-a-phone");

    let (status, body) = app.post("/api/v1/consultations", None, body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "COMMON400");

    let (_, admin) = app.admin().await;
    let (_, list) = app.get("/api/v1/consultations/admin", Some(&admin)).await;
    assert_eq!(list["result"]["total"], 0);
}

#[tokio::test]
async fn non_owner_cannot_view_update_or_delete() {
    let app = common::setup().await;
    let (_, owner) = app.user("owner@healing.test", "주인").await;
    let (_, stranger) = app.user("stranger@healing.test", "타인").await;
    let id = app.create_consultation(Some(&owner), "비공개 상담").await;
    let uri = format!("/api/v1/consultations/{id}");

    let (status, _) = app.get(&uri, Some(&stranger)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .put(&uri, Some(&stranger), json!({ "title": "바꿔치기" }))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "COMMON403");

    let (status, _) = app.delete(&uri, Some(&stranger)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, body) = app.get(&uri, Some(&owner)).await;
    assert_eq!(body["result"]["title"], "비공개 상담");
}

#[tokio::test]
async fn owner_cannot_change_status_but_admin_can() {
    let app = common::setup().await;
    let (_, owner) = app.user("owner@healing.test", "주인").await;
    let (_, admin) = app.admin().await;
    let id = app.create_consultation(Some(&owner), "상태 변경").await;
    let uri = format!("/api/v1/consultations/{id}");

    let (status, _) = app
        .put(&uri, Some(&owner), json!({ "status": "confirmed" }))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .put(&uri, Some(&owner), json!({ "title": "제목만 수정" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["status"], "pending");

    let (status, body) = app
        .put(&uri, Some(&admin), json!({ "status": "confirmed", "notes": "첫 회기 확정" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["status"], "confirmed");
    assert_eq!(body["result"]["notes"], "첫 회기 확정");
    assert_eq!(body["result"]["title"], "제목만 수정");
}

#[tokio::test]
async fn admin_listing_requires_admin() {
    let app = common::setup().await;
    let (_, member) = app.user("member@healing.test", "회원").await;

    let (status, _) = app.get("/api/v1/consultations/admin", Some(&member)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.get("/api/v1/consultations/admin", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn pages_should_be_disjoint_and_cover_all_items() {
    let app = common::setup().await;
    for i in 0..7 {
        app.create_consultation(None, &format!("상담 {i}")).await;
    }

    let mut seen = HashSet::new();
    for skip in [0, 3, 6] {
        let (status, body) = app
            .get(&format!("/api/v1/consultations/public?skip={skip}&limit=3"), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"]["total"], 7);
        for item in body["result"]["items"].as_array().unwrap() {
            assert!(seen.insert(item["id"].as_i64().unwrap()), "duplicate across pages");
            assert!(item.get("contact_phone").is_none());
        }
    }
    assert_eq!(seen.len(), 7);
}

#[tokio::test]
async fn limit_out_of_range_should_return_400() {
    let app = common::setup().await;

    let (status, _) = app
        .get("/api/v1/consultations/public?limit=0", None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .get("/api/v1/consultations/public?limit=101", None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn stats_should_count_by_status() {
    let app = common::setup().await;
    let (_, admin) = app.admin().await;
    let first = app.create_consultation(None, "하나").await;
    app.create_consultation(None, "둘").await;
    app.put(
        &format!("/api/v1/consultations/{first}"),
        Some(&admin),
        json!({ "status": "cancelled" }),
    )
    .await;

    let (status, body) = app
        .get("/api/v1/consultations/stats/overview", Some(&admin))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["total"], 2);
    assert_eq!(body["result"]["pending"], 1);
    assert_eq!(body["result"]["cancelled"], 1);
}

#[tokio::test]
async fn sessions_are_numbered_and_counselor_only() {
    let app = common::setup().await;
    let (_, owner) = app.user("owner@healing.test", "주인").await;
    let (counselor_id, counselor) = app.counselor_user().await;
    let id = app.create_consultation(Some(&owner), "회기 상담").await;
    let uri = format!("/api/v1/consultations/{id}/sessions");

    let (status, _) = app.post(&uri, Some(&owner), json!({})).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app.post(&uri, Some(&counselor), json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["session_number"], 1);
    assert_eq!(body["result"]["duration_minutes"], 60);
    assert_eq!(body["result"]["counselor_user_id"], counselor_id);

    let (_, body) = app
        .post(&uri, Some(&counselor), json!({ "duration_minutes": 90 }))
        .await;
    assert_eq!(body["result"]["session_number"], 2);

    let (status, body) = app.get(&uri, Some(&owner)).await;
    assert_eq!(status, StatusCode::OK);
    let numbers: Vec<i64> = body["result"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["session_number"].as_i64().unwrap())
        .collect();
    assert_eq!(numbers, vec![1, 2]);
}

#[tokio::test]
async fn owner_can_delete_own_consultation() {
    let app = common::setup().await;
    let (_, owner) = app.user("owner@healing.test", "주인").await;
    let id = app.create_consultation(Some(&owner), "삭제할 상담").await;
    let uri = format!("/api/v1/consultations/{id}");

    let (status, _) = app.delete(&uri, Some(&owner)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.get(&uri, Some(&owner)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "COMMON404");
}
