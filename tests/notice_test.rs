//! 공지사항 API 통합 테스트

mod common;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn notice_writes_are_admin_only() {
    let app = common::setup().await;
    let (_, member) = app.user("member@healing.test", "회원").await;

    let (status, _) = app
        .post(
            "/api/v1/notices",
            Some(&member),
            json!({ "title": "공지", "content": "내용" }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .post("/api/v1/notices", None, json!({ "title": "공지", "content": "내용" }))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn drafts_are_hidden_from_public() {
    let app = common::setup().await;
    let (admin_id, admin) = app.admin().await;

    let (status, draft) = app
        .post(
            "/api/v1/notices",
            Some(&admin),
            json!({ "title": "작성 중", "content": "아직 비공개" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(draft["result"]["status"], "draft");
    assert_eq!(draft["result"]["notice_type"], "general");
    assert_eq!(draft["result"]["author_id"], admin_id);
    let draft_id = draft["result"]["id"].as_i64().unwrap();

    let (status, _) = app
        .get(&format!("/api/v1/notices/{draft_id}"), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .get(&format!("/api/v1/notices/{draft_id}"), Some(&admin))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, published) = app.get("/api/v1/notices/published", None).await;
    assert_eq!(published["result"]["total"], 0);
}

#[tokio::test]
async fn published_list_puts_pinned_first_and_counts_views() {
    let app = common::setup().await;
    let (_, admin) = app.admin().await;

    app.post(
        "/api/v1/notices",
        Some(&admin),
        json!({ "title": "고정 공지", "content": "운영 안내", "status": "published", "is_pinned": true }),
    )
    .await;
    let (_, latest) = app
        .post(
            "/api/v1/notices",
            Some(&admin),
            json!({ "title": "새 소식", "content": "이벤트", "status": "published", "notice_type": "event" }),
        )
        .await;
    let latest_id = latest["result"]["id"].as_i64().unwrap();

    let (_, list) = app.get("/api/v1/notices/published", None).await;
    assert_eq!(list["result"]["total"], 2);
    assert_eq!(list["result"]["items"][0]["title"], "고정 공지");

    let (_, events) = app
        .get("/api/v1/notices/published?notice_type=event", None)
        .await;
    assert_eq!(events["result"]["total"], 1);

    let uri = format!("/api/v1/notices/{latest_id}");
    app.get(&uri, None).await;
    let (_, viewed) = app.get(&uri, None).await;
    assert_eq!(viewed["result"]["view_count"], 2);
}

#[tokio::test]
async fn admin_can_update_and_delete_notice() {
    let app = common::setup().await;
    let (_, admin) = app.admin().await;
    let (_, notice) = app
        .post(
            "/api/v1/notices",
            Some(&admin),
            json!({ "title": "임시", "content": "내용" }),
        )
        .await;
    let uri = format!("/api/v1/notices/{}", notice["result"]["id"]);

    let (status, body) = app
        .put(&uri, Some(&admin), json!({ "status": "published" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["status"], "published");

    let (status, _) = app.delete(&uri, Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.delete(&uri, Some(&admin)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
