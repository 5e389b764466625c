//! 사전 체크리스트 API 통합 테스트

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::TestApp;

/// 관리자 체크리스트 + 문항 3개 생성, (master_id, item_ids) 반환
async fn prepare_checklist(app: &TestApp, admin: &str) -> (i64, Vec<i64>) {
    let (status, master) = app
        .post(
            "/api/v1/checklists",
            Some(admin),
            json!({ "name": "초기 상담 체크리스트", "category": "intake" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "create checklist failed: {master}");
    let master_id = master["result"]["id"].as_i64().unwrap();

    let items = [
        json!({ "question": "최근 2주간 잠을 잘 잤나요?", "item_type": "radio", "options": ["예", "아니오"], "order_index": 2 }),
        json!({ "question": "현재 스트레스 정도", "item_type": "scale", "order_index": 1 }),
        json!({ "question": "상담에서 기대하는 점", "item_type": "text", "required": false, "order_index": 3 }),
    ];
    let mut ids = Vec::new();
    for item in items {
        let (status, body) = app
            .post(
                &format!("/api/v1/checklists/{master_id}/items"),
                Some(admin),
                item,
            )
            .await;
        assert_eq!(status, StatusCode::OK, "create item failed: {body}");
        ids.push(body["result"]["id"].as_i64().unwrap());
    }
    (master_id, ids)
}

#[tokio::test]
async fn checklist_writes_are_admin_only() {
    let app = common::setup().await;
    let (_, member) = app.user("member@healing.test", "회원").await;

    let (status, _) = app
        .post(
            "/api/v1/checklists",
            Some(&member),
            json!({ "name": "몰래 만든 체크리스트" }),
        )
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn radio_item_without_options_should_be_rejected() {
    let app = common::setup().await;
    let (_, admin) = app.admin().await;
    let (master_id, _) = prepare_checklist(&app, &admin).await;

    let (status, _) = app
        .post(
            &format!("/api/v1/checklists/{master_id}/items"),
            Some(&admin),
            json!({ "question": "선택지 없는 문항", "item_type": "radio" }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn detail_should_list_items_in_order() {
    let app = common::setup().await;
    let (_, admin) = app.admin().await;
    let (master_id, _) = prepare_checklist(&app, &admin).await;

    let (status, body) = app
        .get(&format!("/api/v1/checklists/{master_id}"), None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["master"]["version"], "1.0");
    let orders: Vec<i64> = body["result"]["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["order_index"].as_i64().unwrap())
        .collect();
    assert_eq!(orders, vec![1, 2, 3]);
}

#[tokio::test]
async fn submission_should_replace_previous_answers_and_update_summary() {
    let app = common::setup().await;
    let (_, admin) = app.admin().await;
    let (_, owner) = app.user("owner@healing.test", "주인").await;
    let (master_id, items) = prepare_checklist(&app, &admin).await;
    let consultation_id = app.create_consultation(Some(&owner), "체크리스트 상담").await;
    let submit_uri = format!("/api/v1/checklists/{master_id}/responses");
    let summary_uri =
        format!("/api/v1/checklists/{master_id}/summary?consultation_id={consultation_id}");

    let (status, body) = app
        .post(
            &submit_uri,
            Some(&owner),
            json!({
                "consultation_id": consultation_id,
                "answers": [
                    { "item_id": items[0], "response_value": "아니오" },
                    { "item_id": items[1], "response_data": { "score": 8 } }
                ]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["result"].as_array().unwrap().len(), 2);

    let (_, summary) = app.get(&summary_uri, Some(&owner)).await;
    assert_eq!(summary["result"]["total_items"], 3);
    assert_eq!(summary["result"]["completed_items"], 2);
    assert_eq!(summary["result"]["completion_rate"], 66.7);

    app.post(
        &submit_uri,
        Some(&owner),
        json!({
            "consultation_id": consultation_id,
            "answers": [{ "item_id": items[2], "response_value": "편하게 이야기하고 싶어요" }]
        }),
    )
    .await;

    let (_, mine) = app
        .get(
            &format!("/api/v1/checklists/responses/me?consultation_id={consultation_id}"),
            Some(&owner),
        )
        .await;
    assert_eq!(mine["result"].as_array().unwrap().len(), 1);

    let (_, summary) = app.get(&summary_uri, Some(&admin)).await;
    assert_eq!(summary["result"]["completed_items"], 1);
    assert_eq!(summary["result"]["completion_rate"], 33.3);
}

#[tokio::test]
async fn submission_is_limited_to_consultation_owner_and_own_items() {
    let app = common::setup().await;
    let (_, admin) = app.admin().await;
    let (_, owner) = app.user("owner@healing.test", "주인").await;
    let (_, stranger) = app.user("stranger@healing.test", "타인").await;
    let (master_id, items) = prepare_checklist(&app, &admin).await;
    let consultation_id = app.create_consultation(Some(&owner), "체크리스트 상담").await;
    let submit_uri = format!("/api/v1/checklists/{master_id}/responses");

    let (status, _) = app
        .post(
            &submit_uri,
            Some(&stranger),
            json!({
                "consultation_id": consultation_id,
                "answers": [{ "item_id": items[0], "response_value": "예" }]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .post(
            &submit_uri,
            Some(&owner),
            json!({
                "consultation_id": consultation_id,
                "answers": [{ "item_id": 9999, "response_value": "예" }]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .post(
            &submit_uri,
            Some(&owner),
            json!({
                "consultation_id": consultation_id,
                "answers": [
                    { "item_id": items[0], "response_value": "예" },
                    { "item_id": items[0], "response_value": "아니오" }
                ]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
