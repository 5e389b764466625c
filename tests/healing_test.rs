//! 힐링 프로그램 진행 API 통합 테스트

mod common;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn progress_should_be_upserted_per_consultation() {
    let app = common::setup().await;
    let (_, owner) = app.user("owner@healing.test", "주인").await;
    let id = app.create_consultation(Some(&owner), "힐링 상담").await;
    let uri = format!("/api/v1/consultations/{id}/healing/progress");

    let (status, _) = app.get(&uri, Some(&owner)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app
        .put(
            &uri,
            Some(&owner),
            json!({ "current_step": 4, "completed_steps": [3, 1, 2, 2] }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["completed_steps"], json!([1, 2, 3]));
    assert_eq!(body["result"]["total_progress"], 25);
    let progress_id = body["result"]["id"].clone();

    let (status, body) = app
        .put(
            &uri,
            Some(&owner),
            json!({ "current_step": 5, "completed_steps": [1, 2, 3, 4], "total_progress": 40 }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["id"], progress_id);
    assert_eq!(body["result"]["current_step"], 5);
    assert_eq!(body["result"]["total_progress"], 40);
}

#[tokio::test]
async fn progress_out_of_range_should_be_rejected() {
    let app = common::setup().await;
    let (_, owner) = app.user("owner@healing.test", "주인").await;
    let id = app.create_consultation(Some(&owner), "힐링 상담").await;
    let uri = format!("/api/v1/consultations/{id}/healing/progress");

    let (status, _) = app
        .put(&uri, Some(&owner), json!({ "current_step": 13 }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .put(&uri, Some(&owner), json!({ "current_step": 1, "total_progress": 101 }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .put(&uri, Some(&owner), json!({ "current_step": 1, "completed_steps": [0] }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn steps_should_be_keyed_by_step_number() {
    let app = common::setup().await;
    let (owner_id, owner) = app.user("owner@healing.test", "주인").await;
    let id = app.create_consultation(Some(&owner), "힐링 상담").await;
    let step_uri = |n: i32| format!("/api/v1/consultations/{id}/healing/steps/{n}");

    let (status, body) = app
        .put(
            &step_uri(2),
            Some(&owner),
            json!({
                "answers": [
                    { "question": "요즘 가장 힘든 점은?", "answer": "잠이 안 와요" },
                    { "question": "기분을 한 단어로?" }
                ],
                "stress_level": 7
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["user_id"], owner_id);
    assert_eq!(body["result"]["answers"][0]["answer"], "잠이 안 와요");
    assert!(body["result"]["answers"][1]["answer"].is_null());

    app.put(&step_uri(1), Some(&owner), json!({ "stress_level": 9 })).await;
    let (_, replaced) = app
        .put(&step_uri(2), Some(&owner), json!({ "stress_level": 5 }))
        .await;
    assert_eq!(replaced["result"]["stress_level"], 5);
    assert_eq!(replaced["result"]["answers"], json!([]));

    let (_, list) = app
        .get(&format!("/api/v1/consultations/{id}/healing/steps"), Some(&owner))
        .await;
    let numbers: Vec<i64> = list["result"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["step_number"].as_i64().unwrap())
        .collect();
    assert_eq!(numbers, vec![1, 2]);

    let (status, _) = app.delete(&step_uri(1), Some(&owner)).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app.get(&step_uri(1), Some(&owner)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn step_limits_should_be_enforced() {
    let app = common::setup().await;
    let (_, owner) = app.user("owner@healing.test", "주인").await;
    let id = app.create_consultation(Some(&owner), "힐링 상담").await;

    let (status, _) = app
        .put(
            &format!("/api/v1/consultations/{id}/healing/steps/13"),
            Some(&owner),
            json!({}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let answers: Vec<_> = (0..6)
        .map(|i| json!({ "question": format!("질문 {i}"), "answer": "답" }))
        .collect();
    let (status, _) = app
        .put(
            &format!("/api/v1/consultations/{id}/healing/steps/1"),
            Some(&owner),
            json!({ "answers": answers }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .put(
            &format!("/api/v1/consultations/{id}/healing/steps/1"),
            Some(&owner),
            json!({ "stress_level": 0 }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn counselor_feedback_is_staff_only() {
    let app = common::setup().await;
    let (_, owner) = app.user("owner@healing.test", "주인").await;
    let (_, counselor) = app.counselor_user().await;
    let id = app.create_consultation(Some(&owner), "힐링 상담").await;
    let uri = format!("/api/v1/consultations/{id}/healing/steps/3");

    let (status, _) = app
        .put(&uri, Some(&owner), json!({ "counselor_feedback": "스스로 칭찬" }))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .put(&uri, Some(&counselor), json!({ "counselor_feedback": "잘 하고 있어요" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["counselor_feedback"], "잘 하고 있어요");
}

#[tokio::test]
async fn other_members_cannot_touch_healing_records() {
    let app = common::setup().await;
    let (_, owner) = app.user("owner@healing.test", "주인").await;
    let (_, stranger) = app.user("stranger@healing.test", "타인").await;
    let id = app.create_consultation(Some(&owner), "힐링 상담").await;

    let (status, _) = app
        .get(&format!("/api/v1/consultations/{id}/healing/steps"), Some(&stranger))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .put(
            &format!("/api/v1/consultations/{id}/healing/progress"),
            Some(&stranger),
            json!({ "current_step": 1 }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
