//! 통합 테스트 공용 헬퍼
//!
//! 테스트마다 인메모리 SQLite를 새로 만들고 마이그레이션한 뒤
//! 실제 라우터를 `oneshot`으로 호출합니다.
#![allow(dead_code)]

use std::collections::HashMap;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use healing_server::config::migration::migrate_up;
use healing_server::config::AppConfig;
use healing_server::domain::user::entity::user;
use healing_server::{create_router, AppState};
use http_body_util::BodyExt;
use sea_orm::{
    ActiveModelTrait, ConnectOptions, Database, EntityTrait, IntoActiveModel, Set,
};
use serde_json::{json, Value};
use tower::util::ServiceExt;

pub const PASSWORD: &str = "password123!";

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

fn test_config() -> AppConfig {
    let env: HashMap<&str, &str> = HashMap::from([
        ("DATABASE_URL", "sqlite::memory:"),
        ("JWT_SECRET", "integration-test-secret"),
        ("BCRYPT_COST", "4"),
        ("DB_RUN_MIGRATIONS", "false"),
        ("SEED_SAMPLE_DATA", "false"),
        ("APP_ENV", "test"),
    ]);
    AppConfig::from_lookup(|key| env.get(key).map(|v| v.to_string()))
        .expect("test config should be valid")
}

pub async fn setup() -> TestApp {
    let config = test_config();

    // 인메모리 DB는 연결마다 별개이므로 연결 하나만 사용
    let mut options = ConnectOptions::new(config.database_url.clone());
    options.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(options).await.expect("connect sqlite");
    migrate_up(&db).await.expect("migrate");

    let state = AppState { db, config };
    TestApp {
        router: create_router(state.clone()),
        state,
    }
}

impl TestApp {
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        self.request_with_headers(method, uri, token, body, &[]).await
    }

    pub async fn request_with_headers(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
        headers: &[(&str, &str)],
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, token, None).await
    }

    /// 회원가입 후 사용자 ID 반환
    pub async fn register(&self, email: &str, name: &str) -> i64 {
        let (status, body) = self
            .post(
                "/api/v1/auth/register",
                None,
                json!({ "email": email, "password": PASSWORD, "name": name }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "register failed: {body}");
        body["result"]["id"].as_i64().unwrap()
    }

    pub async fn login(&self, email: &str) -> String {
        let (status, body) = self
            .post(
                "/api/v1/auth/login",
                None,
                json!({ "email": email, "password": PASSWORD }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        body["result"]["access_token"].as_str().unwrap().to_string()
    }

    /// 회원가입 + 로그인
    pub async fn user(&self, email: &str, name: &str) -> (i64, String) {
        let id = self.register(email, name).await;
        let token = self.login(email).await;
        (id, token)
    }

    pub async fn admin(&self) -> (i64, String) {
        let id = self.register("admin@healing.test", "관리자").await;
        self.set_flags(id, |active| active.is_admin = Set(true)).await;
        (id, self.login("admin@healing.test").await)
    }

    pub async fn counselor_user(&self) -> (i64, String) {
        let id = self.register("counselor@healing.test", "상담사").await;
        self.set_flags(id, |active| active.is_counselor = Set(true)).await;
        (id, self.login("counselor@healing.test").await)
    }

    pub async fn set_flags(&self, user_id: i64, apply: impl FnOnce(&mut user::ActiveModel)) {
        let model = user::Entity::find_by_id(user_id)
            .one(&self.state.db)
            .await
            .unwrap()
            .expect("user exists");
        let mut active = model.into_active_model();
        apply(&mut active);
        active.update(&self.state.db).await.unwrap();
    }

    /// 관리자 권한으로 상담사 등록 후 ID 반환
    pub async fn create_counselor(&self, admin_token: &str, email: &str) -> i64 {
        let (status, body) = self
            .post(
                "/api/v1/counselors",
                Some(admin_token),
                json!({ "name": "김상담", "email": email, "specialization": "트라우마" }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "create counselor failed: {body}");
        body["result"]["id"].as_i64().unwrap()
    }

    /// 상담 신청 후 ID 반환
    pub async fn create_consultation(&self, token: Option<&str>, title: &str) -> i64 {
        let (status, body) = self
            .post("/api/v1/consultations", token, consultation_body(title))
            .await;
        assert_eq!(status, StatusCode::OK, "create consultation failed: {body}");
        body["result"]["id"].as_i64().unwrap()
    }
}

pub fn consultation_body(title: &str) -> Value {
    json!({
        "consultation_type": "individual",
        "urgency_level": "medium",
        "title": title,
        "description": "요즘 잠을 잘 못 자고 불안합니다.",
        "contact_name": "홍길동",
        "contact_phone": "010-1234-5678",
        "contact_email": "hong@example.com"
    })
}
