use axum::{extract::State, Json};

use super::dto::{HealthStatus, ServiceInfo};
use super::service::check_health;
use crate::state::AppState;

/// 서비스 정보
#[utoipa::path(
    get,
    path = "/",
    tag = "Health",
    responses((status = 200, description = "서비스 정보", body = ServiceInfo))
)]
pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        docs: "/swagger-ui",
    })
}

/// 헬스체크
///
/// DB 연결 상태와 가동 시간을 반환합니다.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses((status = 200, description = "헬스체크 성공", body = HealthStatus))
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(check_health(&state.db).await)
}
