use axum::{
    extract::{Path, State},
    Json,
};

use super::dto::{ProgressResponse, StepResponse, UpsertProgressRequest, UpsertStepRequest};
use super::service::HealingService;
use crate::state::AppState;
use crate::utils::auth::CurrentUser;
use crate::utils::error::AppError;
use crate::utils::extract::ValidJson;
use crate::utils::BaseResponse;

/// 힐링 진행 현황 조회
#[utoipa::path(
    get,
    path = "/api/v1/consultations/{consultation_id}/healing/progress",
    params(("consultation_id" = i64, Path, description = "상담 신청 ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "조회 성공", body = ProgressResponse),
        (status = 403, description = "접근 권한 없음", body = ErrorResponse),
        (status = 404, description = "기록 없음", body = ErrorResponse)
    ),
    tag = "Healing"
)]
pub async fn get_progress(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(consultation_id): Path<i64>,
) -> Result<Json<BaseResponse<ProgressResponse>>, AppError> {
    let result = HealingService::get_progress(&state, &user, consultation_id).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 힐링 진행 현황 저장
#[utoipa::path(
    put,
    path = "/api/v1/consultations/{consultation_id}/healing/progress",
    params(("consultation_id" = i64, Path, description = "상담 신청 ID")),
    request_body = UpsertProgressRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "저장 성공", body = ProgressResponse),
        (status = 400, description = "단계 범위 오류", body = ErrorResponse),
        (status = 403, description = "접근 권한 없음", body = ErrorResponse)
    ),
    tag = "Healing"
)]
pub async fn upsert_progress(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(consultation_id): Path<i64>,
    ValidJson(req): ValidJson<UpsertProgressRequest>,
) -> Result<Json<BaseResponse<ProgressResponse>>, AppError> {
    let result = HealingService::upsert_progress(&state, &user, consultation_id, req).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 단계 기록 목록
#[utoipa::path(
    get,
    path = "/api/v1/consultations/{consultation_id}/healing/steps",
    params(("consultation_id" = i64, Path, description = "상담 신청 ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "조회 성공", body = [StepResponse]),
        (status = 403, description = "접근 권한 없음", body = ErrorResponse)
    ),
    tag = "Healing"
)]
pub async fn list_steps(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(consultation_id): Path<i64>,
) -> Result<Json<BaseResponse<Vec<StepResponse>>>, AppError> {
    let result = HealingService::list_steps(&state, &user, consultation_id).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 단계 기록 조회
#[utoipa::path(
    get,
    path = "/api/v1/consultations/{consultation_id}/healing/steps/{step_number}",
    params(
        ("consultation_id" = i64, Path, description = "상담 신청 ID"),
        ("step_number" = i32, Path, description = "단계 번호 (1~12)")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "조회 성공", body = StepResponse),
        (status = 404, description = "기록 없음", body = ErrorResponse)
    ),
    tag = "Healing"
)]
pub async fn get_step(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path((consultation_id, step_number)): Path<(i64, i32)>,
) -> Result<Json<BaseResponse<StepResponse>>, AppError> {
    let result = HealingService::get_step(&state, &user, consultation_id, step_number).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 단계 기록 저장
#[utoipa::path(
    put,
    path = "/api/v1/consultations/{consultation_id}/healing/steps/{step_number}",
    params(
        ("consultation_id" = i64, Path, description = "상담 신청 ID"),
        ("step_number" = i32, Path, description = "단계 번호 (1~12)")
    ),
    request_body = UpsertStepRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "저장 성공", body = StepResponse),
        (status = 400, description = "단계/스트레스 지수 범위 오류", body = ErrorResponse),
        (status = 403, description = "접근 권한 없음", body = ErrorResponse)
    ),
    tag = "Healing"
)]
pub async fn upsert_step(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path((consultation_id, step_number)): Path<(i64, i32)>,
    ValidJson(req): ValidJson<UpsertStepRequest>,
) -> Result<Json<BaseResponse<StepResponse>>, AppError> {
    let result =
        HealingService::upsert_step(&state, &user, consultation_id, step_number, req).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 단계 기록 삭제
#[utoipa::path(
    delete,
    path = "/api/v1/consultations/{consultation_id}/healing/steps/{step_number}",
    params(
        ("consultation_id" = i64, Path, description = "상담 신청 ID"),
        ("step_number" = i32, Path, description = "단계 번호 (1~12)")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "삭제 성공", body = MessageResponse),
        (status = 404, description = "기록 없음", body = ErrorResponse)
    ),
    tag = "Healing"
)]
pub async fn delete_step(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path((consultation_id, step_number)): Path<(i64, i32)>,
) -> Result<Json<BaseResponse<()>>, AppError> {
    HealingService::delete_step(&state, &user, consultation_id, step_number).await?;
    Ok(Json(BaseResponse::message_only("단계 기록이 삭제되었습니다.")))
}
