use axum::{
    extract::{Path, Query, State},
    Json,
};

use super::dto::{
    ConsultationFilter, ConsultationResponse, ConsultationStats, CreateConsultationRequest,
    CreateSessionRequest, PublicConsultationItem, SessionResponse, UpdateConsultationRequest,
    UpdateSessionRequest,
};
use super::service::ConsultationService;
use crate::state::AppState;
use crate::utils::auth::{require_staff, AdminUser, CurrentUser, MaybeUser};
use crate::utils::error::AppError;
use crate::utils::extract::ValidJson;
use crate::utils::pagination::{PageQuery, PageResponse};
use crate::utils::BaseResponse;

/// 상담 신청
///
/// 로그인하지 않은 방문자도 신청할 수 있습니다.
#[utoipa::path(
    post,
    path = "/api/v1/consultations",
    request_body = CreateConsultationRequest,
    responses(
        (status = 200, description = "신청 성공", body = ConsultationResponse),
        (status = 400, description = "잘못된 요청", body = ErrorResponse)
    ),
    tag = "Consultation"
)]
pub async fn create_consultation(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    ValidJson(req): ValidJson<CreateConsultationRequest>,
) -> Result<Json<BaseResponse<ConsultationResponse>>, AppError> {
    let result = ConsultationService::create_consultation(&state, user.as_ref(), req).await?;
    Ok(Json(BaseResponse::success_with_message(
        result,
        "상담 신청이 접수되었습니다.",
    )))
}

/// 내 상담 신청 목록
#[utoipa::path(
    get,
    path = "/api/v1/consultations",
    params(PageQuery, ConsultationFilter),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "조회 성공", body = ConsultationPage),
        (status = 401, description = "인증 실패", body = ErrorResponse)
    ),
    tag = "Consultation"
)]
pub async fn list_my_consultations(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(page): Query<PageQuery>,
    Query(filter): Query<ConsultationFilter>,
) -> Result<Json<BaseResponse<PageResponse<ConsultationResponse>>>, AppError> {
    let result =
        ConsultationService::list_my_consultations(&state, &user, filter, page.checked()?).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 공개 상담 신청 목록 (연락처 제외)
#[utoipa::path(
    get,
    path = "/api/v1/consultations/public",
    params(PageQuery, ConsultationFilter),
    responses(
        (status = 200, description = "조회 성공", body = PublicConsultationPage)
    ),
    tag = "Consultation"
)]
pub async fn list_public_consultations(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
    Query(filter): Query<ConsultationFilter>,
) -> Result<Json<BaseResponse<PageResponse<PublicConsultationItem>>>, AppError> {
    let result =
        ConsultationService::list_public_consultations(&state, filter, page.checked()?).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 전체 상담 신청 목록 (관리자)
#[utoipa::path(
    get,
    path = "/api/v1/consultations/admin",
    params(PageQuery, ConsultationFilter),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "조회 성공", body = ConsultationPage),
        (status = 403, description = "관리자 아님", body = ErrorResponse)
    ),
    tag = "Consultation"
)]
pub async fn list_all_consultations(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(page): Query<PageQuery>,
    Query(filter): Query<ConsultationFilter>,
) -> Result<Json<BaseResponse<PageResponse<ConsultationResponse>>>, AppError> {
    let result =
        ConsultationService::list_all_consultations(&state, filter, page.checked()?).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 상태별 통계 (관리자/상담사)
#[utoipa::path(
    get,
    path = "/api/v1/consultations/stats/overview",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "조회 성공", body = ConsultationStats),
        (status = 403, description = "권한 없음", body = ErrorResponse)
    ),
    tag = "Consultation"
)]
pub async fn consultation_stats(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<BaseResponse<ConsultationStats>>, AppError> {
    require_staff(&user)?;
    let result = ConsultationService::stats(&state).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 상담 신청 상세
#[utoipa::path(
    get,
    path = "/api/v1/consultations/{consultation_id}",
    params(("consultation_id" = i64, Path, description = "상담 신청 ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "조회 성공", body = ConsultationResponse),
        (status = 403, description = "접근 권한 없음", body = ErrorResponse),
        (status = 404, description = "신청 없음", body = ErrorResponse)
    ),
    tag = "Consultation"
)]
pub async fn get_consultation(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(consultation_id): Path<i64>,
) -> Result<Json<BaseResponse<ConsultationResponse>>, AppError> {
    let result = ConsultationService::get_consultation(&state, &user, consultation_id).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 상담 신청 수정
#[utoipa::path(
    put,
    path = "/api/v1/consultations/{consultation_id}",
    params(("consultation_id" = i64, Path, description = "상담 신청 ID")),
    request_body = UpdateConsultationRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "수정 성공", body = ConsultationResponse),
        (status = 403, description = "접근 권한 없음 또는 상태 변경 권한 없음", body = ErrorResponse),
        (status = 404, description = "신청 없음", body = ErrorResponse)
    ),
    tag = "Consultation"
)]
pub async fn update_consultation(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(consultation_id): Path<i64>,
    ValidJson(req): ValidJson<UpdateConsultationRequest>,
) -> Result<Json<BaseResponse<ConsultationResponse>>, AppError> {
    let result =
        ConsultationService::update_consultation(&state, &user, consultation_id, req).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 상담 신청 삭제
#[utoipa::path(
    delete,
    path = "/api/v1/consultations/{consultation_id}",
    params(("consultation_id" = i64, Path, description = "상담 신청 ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "삭제 성공", body = MessageResponse),
        (status = 403, description = "접근 권한 없음", body = ErrorResponse),
        (status = 404, description = "신청 없음", body = ErrorResponse)
    ),
    tag = "Consultation"
)]
pub async fn delete_consultation(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(consultation_id): Path<i64>,
) -> Result<Json<BaseResponse<()>>, AppError> {
    ConsultationService::delete_consultation(&state, &user, consultation_id).await?;
    Ok(Json(BaseResponse::message_only("상담 신청이 삭제되었습니다.")))
}

/// 상담 회기 등록 (상담사)
#[utoipa::path(
    post,
    path = "/api/v1/consultations/{consultation_id}/sessions",
    params(("consultation_id" = i64, Path, description = "상담 신청 ID")),
    request_body = CreateSessionRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "등록 성공", body = SessionResponse),
        (status = 403, description = "상담사 아님", body = ErrorResponse),
        (status = 404, description = "신청 없음", body = ErrorResponse)
    ),
    tag = "Consultation"
)]
pub async fn add_session(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(consultation_id): Path<i64>,
    ValidJson(req): ValidJson<CreateSessionRequest>,
) -> Result<Json<BaseResponse<SessionResponse>>, AppError> {
    let result = ConsultationService::add_session(&state, &user, consultation_id, req).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 상담 회기 목록
#[utoipa::path(
    get,
    path = "/api/v1/consultations/{consultation_id}/sessions",
    params(("consultation_id" = i64, Path, description = "상담 신청 ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "조회 성공", body = [SessionResponse]),
        (status = 403, description = "접근 권한 없음", body = ErrorResponse),
        (status = 404, description = "신청 없음", body = ErrorResponse)
    ),
    tag = "Consultation"
)]
pub async fn list_sessions(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(consultation_id): Path<i64>,
) -> Result<Json<BaseResponse<Vec<SessionResponse>>>, AppError> {
    let result = ConsultationService::list_sessions(&state, &user, consultation_id).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 상담 회기 수정 (관리자/상담사)
#[utoipa::path(
    put,
    path = "/api/v1/consultations/{consultation_id}/sessions/{session_id}",
    params(
        ("consultation_id" = i64, Path, description = "상담 신청 ID"),
        ("session_id" = i64, Path, description = "회기 ID")
    ),
    request_body = UpdateSessionRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "수정 성공", body = SessionResponse),
        (status = 403, description = "권한 없음", body = ErrorResponse),
        (status = 404, description = "회기 없음", body = ErrorResponse)
    ),
    tag = "Consultation"
)]
pub async fn update_session(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path((consultation_id, session_id)): Path<(i64, i64)>,
    ValidJson(req): ValidJson<UpdateSessionRequest>,
) -> Result<Json<BaseResponse<SessionResponse>>, AppError> {
    let result =
        ConsultationService::update_session(&state, &user, consultation_id, session_id, req)
            .await?;
    Ok(Json(BaseResponse::success(result)))
}
