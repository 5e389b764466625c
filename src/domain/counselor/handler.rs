use axum::{
    extract::{Path, Query, State},
    Json,
};

use super::dto::{
    CounselorFilter, CounselorResponse, CreateCounselorRequest, UpdateCounselorRequest,
};
use super::service::CounselorService;
use crate::state::AppState;
use crate::utils::auth::AdminUser;
use crate::utils::error::AppError;
use crate::utils::extract::ValidJson;
use crate::utils::pagination::{PageQuery, PageResponse};
use crate::utils::BaseResponse;

/// 상담사 목록 조회
#[utoipa::path(
    get,
    path = "/api/v1/counselors",
    params(PageQuery, CounselorFilter),
    responses(
        (status = 200, description = "조회 성공", body = CounselorPage),
        (status = 400, description = "잘못된 페이지 파라미터", body = ErrorResponse)
    ),
    tag = "Counselor"
)]
pub async fn list_counselors(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
    Query(filter): Query<CounselorFilter>,
) -> Result<Json<BaseResponse<PageResponse<CounselorResponse>>>, AppError> {
    let result = CounselorService::list_counselors(&state, filter, page.checked()?).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 온라인 상담사 목록
#[utoipa::path(
    get,
    path = "/api/v1/counselors/online",
    responses(
        (status = 200, description = "조회 성공", body = [CounselorResponse])
    ),
    tag = "Counselor"
)]
pub async fn list_online_counselors(
    State(state): State<AppState>,
) -> Result<Json<BaseResponse<Vec<CounselorResponse>>>, AppError> {
    let result = CounselorService::list_online(&state).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 상담사 상세 조회
#[utoipa::path(
    get,
    path = "/api/v1/counselors/{counselor_id}",
    params(("counselor_id" = i64, Path, description = "상담사 ID")),
    responses(
        (status = 200, description = "조회 성공", body = CounselorResponse),
        (status = 404, description = "상담사 없음", body = ErrorResponse)
    ),
    tag = "Counselor"
)]
pub async fn get_counselor(
    State(state): State<AppState>,
    Path(counselor_id): Path<i64>,
) -> Result<Json<BaseResponse<CounselorResponse>>, AppError> {
    let counselor = CounselorService::find_counselor(&state, counselor_id).await?;
    Ok(Json(BaseResponse::success(counselor.into())))
}

/// 상담사 등록 (관리자)
#[utoipa::path(
    post,
    path = "/api/v1/counselors",
    request_body = CreateCounselorRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "등록 성공", body = CounselorResponse),
        (status = 403, description = "관리자 아님", body = ErrorResponse),
        (status = 409, description = "이메일 중복", body = ErrorResponse)
    ),
    tag = "Counselor"
)]
pub async fn create_counselor(
    State(state): State<AppState>,
    _admin: AdminUser,
    ValidJson(req): ValidJson<CreateCounselorRequest>,
) -> Result<Json<BaseResponse<CounselorResponse>>, AppError> {
    let result = CounselorService::create_counselor(&state, req).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 상담사 정보 수정 (관리자)
#[utoipa::path(
    put,
    path = "/api/v1/counselors/{counselor_id}",
    params(("counselor_id" = i64, Path, description = "상담사 ID")),
    request_body = UpdateCounselorRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "수정 성공", body = CounselorResponse),
        (status = 403, description = "관리자 아님", body = ErrorResponse),
        (status = 404, description = "상담사 없음", body = ErrorResponse)
    ),
    tag = "Counselor"
)]
pub async fn update_counselor(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(counselor_id): Path<i64>,
    ValidJson(req): ValidJson<UpdateCounselorRequest>,
) -> Result<Json<BaseResponse<CounselorResponse>>, AppError> {
    let result = CounselorService::update_counselor(&state, counselor_id, req).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 상담사 삭제 (관리자)
#[utoipa::path(
    delete,
    path = "/api/v1/counselors/{counselor_id}",
    params(("counselor_id" = i64, Path, description = "상담사 ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "삭제 성공", body = MessageResponse),
        (status = 403, description = "관리자 아님", body = ErrorResponse),
        (status = 404, description = "상담사 없음", body = ErrorResponse)
    ),
    tag = "Counselor"
)]
pub async fn delete_counselor(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(counselor_id): Path<i64>,
) -> Result<Json<BaseResponse<()>>, AppError> {
    CounselorService::delete_counselor(&state, counselor_id).await?;
    Ok(Json(BaseResponse::message_only("상담사가 삭제되었습니다.")))
}

/// 상담사 활성 상태 토글
///
/// 기존 운영 화면과의 호환을 위해 인증 없이 열려 있습니다.
#[utoipa::path(
    patch,
    path = "/api/v1/counselors/{counselor_id}/toggle-status",
    params(("counselor_id" = i64, Path, description = "상담사 ID")),
    responses(
        (status = 200, description = "변경 성공", body = CounselorResponse),
        (status = 404, description = "상담사 없음", body = ErrorResponse)
    ),
    tag = "Counselor"
)]
pub async fn toggle_counselor_status(
    State(state): State<AppState>,
    Path(counselor_id): Path<i64>,
) -> Result<Json<BaseResponse<CounselorResponse>>, AppError> {
    let result = CounselorService::toggle_status(&state, counselor_id).await?;
    Ok(Json(BaseResponse::success(result)))
}
