use axum::{
    extract::{Path, Query, State},
    Json,
};

use super::dto::{
    ChecklistDetailResponse, ChecklistItemResponse, ChecklistMasterFilter,
    ChecklistMasterResponse, ChecklistResponseFilter, ChecklistResponseItem, ChecklistSummary,
    ChecklistSummaryQuery, CreateChecklistItemRequest, CreateChecklistMasterRequest,
    SubmitChecklistRequest, UpdateChecklistItemRequest, UpdateChecklistMasterRequest,
};
use super::service::ChecklistService;
use crate::state::AppState;
use crate::utils::auth::{AdminUser, CurrentUser};
use crate::utils::error::AppError;
use crate::utils::extract::ValidJson;
use crate::utils::pagination::{PageQuery, PageResponse};
use crate::utils::BaseResponse;

/// 체크리스트 목록
#[utoipa::path(
    get,
    path = "/api/v1/checklists",
    params(PageQuery, ChecklistMasterFilter),
    responses(
        (status = 200, description = "조회 성공", body = ChecklistMasterPage)
    ),
    tag = "Checklist"
)]
pub async fn list_checklists(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
    Query(filter): Query<ChecklistMasterFilter>,
) -> Result<Json<BaseResponse<PageResponse<ChecklistMasterResponse>>>, AppError> {
    let result = ChecklistService::list_masters(&state, filter, page.checked()?).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 체크리스트 상세 (문항 포함)
#[utoipa::path(
    get,
    path = "/api/v1/checklists/{master_id}",
    params(("master_id" = i64, Path, description = "체크리스트 ID")),
    responses(
        (status = 200, description = "조회 성공", body = ChecklistDetailResponse),
        (status = 404, description = "체크리스트 없음", body = ErrorResponse)
    ),
    tag = "Checklist"
)]
pub async fn get_checklist(
    State(state): State<AppState>,
    Path(master_id): Path<i64>,
) -> Result<Json<BaseResponse<ChecklistDetailResponse>>, AppError> {
    let result = ChecklistService::get_master(&state, master_id).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 체크리스트 등록 (관리자)
#[utoipa::path(
    post,
    path = "/api/v1/checklists",
    request_body = CreateChecklistMasterRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "등록 성공", body = ChecklistMasterResponse),
        (status = 403, description = "관리자 아님", body = ErrorResponse)
    ),
    tag = "Checklist"
)]
pub async fn create_checklist(
    State(state): State<AppState>,
    _admin: AdminUser,
    ValidJson(req): ValidJson<CreateChecklistMasterRequest>,
) -> Result<Json<BaseResponse<ChecklistMasterResponse>>, AppError> {
    let result = ChecklistService::create_master(&state, req).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 체크리스트 수정 (관리자)
#[utoipa::path(
    put,
    path = "/api/v1/checklists/{master_id}",
    params(("master_id" = i64, Path, description = "체크리스트 ID")),
    request_body = UpdateChecklistMasterRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "수정 성공", body = ChecklistMasterResponse),
        (status = 403, description = "관리자 아님", body = ErrorResponse),
        (status = 404, description = "체크리스트 없음", body = ErrorResponse)
    ),
    tag = "Checklist"
)]
pub async fn update_checklist(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(master_id): Path<i64>,
    ValidJson(req): ValidJson<UpdateChecklistMasterRequest>,
) -> Result<Json<BaseResponse<ChecklistMasterResponse>>, AppError> {
    let result = ChecklistService::update_master(&state, master_id, req).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 체크리스트 삭제 (관리자, 문항과 응답도 함께 삭제)
#[utoipa::path(
    delete,
    path = "/api/v1/checklists/{master_id}",
    params(("master_id" = i64, Path, description = "체크리스트 ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "삭제 성공", body = MessageResponse),
        (status = 403, description = "관리자 아님", body = ErrorResponse),
        (status = 404, description = "체크리스트 없음", body = ErrorResponse)
    ),
    tag = "Checklist"
)]
pub async fn delete_checklist(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(master_id): Path<i64>,
) -> Result<Json<BaseResponse<()>>, AppError> {
    ChecklistService::delete_master(&state, master_id).await?;
    Ok(Json(BaseResponse::message_only("체크리스트가 삭제되었습니다.")))
}

/// 문항 목록 (순서대로)
#[utoipa::path(
    get,
    path = "/api/v1/checklists/{master_id}/items",
    params(("master_id" = i64, Path, description = "체크리스트 ID")),
    responses(
        (status = 200, description = "조회 성공", body = [ChecklistItemResponse]),
        (status = 404, description = "체크리스트 없음", body = ErrorResponse)
    ),
    tag = "Checklist"
)]
pub async fn list_items(
    State(state): State<AppState>,
    Path(master_id): Path<i64>,
) -> Result<Json<BaseResponse<Vec<ChecklistItemResponse>>>, AppError> {
    let master = ChecklistService::find_master(&state, master_id).await?;
    let result = ChecklistService::list_items(&state, master.id).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 문항 추가 (관리자)
#[utoipa::path(
    post,
    path = "/api/v1/checklists/{master_id}/items",
    params(("master_id" = i64, Path, description = "체크리스트 ID")),
    request_body = CreateChecklistItemRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "추가 성공", body = ChecklistItemResponse),
        (status = 400, description = "선택지 누락 등 잘못된 요청", body = ErrorResponse),
        (status = 403, description = "관리자 아님", body = ErrorResponse)
    ),
    tag = "Checklist"
)]
pub async fn create_item(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(master_id): Path<i64>,
    ValidJson(req): ValidJson<CreateChecklistItemRequest>,
) -> Result<Json<BaseResponse<ChecklistItemResponse>>, AppError> {
    let result = ChecklistService::create_item(&state, master_id, req).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 문항 수정 (관리자)
#[utoipa::path(
    put,
    path = "/api/v1/checklists/{master_id}/items/{item_id}",
    params(
        ("master_id" = i64, Path, description = "체크리스트 ID"),
        ("item_id" = i64, Path, description = "문항 ID")
    ),
    request_body = UpdateChecklistItemRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "수정 성공", body = ChecklistItemResponse),
        (status = 403, description = "관리자 아님", body = ErrorResponse),
        (status = 404, description = "문항 없음", body = ErrorResponse)
    ),
    tag = "Checklist"
)]
pub async fn update_item(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path((master_id, item_id)): Path<(i64, i64)>,
    ValidJson(req): ValidJson<UpdateChecklistItemRequest>,
) -> Result<Json<BaseResponse<ChecklistItemResponse>>, AppError> {
    let result = ChecklistService::update_item(&state, master_id, item_id, req).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 문항 삭제 (관리자)
#[utoipa::path(
    delete,
    path = "/api/v1/checklists/{master_id}/items/{item_id}",
    params(
        ("master_id" = i64, Path, description = "체크리스트 ID"),
        ("item_id" = i64, Path, description = "문항 ID")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "삭제 성공", body = MessageResponse),
        (status = 403, description = "관리자 아님", body = ErrorResponse),
        (status = 404, description = "문항 없음", body = ErrorResponse)
    ),
    tag = "Checklist"
)]
pub async fn delete_item(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path((master_id, item_id)): Path<(i64, i64)>,
) -> Result<Json<BaseResponse<()>>, AppError> {
    ChecklistService::delete_item(&state, master_id, item_id).await?;
    Ok(Json(BaseResponse::message_only("문항이 삭제되었습니다.")))
}

/// 체크리스트 응답 제출
#[utoipa::path(
    post,
    path = "/api/v1/checklists/{master_id}/responses",
    params(("master_id" = i64, Path, description = "체크리스트 ID")),
    request_body = SubmitChecklistRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "제출 성공", body = [ChecklistResponseItem]),
        (status = 400, description = "체크리스트에 없는 문항 등 잘못된 요청", body = ErrorResponse),
        (status = 403, description = "본인 상담 신청 아님", body = ErrorResponse),
        (status = 404, description = "체크리스트 또는 상담 신청 없음", body = ErrorResponse)
    ),
    tag = "Checklist"
)]
pub async fn submit_responses(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(master_id): Path<i64>,
    ValidJson(req): ValidJson<SubmitChecklistRequest>,
) -> Result<Json<BaseResponse<Vec<ChecklistResponseItem>>>, AppError> {
    let result = ChecklistService::submit_responses(&state, &user, master_id, req).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 내 체크리스트 응답 목록
#[utoipa::path(
    get,
    path = "/api/v1/checklists/responses/me",
    params(ChecklistResponseFilter),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "조회 성공", body = [ChecklistResponseItem]),
        (status = 401, description = "인증 실패", body = ErrorResponse)
    ),
    tag = "Checklist"
)]
pub async fn list_my_responses(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(filter): Query<ChecklistResponseFilter>,
) -> Result<Json<BaseResponse<Vec<ChecklistResponseItem>>>, AppError> {
    let result = ChecklistService::list_my_responses(&state, &user, filter).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 체크리스트 작성 현황
#[utoipa::path(
    get,
    path = "/api/v1/checklists/{master_id}/summary",
    params(("master_id" = i64, Path, description = "체크리스트 ID"), ChecklistSummaryQuery),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "조회 성공", body = ChecklistSummary),
        (status = 403, description = "접근 권한 없음", body = ErrorResponse),
        (status = 404, description = "체크리스트 또는 상담 신청 없음", body = ErrorResponse)
    ),
    tag = "Checklist"
)]
pub async fn checklist_summary(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(master_id): Path<i64>,
    Query(query): Query<ChecklistSummaryQuery>,
) -> Result<Json<BaseResponse<ChecklistSummary>>, AppError> {
    let result =
        ChecklistService::summary(&state, &user, master_id, query.consultation_id).await?;
    Ok(Json(BaseResponse::success(result)))
}
