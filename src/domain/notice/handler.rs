use axum::{
    extract::{Path, Query, State},
    Json,
};

use super::dto::{
    CreateNoticeRequest, NoticeFilter, NoticeResponse, PublishedNoticeFilter, UpdateNoticeRequest,
};
use super::service::NoticeService;
use crate::state::AppState;
use crate::utils::auth::{AdminUser, MaybeUser};
use crate::utils::error::AppError;
use crate::utils::extract::ValidJson;
use crate::utils::pagination::{PageQuery, PageResponse};
use crate::utils::BaseResponse;

/// 공지사항 작성 (관리자)
#[utoipa::path(
    post,
    path = "/api/v1/notices",
    request_body = CreateNoticeRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "작성 성공", body = NoticeResponse),
        (status = 403, description = "관리자 아님", body = ErrorResponse)
    ),
    tag = "Notice"
)]
pub async fn create_notice(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    ValidJson(req): ValidJson<CreateNoticeRequest>,
) -> Result<Json<BaseResponse<NoticeResponse>>, AppError> {
    let result = NoticeService::create_notice(&state, &admin, req).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 공지사항 목록
#[utoipa::path(
    get,
    path = "/api/v1/notices",
    params(PageQuery, NoticeFilter),
    responses(
        (status = 200, description = "조회 성공", body = NoticePage)
    ),
    tag = "Notice"
)]
pub async fn list_notices(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
    Query(filter): Query<NoticeFilter>,
) -> Result<Json<BaseResponse<PageResponse<NoticeResponse>>>, AppError> {
    let result = NoticeService::list_notices(&state, filter, page.checked()?).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 발행된 공지사항 목록
#[utoipa::path(
    get,
    path = "/api/v1/notices/published",
    params(PageQuery, PublishedNoticeFilter),
    responses(
        (status = 200, description = "조회 성공", body = NoticePage)
    ),
    tag = "Notice"
)]
pub async fn list_published_notices(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
    Query(filter): Query<PublishedNoticeFilter>,
) -> Result<Json<BaseResponse<PageResponse<NoticeResponse>>>, AppError> {
    let result = NoticeService::list_published(&state, filter.notice_type, page.checked()?).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 공지사항 상세 (조회수 증가)
#[utoipa::path(
    get,
    path = "/api/v1/notices/{notice_id}",
    params(("notice_id" = i64, Path, description = "공지사항 ID")),
    responses(
        (status = 200, description = "조회 성공", body = NoticeResponse),
        (status = 404, description = "공지 없음", body = ErrorResponse)
    ),
    tag = "Notice"
)]
pub async fn get_notice(
    State(state): State<AppState>,
    MaybeUser(viewer): MaybeUser,
    Path(notice_id): Path<i64>,
) -> Result<Json<BaseResponse<NoticeResponse>>, AppError> {
    let result = NoticeService::view_notice(&state, viewer.as_ref(), notice_id).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 공지사항 수정 (관리자)
#[utoipa::path(
    put,
    path = "/api/v1/notices/{notice_id}",
    params(("notice_id" = i64, Path, description = "공지사항 ID")),
    request_body = UpdateNoticeRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "수정 성공", body = NoticeResponse),
        (status = 403, description = "관리자 아님", body = ErrorResponse),
        (status = 404, description = "공지 없음", body = ErrorResponse)
    ),
    tag = "Notice"
)]
pub async fn update_notice(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(notice_id): Path<i64>,
    ValidJson(req): ValidJson<UpdateNoticeRequest>,
) -> Result<Json<BaseResponse<NoticeResponse>>, AppError> {
    let result = NoticeService::update_notice(&state, notice_id, req).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 공지사항 삭제 (관리자)
#[utoipa::path(
    delete,
    path = "/api/v1/notices/{notice_id}",
    params(("notice_id" = i64, Path, description = "공지사항 ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "삭제 성공", body = MessageResponse),
        (status = 403, description = "관리자 아님", body = ErrorResponse),
        (status = 404, description = "공지 없음", body = ErrorResponse)
    ),
    tag = "Notice"
)]
pub async fn delete_notice(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(notice_id): Path<i64>,
) -> Result<Json<BaseResponse<()>>, AppError> {
    NoticeService::delete_notice(&state, notice_id).await?;
    Ok(Json(BaseResponse::message_only("공지사항이 삭제되었습니다.")))
}
