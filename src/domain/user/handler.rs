use axum::{
    extract::{Path, Query, State},
    Json,
};

use super::dto::{AdminUpdateUserRequest, UpdateMeRequest, UserFilter, UserResponse};
use super::service::UserService;
use crate::state::AppState;
use crate::utils::auth::{AdminUser, CurrentUser};
use crate::utils::error::AppError;
use crate::utils::extract::ValidJson;
use crate::utils::pagination::{PageQuery, PageResponse};
use crate::utils::BaseResponse;

/// 사용자 목록 조회 (관리자)
#[utoipa::path(
    get,
    path = "/api/v1/users",
    params(PageQuery, UserFilter),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "조회 성공", body = UserPage),
        (status = 401, description = "인증 실패", body = ErrorResponse),
        (status = 403, description = "관리자 아님", body = ErrorResponse)
    ),
    tag = "User"
)]
pub async fn list_users(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(page): Query<PageQuery>,
    Query(filter): Query<UserFilter>,
) -> Result<Json<BaseResponse<PageResponse<UserResponse>>>, AppError> {
    let result = UserService::list_users(&state, filter, page.checked()?).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 내 정보 수정
#[utoipa::path(
    patch,
    path = "/api/v1/users/me",
    request_body = UpdateMeRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "수정 성공", body = UserResponse),
        (status = 400, description = "잘못된 요청", body = ErrorResponse),
        (status = 401, description = "인증 실패", body = ErrorResponse)
    ),
    tag = "User"
)]
pub async fn update_me(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ValidJson(req): ValidJson<UpdateMeRequest>,
) -> Result<Json<BaseResponse<UserResponse>>, AppError> {
    let result = UserService::update_me(&state, user, req).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 회원 탈퇴
///
/// 본인 계정과 연관 데이터가 모두 삭제됩니다.
#[utoipa::path(
    delete,
    path = "/api/v1/users/me",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "탈퇴 성공", body = MessageResponse),
        (status = 401, description = "인증 실패", body = ErrorResponse)
    ),
    tag = "User"
)]
pub async fn withdraw(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<BaseResponse<()>>, AppError> {
    UserService::delete_user(&state, user.id).await?;
    Ok(Json(BaseResponse::message_only("회원 탈퇴가 완료되었습니다.")))
}

/// 사용자 상태/권한 변경 (관리자)
#[utoipa::path(
    patch,
    path = "/api/v1/users/{user_id}",
    params(("user_id" = i64, Path, description = "사용자 ID")),
    request_body = AdminUpdateUserRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "변경 성공", body = UserResponse),
        (status = 403, description = "관리자 아님", body = ErrorResponse),
        (status = 404, description = "사용자 없음", body = ErrorResponse)
    ),
    tag = "User"
)]
pub async fn admin_update_user(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(user_id): Path<i64>,
    ValidJson(req): ValidJson<AdminUpdateUserRequest>,
) -> Result<Json<BaseResponse<UserResponse>>, AppError> {
    let result = UserService::admin_update(&state, user_id, req).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 사용자 삭제 (관리자)
#[utoipa::path(
    delete,
    path = "/api/v1/users/{user_id}",
    params(("user_id" = i64, Path, description = "사용자 ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "삭제 성공", body = MessageResponse),
        (status = 403, description = "관리자 아님", body = ErrorResponse),
        (status = 404, description = "사용자 없음", body = ErrorResponse)
    ),
    tag = "User"
)]
pub async fn delete_user(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(user_id): Path<i64>,
) -> Result<Json<BaseResponse<()>>, AppError> {
    UserService::delete_user(&state, user_id).await?;
    Ok(Json(BaseResponse::message_only("사용자가 삭제되었습니다.")))
}
