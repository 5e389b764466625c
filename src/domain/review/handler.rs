use axum::{
    extract::{Path, Query, State},
    Json,
};

use super::dto::{
    ApprovedReviewFilter, CreateReviewRequest, ReviewFilter, ReviewLikeResponse, ReviewResponse,
    UpdateReviewRequest,
};
use super::service::ReviewService;
use crate::state::AppState;
use crate::utils::auth::{CurrentUser, MaybeUser};
use crate::utils::error::AppError;
use crate::utils::extract::ValidJson;
use crate::utils::pagination::{PageQuery, PageResponse};
use crate::utils::BaseResponse;

/// 후기 작성
#[utoipa::path(
    post,
    path = "/api/v1/reviews",
    request_body = CreateReviewRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "작성 성공", body = ReviewResponse),
        (status = 400, description = "별점 범위 오류 등 잘못된 요청", body = ErrorResponse),
        (status = 401, description = "인증 실패", body = ErrorResponse)
    ),
    tag = "Review"
)]
pub async fn create_review(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ValidJson(req): ValidJson<CreateReviewRequest>,
) -> Result<Json<BaseResponse<ReviewResponse>>, AppError> {
    let result = ReviewService::create_review(&state, &user, req).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 후기 목록 (관리자는 전체, 일반 사용자는 본인 후기)
#[utoipa::path(
    get,
    path = "/api/v1/reviews",
    params(PageQuery, ReviewFilter),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "조회 성공", body = ReviewPage),
        (status = 401, description = "인증 실패", body = ErrorResponse)
    ),
    tag = "Review"
)]
pub async fn list_reviews(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(page): Query<PageQuery>,
    Query(filter): Query<ReviewFilter>,
) -> Result<Json<BaseResponse<PageResponse<ReviewResponse>>>, AppError> {
    let result = ReviewService::list_reviews(&state, &user, filter, page.checked()?).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 승인된 후기 목록 (공개)
#[utoipa::path(
    get,
    path = "/api/v1/reviews/approved",
    params(PageQuery, ApprovedReviewFilter),
    responses(
        (status = 200, description = "조회 성공", body = ReviewPage)
    ),
    tag = "Review"
)]
pub async fn list_approved_reviews(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
    Query(filter): Query<ApprovedReviewFilter>,
) -> Result<Json<BaseResponse<PageResponse<ReviewResponse>>>, AppError> {
    let result =
        ReviewService::list_approved_reviews(&state, filter.counselor_id, page.checked()?).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 후기 상세
#[utoipa::path(
    get,
    path = "/api/v1/reviews/{review_id}",
    params(("review_id" = i64, Path, description = "후기 ID")),
    responses(
        (status = 200, description = "조회 성공", body = ReviewResponse),
        (status = 404, description = "후기 없음 또는 비공개", body = ErrorResponse)
    ),
    tag = "Review"
)]
pub async fn get_review(
    State(state): State<AppState>,
    MaybeUser(viewer): MaybeUser,
    Path(review_id): Path<i64>,
) -> Result<Json<BaseResponse<ReviewResponse>>, AppError> {
    let result = ReviewService::get_review(&state, viewer.as_ref(), review_id).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 후기 수정
#[utoipa::path(
    put,
    path = "/api/v1/reviews/{review_id}",
    params(("review_id" = i64, Path, description = "후기 ID")),
    request_body = UpdateReviewRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "수정 성공", body = ReviewResponse),
        (status = 403, description = "작성자/관리자 아님 또는 승인 권한 없음", body = ErrorResponse),
        (status = 404, description = "후기 없음", body = ErrorResponse)
    ),
    tag = "Review"
)]
pub async fn update_review(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(review_id): Path<i64>,
    ValidJson(req): ValidJson<UpdateReviewRequest>,
) -> Result<Json<BaseResponse<ReviewResponse>>, AppError> {
    let result = ReviewService::update_review(&state, &user, review_id, req).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 후기 삭제
#[utoipa::path(
    delete,
    path = "/api/v1/reviews/{review_id}",
    params(("review_id" = i64, Path, description = "후기 ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "삭제 성공", body = MessageResponse),
        (status = 403, description = "작성자/관리자 아님", body = ErrorResponse),
        (status = 404, description = "후기 없음", body = ErrorResponse)
    ),
    tag = "Review"
)]
pub async fn delete_review(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(review_id): Path<i64>,
) -> Result<Json<BaseResponse<()>>, AppError> {
    ReviewService::delete_review(&state, &user, review_id).await?;
    Ok(Json(BaseResponse::message_only("후기가 삭제되었습니다.")))
}

/// 후기 좋아요
#[utoipa::path(
    post,
    path = "/api/v1/reviews/{review_id}/like",
    params(("review_id" = i64, Path, description = "후기 ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "좋아요 성공", body = ReviewLikeResponse),
        (status = 404, description = "후기 없음", body = ErrorResponse),
        (status = 409, description = "이미 좋아요함", body = ErrorResponse)
    ),
    tag = "Review"
)]
pub async fn like_review(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(review_id): Path<i64>,
) -> Result<Json<BaseResponse<ReviewLikeResponse>>, AppError> {
    let result = ReviewService::like_review(&state, &user, review_id).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 후기 좋아요 취소
#[utoipa::path(
    delete,
    path = "/api/v1/reviews/{review_id}/like",
    params(("review_id" = i64, Path, description = "후기 ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "취소 성공", body = ReviewLikeResponse),
        (status = 404, description = "후기 없음 또는 좋아요 기록 없음", body = ErrorResponse)
    ),
    tag = "Review"
)]
pub async fn unlike_review(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(review_id): Path<i64>,
) -> Result<Json<BaseResponse<ReviewLikeResponse>>, AppError> {
    let result = ReviewService::unlike_review(&state, &user, review_id).await?;
    Ok(Json(BaseResponse::success(result)))
}
