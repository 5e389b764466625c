use axum::{
    extract::{Path, Query, State},
    Json,
};

use super::dto::{
    BoardFilter, BoardLikeResponse, BoardListItem, BoardResponse, CommentResponse,
    CreateBoardRequest, CreateCommentRequest, UpdateBoardRequest, UpdateCommentRequest,
};
use super::service::BoardService;
use crate::state::AppState;
use crate::utils::auth::{ClientIp, MaybeUser};
use crate::utils::error::AppError;
use crate::utils::extract::ValidJson;
use crate::utils::pagination::{PageQuery, PageResponse};
use crate::utils::BaseResponse;

/// 게시글 작성
#[utoipa::path(
    post,
    path = "/api/v1/boards",
    request_body = CreateBoardRequest,
    responses(
        (status = 200, description = "작성 성공", body = BoardResponse),
        (status = 400, description = "잘못된 요청", body = ErrorResponse)
    ),
    tag = "Board"
)]
pub async fn create_board(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    ValidJson(req): ValidJson<CreateBoardRequest>,
) -> Result<Json<BaseResponse<BoardResponse>>, AppError> {
    let result = BoardService::create_board(&state, user.as_ref(), req).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 게시글 목록
#[utoipa::path(
    get,
    path = "/api/v1/boards",
    params(PageQuery, BoardFilter),
    responses(
        (status = 200, description = "조회 성공", body = BoardPage)
    ),
    tag = "Board"
)]
pub async fn list_boards(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
    Query(filter): Query<BoardFilter>,
) -> Result<Json<BaseResponse<PageResponse<BoardListItem>>>, AppError> {
    let result = BoardService::list_boards(&state, filter, page.checked()?).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 게시글 상세 (조회수 증가)
#[utoipa::path(
    get,
    path = "/api/v1/boards/{board_id}",
    params(("board_id" = i64, Path, description = "게시글 ID")),
    responses(
        (status = 200, description = "조회 성공", body = BoardResponse),
        (status = 404, description = "게시글 없음", body = ErrorResponse)
    ),
    tag = "Board"
)]
pub async fn get_board(
    State(state): State<AppState>,
    Path(board_id): Path<i64>,
) -> Result<Json<BaseResponse<BoardResponse>>, AppError> {
    let result = BoardService::view_board(&state, board_id).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 게시글 수정
#[utoipa::path(
    put,
    path = "/api/v1/boards/{board_id}",
    params(("board_id" = i64, Path, description = "게시글 ID")),
    request_body = UpdateBoardRequest,
    responses(
        (status = 200, description = "수정 성공", body = BoardResponse),
        (status = 403, description = "작성자 아님", body = ErrorResponse),
        (status = 404, description = "게시글 없음", body = ErrorResponse)
    ),
    tag = "Board"
)]
pub async fn update_board(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Path(board_id): Path<i64>,
    ValidJson(req): ValidJson<UpdateBoardRequest>,
) -> Result<Json<BaseResponse<BoardResponse>>, AppError> {
    let result = BoardService::update_board(&state, user.as_ref(), board_id, req).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 게시글 삭제
#[utoipa::path(
    delete,
    path = "/api/v1/boards/{board_id}",
    params(("board_id" = i64, Path, description = "게시글 ID")),
    responses(
        (status = 200, description = "삭제 성공", body = MessageResponse),
        (status = 403, description = "작성자 아님", body = ErrorResponse),
        (status = 404, description = "게시글 없음", body = ErrorResponse)
    ),
    tag = "Board"
)]
pub async fn delete_board(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Path(board_id): Path<i64>,
) -> Result<Json<BaseResponse<()>>, AppError> {
    BoardService::delete_board(&state, user.as_ref(), board_id).await?;
    Ok(Json(BaseResponse::message_only("게시글이 삭제되었습니다.")))
}

/// 댓글 목록
#[utoipa::path(
    get,
    path = "/api/v1/boards/{board_id}/comments",
    params(("board_id" = i64, Path, description = "게시글 ID")),
    responses(
        (status = 200, description = "조회 성공", body = [CommentResponse]),
        (status = 404, description = "게시글 없음", body = ErrorResponse)
    ),
    tag = "Board"
)]
pub async fn list_comments(
    State(state): State<AppState>,
    Path(board_id): Path<i64>,
) -> Result<Json<BaseResponse<Vec<CommentResponse>>>, AppError> {
    let result = BoardService::list_comments(&state, board_id).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 댓글 작성
#[utoipa::path(
    post,
    path = "/api/v1/boards/{board_id}/comments",
    params(("board_id" = i64, Path, description = "게시글 ID")),
    request_body = CreateCommentRequest,
    responses(
        (status = 200, description = "작성 성공", body = CommentResponse),
        (status = 404, description = "게시글 없음", body = ErrorResponse)
    ),
    tag = "Board"
)]
pub async fn create_comment(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Path(board_id): Path<i64>,
    ValidJson(req): ValidJson<CreateCommentRequest>,
) -> Result<Json<BaseResponse<CommentResponse>>, AppError> {
    let result = BoardService::create_comment(&state, user.as_ref(), board_id, req).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 댓글 수정
#[utoipa::path(
    put,
    path = "/api/v1/boards/{board_id}/comments/{comment_id}",
    params(
        ("board_id" = i64, Path, description = "게시글 ID"),
        ("comment_id" = i64, Path, description = "댓글 ID")
    ),
    request_body = UpdateCommentRequest,
    responses(
        (status = 200, description = "수정 성공", body = CommentResponse),
        (status = 403, description = "작성자 아님", body = ErrorResponse),
        (status = 404, description = "댓글 없음", body = ErrorResponse)
    ),
    tag = "Board"
)]
pub async fn update_comment(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Path((board_id, comment_id)): Path<(i64, i64)>,
    ValidJson(req): ValidJson<UpdateCommentRequest>,
) -> Result<Json<BaseResponse<CommentResponse>>, AppError> {
    let result =
        BoardService::update_comment(&state, user.as_ref(), board_id, comment_id, req).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 댓글 삭제
#[utoipa::path(
    delete,
    path = "/api/v1/boards/{board_id}/comments/{comment_id}",
    params(
        ("board_id" = i64, Path, description = "게시글 ID"),
        ("comment_id" = i64, Path, description = "댓글 ID")
    ),
    responses(
        (status = 200, description = "삭제 성공", body = MessageResponse),
        (status = 403, description = "작성자 아님", body = ErrorResponse),
        (status = 404, description = "댓글 없음", body = ErrorResponse)
    ),
    tag = "Board"
)]
pub async fn delete_comment(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Path((board_id, comment_id)): Path<(i64, i64)>,
) -> Result<Json<BaseResponse<()>>, AppError> {
    BoardService::delete_comment(&state, user.as_ref(), board_id, comment_id).await?;
    Ok(Json(BaseResponse::message_only("댓글이 삭제되었습니다.")))
}

/// 게시글 좋아요 (IP당 1회)
#[utoipa::path(
    post,
    path = "/api/v1/boards/{board_id}/like",
    params(("board_id" = i64, Path, description = "게시글 ID")),
    responses(
        (status = 200, description = "좋아요 성공", body = BoardLikeResponse),
        (status = 404, description = "게시글 없음", body = ErrorResponse),
        (status = 409, description = "이미 좋아요함", body = ErrorResponse)
    ),
    tag = "Board"
)]
pub async fn like_board(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    ClientIp(ip): ClientIp,
    Path(board_id): Path<i64>,
) -> Result<Json<BaseResponse<BoardLikeResponse>>, AppError> {
    let result = BoardService::like_board(&state, user.as_ref(), board_id, &ip).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 게시글 좋아요 취소
#[utoipa::path(
    delete,
    path = "/api/v1/boards/{board_id}/like",
    params(("board_id" = i64, Path, description = "게시글 ID")),
    responses(
        (status = 200, description = "취소 성공", body = BoardLikeResponse),
        (status = 404, description = "게시글 없음 또는 좋아요 기록 없음", body = ErrorResponse)
    ),
    tag = "Board"
)]
pub async fn unlike_board(
    State(state): State<AppState>,
    ClientIp(ip): ClientIp,
    Path(board_id): Path<i64>,
) -> Result<Json<BaseResponse<BoardLikeResponse>>, AppError> {
    let result = BoardService::unlike_board(&state, board_id, &ip).await?;
    Ok(Json(BaseResponse::success(result)))
}
