use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::entity::{board, comment};

pub const DEFAULT_CATEGORY: &str = "general";
pub const GUEST_AUTHOR: &str = "익명";

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

/// 게시글 작성 요청
///
/// 작성자명이 없으면 로그인 사용자 이름, 비회원이면 "익명"을 사용합니다.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBoardRequest {
    #[validate(length(min = 1, max = 200, message = "제목은 1~200자여야 합니다"))]
    pub title: String,

    #[validate(length(min = 1, max = 10000, message = "내용은 1~10000자여야 합니다"))]
    pub content: String,

    #[validate(length(min = 1, max = 50, message = "작성자명은 1~50자여야 합니다"))]
    pub author_name: Option<String>,

    #[serde(default = "default_category")]
    #[validate(length(min = 1, max = 50, message = "카테고리는 1~50자여야 합니다"))]
    pub category: String,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateBoardRequest {
    #[validate(length(min = 1, max = 200, message = "제목은 1~200자여야 합니다"))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 10000, message = "내용은 1~10000자여야 합니다"))]
    pub content: Option<String>,

    #[validate(length(min = 1, max = 50, message = "카테고리는 1~50자여야 합니다"))]
    pub category: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BoardFilter {
    pub category: Option<String>,
}

/// 게시글 목록 항목 (본문 제외)
#[derive(Debug, Serialize, ToSchema)]
pub struct BoardListItem {
    pub id: i64,
    pub title: String,
    pub author_name: String,
    pub category: String,
    pub view_count: i32,
    pub like_count: i32,
    pub created_at: NaiveDateTime,
}

impl From<board::Model> for BoardListItem {
    fn from(model: board::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            author_name: model.author_name,
            category: model.category,
            view_count: model.view_count,
            like_count: model.like_count,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BoardResponse {
    pub id: i64,
    pub user_id: Option<i64>,
    pub author_name: String,
    pub title: String,
    pub content: String,
    pub category: String,
    pub view_count: i32,
    pub like_count: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<board::Model> for BoardResponse {
    fn from(model: board::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            author_name: model.author_name,
            title: model.title,
            content: model.content,
            category: model.category,
            view_count: model.view_count,
            like_count: model.like_count,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

// ============== 댓글 ==============

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, max = 2000, message = "댓글은 1~2000자여야 합니다"))]
    pub content: String,

    #[validate(length(min = 1, max = 50, message = "작성자명은 1~50자여야 합니다"))]
    pub author_name: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCommentRequest {
    #[validate(length(min = 1, max = 2000, message = "댓글은 1~2000자여야 합니다"))]
    pub content: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CommentResponse {
    pub id: i64,
    pub board_id: i64,
    pub user_id: Option<i64>,
    pub author_name: String,
    pub content: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<comment::Model> for CommentResponse {
    fn from(model: comment::Model) -> Self {
        Self {
            id: model.id,
            board_id: model.board_id,
            user_id: model.user_id,
            author_name: model.author_name,
            content: model.content,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

// ============== 좋아요 ==============

#[derive(Debug, Serialize, ToSchema)]
pub struct BoardLikeResponse {
    pub board_id: i64,
    pub is_liked: bool,
    pub like_count: i32,
}

/// 작성자 표시명 결정
pub fn resolve_author_name(requested: Option<String>, login_name: Option<&str>) -> String {
    requested
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .or_else(|| login_name.map(str::to_string))
        .unwrap_or_else(|| GUEST_AUTHOR.to_string())
}
