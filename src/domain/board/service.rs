use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::{info, warn};

use super::dto::{
    resolve_author_name, BoardFilter, BoardLikeResponse, BoardListItem, BoardResponse,
    CommentResponse, CreateBoardRequest, CreateCommentRequest, UpdateBoardRequest,
    UpdateCommentRequest,
};
use super::entity::{board, board_like, comment};
use crate::domain::user::entity::user;
use crate::state::AppState;
use crate::utils::auth::require_owner_or_admin;
use crate::utils::error::AppError;
use crate::utils::pagination::{PageQuery, PageResponse};

pub struct BoardService;

impl BoardService {
    pub async fn find_board(state: &AppState, board_id: i64) -> Result<board::Model, AppError> {
        board::Entity::find_by_id(board_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::not_found("게시글을 찾을 수 없습니다."))
    }

    /// 수정/삭제 권한
    ///
    /// 회원이 쓴 글은 작성자와 관리자만, 비회원 글은 누구나 수정할 수 있습니다.
    pub fn ensure_can_modify(
        user: Option<&user::Model>,
        owner_id: Option<i64>,
    ) -> Result<(), AppError> {
        if owner_id.is_none() {
            return Ok(());
        }
        match user {
            Some(user) => require_owner_or_admin(user, owner_id),
            None => Err(AppError::unauthorized("작성자 확인을 위해 로그인이 필요합니다.")),
        }
    }

    pub async fn create_board(
        state: &AppState,
        user: Option<&user::Model>,
        req: CreateBoardRequest,
    ) -> Result<BoardResponse, AppError> {
        let author_name = resolve_author_name(req.author_name, user.map(|u| u.name.as_str()));

        let now = Utc::now().naive_utc();
        let created = board::ActiveModel {
            user_id: Set(user.map(|u| u.id)),
            author_name: Set(author_name),
            title: Set(req.title),
            content: Set(req.content),
            category: Set(req.category),
            view_count: Set(0),
            like_count: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&state.db)
        .await?;

        info!(board_id = created.id, "board post created");
        Ok(created.into())
    }

    /// 게시글 목록 (최신순)
    pub async fn list_boards(
        state: &AppState,
        filter: BoardFilter,
        page: PageQuery,
    ) -> Result<PageResponse<BoardListItem>, AppError> {
        let mut query = board::Entity::find();
        if let Some(category) = filter.category {
            query = query.filter(board::Column::Category.eq(category));
        }

        let total = query.clone().count(&state.db).await?;
        let boards = query
            .order_by_desc(board::Column::CreatedAt)
            .order_by_desc(board::Column::Id)
            .offset(page.skip)
            .limit(page.limit)
            .all(&state.db)
            .await?;

        Ok(PageResponse::new(boards, total, &page).map(BoardListItem::from))
    }

    /// 게시글 상세 (조회수 1 증가)
    pub async fn view_board(state: &AppState, board_id: i64) -> Result<BoardResponse, AppError> {
        let result = board::Entity::update_many()
            .col_expr(
                board::Column::ViewCount,
                Expr::col(board::Column::ViewCount).add(1),
            )
            .filter(board::Column::Id.eq(board_id))
            .exec(&state.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(AppError::not_found("게시글을 찾을 수 없습니다."));
        }

        let board = Self::find_board(state, board_id).await?;
        Ok(board.into())
    }

    pub async fn update_board(
        state: &AppState,
        user: Option<&user::Model>,
        board_id: i64,
        req: UpdateBoardRequest,
    ) -> Result<BoardResponse, AppError> {
        let existing = Self::find_board(state, board_id).await?;
        Self::ensure_can_modify(user, existing.user_id)?;

        let mut active = existing.into_active_model();
        if let Some(title) = req.title {
            active.title = Set(title);
        }
        if let Some(content) = req.content {
            active.content = Set(content);
        }
        if let Some(category) = req.category {
            active.category = Set(category);
        }
        active.updated_at = Set(Utc::now().naive_utc());

        let updated = active.update(&state.db).await?;
        Ok(updated.into())
    }

    pub async fn delete_board(
        state: &AppState,
        user: Option<&user::Model>,
        board_id: i64,
    ) -> Result<(), AppError> {
        let existing = Self::find_board(state, board_id).await?;
        Self::ensure_can_modify(user, existing.user_id)?;

        board::Entity::delete_by_id(existing.id)
            .exec(&state.db)
            .await?;
        info!(board_id, "board post deleted");
        Ok(())
    }

    // ============== 댓글 ==============

    /// 댓글 목록 (작성순)
    pub async fn list_comments(
        state: &AppState,
        board_id: i64,
    ) -> Result<Vec<CommentResponse>, AppError> {
        let board = Self::find_board(state, board_id).await?;

        let comments = comment::Entity::find()
            .filter(comment::Column::BoardId.eq(board.id))
            .order_by_asc(comment::Column::CreatedAt)
            .order_by_asc(comment::Column::Id)
            .all(&state.db)
            .await?;

        Ok(comments.into_iter().map(CommentResponse::from).collect())
    }

    pub async fn create_comment(
        state: &AppState,
        user: Option<&user::Model>,
        board_id: i64,
        req: CreateCommentRequest,
    ) -> Result<CommentResponse, AppError> {
        let board = Self::find_board(state, board_id).await?;
        let author_name = resolve_author_name(req.author_name, user.map(|u| u.name.as_str()));

        let now = Utc::now().naive_utc();
        let created = comment::ActiveModel {
            board_id: Set(board.id),
            user_id: Set(user.map(|u| u.id)),
            author_name: Set(author_name),
            content: Set(req.content),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&state.db)
        .await?;

        Ok(created.into())
    }

    async fn find_comment(
        state: &AppState,
        board_id: i64,
        comment_id: i64,
    ) -> Result<comment::Model, AppError> {
        comment::Entity::find_by_id(comment_id)
            .filter(comment::Column::BoardId.eq(board_id))
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::not_found("댓글을 찾을 수 없습니다."))
    }

    pub async fn update_comment(
        state: &AppState,
        user: Option<&user::Model>,
        board_id: i64,
        comment_id: i64,
        req: UpdateCommentRequest,
    ) -> Result<CommentResponse, AppError> {
        let existing = Self::find_comment(state, board_id, comment_id).await?;
        Self::ensure_can_modify(user, existing.user_id)?;

        let mut active = existing.into_active_model();
        active.content = Set(req.content);
        active.updated_at = Set(Utc::now().naive_utc());

        let updated = active.update(&state.db).await?;
        Ok(updated.into())
    }

    pub async fn delete_comment(
        state: &AppState,
        user: Option<&user::Model>,
        board_id: i64,
        comment_id: i64,
    ) -> Result<(), AppError> {
        let existing = Self::find_comment(state, board_id, comment_id).await?;
        Self::ensure_can_modify(user, existing.user_id)?;

        comment::Entity::delete_by_id(existing.id)
            .exec(&state.db)
            .await?;
        Ok(())
    }

    // ============== 좋아요 ==============

    /// 게시글 좋아요 (IP당 1회)
    pub async fn like_board(
        state: &AppState,
        user: Option<&user::Model>,
        board_id: i64,
        ip_address: &str,
    ) -> Result<BoardLikeResponse, AppError> {
        let board = Self::find_board(state, board_id).await?;

        let already_liked = board_like::Entity::find()
            .filter(board_like::Column::BoardId.eq(board.id))
            .filter(board_like::Column::IpAddress.eq(ip_address))
            .one(&state.db)
            .await?
            .is_some();
        if already_liked {
            warn!(board_id, ip_address, "duplicate board like rejected");
            return Err(AppError::conflict("이미 좋아요를 누른 게시글입니다."));
        }

        let txn = state.db.begin().await?;
        board_like::ActiveModel {
            board_id: Set(board.id),
            user_id: Set(user.map(|u| u.id)),
            ip_address: Set(ip_address.to_string()),
            created_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        board::Entity::update_many()
            .col_expr(
                board::Column::LikeCount,
                Expr::col(board::Column::LikeCount).add(1),
            )
            .filter(board::Column::Id.eq(board.id))
            .exec(&txn)
            .await?;
        txn.commit().await?;

        let updated = Self::find_board(state, board_id).await?;
        Ok(BoardLikeResponse {
            board_id: updated.id,
            is_liked: true,
            like_count: updated.like_count,
        })
    }

    pub async fn unlike_board(
        state: &AppState,
        board_id: i64,
        ip_address: &str,
    ) -> Result<BoardLikeResponse, AppError> {
        let board = Self::find_board(state, board_id).await?;

        let txn = state.db.begin().await?;
        let result = board_like::Entity::delete_many()
            .filter(board_like::Column::BoardId.eq(board.id))
            .filter(board_like::Column::IpAddress.eq(ip_address))
            .exec(&txn)
            .await?;
        if result.rows_affected == 0 {
            return Err(AppError::not_found("좋아요 기록이 없습니다."));
        }
        board::Entity::update_many()
            .col_expr(
                board::Column::LikeCount,
                Expr::col(board::Column::LikeCount).sub(1),
            )
            .filter(board::Column::Id.eq(board.id))
            .filter(board::Column::LikeCount.gt(0))
            .exec(&txn)
            .await?;
        txn.commit().await?;

        let updated = Self::find_board(state, board_id).await?;
        Ok(BoardLikeResponse {
            board_id: updated.id,
            is_liked: false,
            like_count: updated.like_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn member(id: i64, is_admin: bool) -> user::Model {
        user::Model {
            id,
            email: format!("u{id}@x.com"),
            hashed_password: String::new(),
            name: format!("user{id}"),
            phone: None,
            is_active: true,
            is_admin,
            is_counselor: false,
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        }
    }

    #[test]
    fn guest_post_should_be_open_to_anyone() {
        assert!(BoardService::ensure_can_modify(None, None).is_ok());
        assert!(BoardService::ensure_can_modify(Some(&member(1, false)), None).is_ok());
    }

    #[test]
    fn member_post_should_require_owner_or_admin() {
        assert!(BoardService::ensure_can_modify(Some(&member(1, false)), Some(1)).is_ok());
        assert!(BoardService::ensure_can_modify(Some(&member(9, true)), Some(1)).is_ok());
        assert!(matches!(
            BoardService::ensure_can_modify(Some(&member(2, false)), Some(1)),
            Err(AppError::Forbidden(_))
        ));
        assert!(matches!(
            BoardService::ensure_can_modify(None, Some(1)),
            Err(AppError::Unauthorized(_))
        ));
    }
}
