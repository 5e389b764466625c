use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Select, Set,
};
use tracing::info;

use super::dto::{CreateNoticeRequest, NoticeFilter, NoticeResponse, UpdateNoticeRequest};
use super::entity::notice::{self, NoticeStatus, NoticeType};
use crate::domain::user::entity::user;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::pagination::{PageQuery, PageResponse};

pub struct NoticeService;

impl NoticeService {
    pub async fn find_notice(state: &AppState, notice_id: i64) -> Result<notice::Model, AppError> {
        notice::Entity::find_by_id(notice_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::not_found("공지사항을 찾을 수 없습니다."))
    }

    pub async fn create_notice(
        state: &AppState,
        author: &user::Model,
        req: CreateNoticeRequest,
    ) -> Result<NoticeResponse, AppError> {
        let now = Utc::now().naive_utc();
        let created = notice::ActiveModel {
            author_id: Set(Some(author.id)),
            title: Set(req.title),
            content: Set(req.content),
            notice_type: Set(req.notice_type),
            status: Set(req.status),
            is_pinned: Set(req.is_pinned),
            is_active: Set(true),
            attachment_url: Set(req.attachment_url),
            view_count: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&state.db)
        .await?;

        info!(notice_id = created.id, author_id = author.id, "notice created");
        Ok(created.into())
    }

    pub async fn list_notices(
        state: &AppState,
        filter: NoticeFilter,
        page: PageQuery,
    ) -> Result<PageResponse<NoticeResponse>, AppError> {
        let mut query = notice::Entity::find();
        if let Some(notice_type) = filter.notice_type {
            query = query.filter(notice::Column::NoticeType.eq(notice_type));
        }
        if let Some(status) = filter.status {
            query = query.filter(notice::Column::Status.eq(status));
        }
        if let Some(is_pinned) = filter.is_pinned {
            query = query.filter(notice::Column::IsPinned.eq(is_pinned));
        }
        if let Some(is_active) = filter.is_active {
            query = query.filter(notice::Column::IsActive.eq(is_active));
        }

        Self::paginate(state, query, page).await
    }

    /// 발행된 활성 공지
    pub async fn list_published(
        state: &AppState,
        notice_type: Option<NoticeType>,
        page: PageQuery,
    ) -> Result<PageResponse<NoticeResponse>, AppError> {
        let mut query = notice::Entity::find()
            .filter(notice::Column::Status.eq(NoticeStatus::Published))
            .filter(notice::Column::IsActive.eq(true));
        if let Some(notice_type) = notice_type {
            query = query.filter(notice::Column::NoticeType.eq(notice_type));
        }

        Self::paginate(state, query, page).await
    }

    /// 공지 상세 (조회할 때마다 조회수 1 증가)
    ///
    /// 발행 전이거나 비활성인 공지는 관리자만 볼 수 있습니다.
    pub async fn view_notice(
        state: &AppState,
        viewer: Option<&user::Model>,
        notice_id: i64,
    ) -> Result<NoticeResponse, AppError> {
        let existing = Self::find_notice(state, notice_id).await?;
        let is_admin = viewer.is_some_and(|u| u.is_admin);
        if !is_admin && !NoticeResponse::is_visible(&existing) {
            return Err(AppError::not_found("공지사항을 찾을 수 없습니다."));
        }

        notice::Entity::update_many()
            .col_expr(
                notice::Column::ViewCount,
                Expr::col(notice::Column::ViewCount).add(1),
            )
            .filter(notice::Column::Id.eq(notice_id))
            .exec(&state.db)
            .await?;

        let viewed = Self::find_notice(state, notice_id).await?;
        Ok(viewed.into())
    }

    pub async fn update_notice(
        state: &AppState,
        notice_id: i64,
        req: UpdateNoticeRequest,
    ) -> Result<NoticeResponse, AppError> {
        let existing = Self::find_notice(state, notice_id).await?;
        let mut active = existing.into_active_model();

        if let Some(title) = req.title {
            active.title = Set(title);
        }
        if let Some(content) = req.content {
            active.content = Set(content);
        }
        if let Some(notice_type) = req.notice_type {
            active.notice_type = Set(notice_type);
        }
        if let Some(status) = req.status {
            active.status = Set(status);
        }
        if let Some(is_pinned) = req.is_pinned {
            active.is_pinned = Set(is_pinned);
        }
        if let Some(is_active) = req.is_active {
            active.is_active = Set(is_active);
        }
        if let Some(attachment_url) = req.attachment_url {
            active.attachment_url = Set(Some(attachment_url));
        }
        active.updated_at = Set(Utc::now().naive_utc());

        let updated = active.update(&state.db).await?;
        Ok(updated.into())
    }

    pub async fn delete_notice(state: &AppState, notice_id: i64) -> Result<(), AppError> {
        let result = notice::Entity::delete_by_id(notice_id)
            .exec(&state.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(AppError::not_found("공지사항을 찾을 수 없습니다."));
        }
        info!(notice_id, "notice deleted");
        Ok(())
    }

    /// 고정 공지 우선, 이후 최신순
    async fn paginate(
        state: &AppState,
        query: Select<notice::Entity>,
        page: PageQuery,
    ) -> Result<PageResponse<NoticeResponse>, AppError> {
        let total = query.clone().count(&state.db).await?;
        let notices = query
            .order_by_desc(notice::Column::IsPinned)
            .order_by_desc(notice::Column::CreatedAt)
            .order_by_desc(notice::Column::Id)
            .offset(page.skip)
            .limit(page.limit)
            .all(&state.db)
            .await?;

        Ok(PageResponse::new(notices, total, &page).map(NoticeResponse::from))
    }
}
