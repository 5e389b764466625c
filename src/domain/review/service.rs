use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Select, Set, TransactionTrait,
};
use tracing::{info, warn};

use super::dto::{
    CreateReviewRequest, ReviewFilter, ReviewLikeResponse, ReviewResponse, UpdateReviewRequest,
};
use super::entity::{review, review_like};
use crate::domain::consultation::entity::consultation;
use crate::domain::counselor::entity::counselor;
use crate::domain::counselor::service::CounselorService;
use crate::domain::user::entity::user;
use crate::state::AppState;
use crate::utils::auth::require_owner_or_admin;
use crate::utils::error::AppError;
use crate::utils::pagination::{PageQuery, PageResponse};

pub struct ReviewService;

impl ReviewService {
    pub async fn find_review(state: &AppState, review_id: i64) -> Result<review::Model, AppError> {
        review::Entity::find_by_id(review_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::not_found("후기를 찾을 수 없습니다."))
    }

    /// 후기 작성
    ///
    /// 새 후기는 관리자 승인 전까지 공개 목록에 나타나지 않습니다.
    pub async fn create_review(
        state: &AppState,
        user: &user::Model,
        req: CreateReviewRequest,
    ) -> Result<ReviewResponse, AppError> {
        let counselor = counselor::Entity::find_by_id(req.counselor_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::bad_request("존재하지 않는 상담사입니다."))?;

        if let Some(consultation_id) = req.consultation_id {
            let consultation = consultation::Entity::find_by_id(consultation_id)
                .one(&state.db)
                .await?
                .ok_or_else(|| AppError::bad_request("존재하지 않는 상담 신청입니다."))?;
            require_owner_or_admin(user, consultation.user_id)?;
        }

        let now = Utc::now().naive_utc();
        let created = review::ActiveModel {
            user_id: Set(user.id),
            counselor_id: Set(counselor.id),
            consultation_id: Set(req.consultation_id),
            rating: Set(req.rating),
            title: Set(req.title),
            content: Set(req.content),
            is_anonymous: Set(req.is_anonymous),
            is_approved: Set(false),
            is_active: Set(true),
            image_url: Set(req.image_url),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&state.db)
        .await?;

        info!(
            review_id = created.id,
            counselor_id = counselor.id,
            user_id = user.id,
            "review created"
        );
        Ok(ReviewResponse::new(
            created,
            Some(&user.name),
            Some(counselor.name),
        ))
    }

    /// 후기 목록
    ///
    /// 관리자는 필터 조건에 맞는 전체 후기를, 일반 사용자는 본인 후기만 조회합니다.
    pub async fn list_reviews(
        state: &AppState,
        user: &user::Model,
        filter: ReviewFilter,
        page: PageQuery,
    ) -> Result<PageResponse<ReviewResponse>, AppError> {
        let mut query = review::Entity::find();
        if !user.is_admin {
            query = query.filter(review::Column::UserId.eq(user.id));
        }
        if let Some(counselor_id) = filter.counselor_id {
            query = query.filter(review::Column::CounselorId.eq(counselor_id));
        }
        if let Some(is_approved) = filter.is_approved {
            query = query.filter(review::Column::IsApproved.eq(is_approved));
        }
        if let Some(is_active) = filter.is_active {
            query = query.filter(review::Column::IsActive.eq(is_active));
        }

        Self::paginate(state, query, page).await
    }

    /// 승인된 활성 후기 (공개)
    pub async fn list_approved_reviews(
        state: &AppState,
        counselor_id: Option<i64>,
        page: PageQuery,
    ) -> Result<PageResponse<ReviewResponse>, AppError> {
        let mut query = review::Entity::find()
            .filter(review::Column::IsApproved.eq(true))
            .filter(review::Column::IsActive.eq(true));
        if let Some(counselor_id) = counselor_id {
            query = query.filter(review::Column::CounselorId.eq(counselor_id));
        }

        Self::paginate(state, query, page).await
    }

    /// 후기 상세
    ///
    /// 승인된 활성 후기는 누구나, 그 외는 작성자와 관리자만 조회할 수 있습니다.
    pub async fn get_review(
        state: &AppState,
        viewer: Option<&user::Model>,
        review_id: i64,
    ) -> Result<ReviewResponse, AppError> {
        let review = Self::find_review(state, review_id).await?;

        let is_public = review.is_approved && review.is_active;
        let is_privileged =
            viewer.is_some_and(|u| u.is_admin || u.id == review.user_id);
        if !is_public && !is_privileged {
            return Err(AppError::not_found("후기를 찾을 수 없습니다."));
        }

        let mut items = Self::with_names(state, vec![review]).await?;
        items
            .pop()
            .ok_or_else(|| AppError::not_found("후기를 찾을 수 없습니다."))
    }

    /// 후기 수정
    ///
    /// 승인 여부는 관리자만 변경할 수 있고, 변경 후 상담사 평점을 다시 계산합니다.
    pub async fn update_review(
        state: &AppState,
        user: &user::Model,
        review_id: i64,
        req: UpdateReviewRequest,
    ) -> Result<ReviewResponse, AppError> {
        let existing = Self::find_review(state, review_id).await?;
        require_owner_or_admin(user, Some(existing.user_id))?;

        if req.is_approved.is_some() && !user.is_admin {
            warn!(user_id = user.id, review_id, "non-admin attempted to approve review");
            return Err(AppError::forbidden("승인 상태는 관리자만 수정할 수 있습니다."));
        }

        let counselor_id = existing.counselor_id;
        let mut active = existing.into_active_model();
        if let Some(rating) = req.rating {
            active.rating = Set(rating);
        }
        if let Some(title) = req.title {
            active.title = Set(title);
        }
        if let Some(content) = req.content {
            active.content = Set(content);
        }
        if let Some(is_anonymous) = req.is_anonymous {
            active.is_anonymous = Set(is_anonymous);
        }
        if let Some(is_approved) = req.is_approved {
            active.is_approved = Set(is_approved);
        }
        if let Some(is_active) = req.is_active {
            active.is_active = Set(is_active);
        }
        if let Some(image_url) = req.image_url {
            active.image_url = Set(Some(image_url));
        }
        active.updated_at = Set(Utc::now().naive_utc());

        let txn = state.db.begin().await?;
        let updated = active.update(&txn).await?;
        CounselorService::recompute_rating(&txn, counselor_id).await?;
        txn.commit().await?;

        if let Some(is_approved) = req.is_approved {
            info!(review_id, is_approved, changed_by = user.id, "review approval changed");
        }

        let mut items = Self::with_names(state, vec![updated]).await?;
        items
            .pop()
            .ok_or_else(|| AppError::not_found("후기를 찾을 수 없습니다."))
    }

    pub async fn delete_review(
        state: &AppState,
        user: &user::Model,
        review_id: i64,
    ) -> Result<(), AppError> {
        let existing = Self::find_review(state, review_id).await?;
        require_owner_or_admin(user, Some(existing.user_id))?;

        let txn = state.db.begin().await?;
        review::Entity::delete_by_id(existing.id).exec(&txn).await?;
        CounselorService::recompute_rating(&txn, existing.counselor_id).await?;
        txn.commit().await?;

        info!(review_id, deleted_by = user.id, "review deleted");
        Ok(())
    }

    // ============== 좋아요 ==============

    /// 후기 좋아요 (사용자당 1회)
    pub async fn like_review(
        state: &AppState,
        user: &user::Model,
        review_id: i64,
    ) -> Result<ReviewLikeResponse, AppError> {
        let review = Self::find_review(state, review_id).await?;

        let already_liked = review_like::Entity::find()
            .filter(review_like::Column::ReviewId.eq(review.id))
            .filter(review_like::Column::UserId.eq(user.id))
            .one(&state.db)
            .await?
            .is_some();
        if already_liked {
            return Err(AppError::conflict("이미 좋아요한 후기입니다."));
        }

        review_like::ActiveModel {
            review_id: Set(review.id),
            user_id: Set(user.id),
            created_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        }
        .insert(&state.db)
        .await?;

        Ok(ReviewLikeResponse {
            review_id: review.id,
            is_liked: true,
            total_likes: Self::count_likes(state, review.id).await?,
        })
    }

    pub async fn unlike_review(
        state: &AppState,
        user: &user::Model,
        review_id: i64,
    ) -> Result<ReviewLikeResponse, AppError> {
        let review = Self::find_review(state, review_id).await?;

        let result = review_like::Entity::delete_many()
            .filter(review_like::Column::ReviewId.eq(review.id))
            .filter(review_like::Column::UserId.eq(user.id))
            .exec(&state.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(AppError::not_found("좋아요 기록이 없습니다."));
        }

        Ok(ReviewLikeResponse {
            review_id: review.id,
            is_liked: false,
            total_likes: Self::count_likes(state, review.id).await?,
        })
    }

    async fn count_likes(state: &AppState, review_id: i64) -> Result<u64, AppError> {
        let count = review_like::Entity::find()
            .filter(review_like::Column::ReviewId.eq(review_id))
            .count(&state.db)
            .await?;
        Ok(count)
    }

    async fn paginate(
        state: &AppState,
        query: Select<review::Entity>,
        page: PageQuery,
    ) -> Result<PageResponse<ReviewResponse>, AppError> {
        let total = query.clone().count(&state.db).await?;
        let reviews = query
            .order_by_desc(review::Column::CreatedAt)
            .order_by_desc(review::Column::Id)
            .offset(page.skip)
            .limit(page.limit)
            .all(&state.db)
            .await?;

        let items = Self::with_names(state, reviews).await?;
        Ok(PageResponse::new(items, total, &page))
    }

    /// 작성자/상담사 이름을 붙여 응답으로 변환
    async fn with_names(
        state: &AppState,
        reviews: Vec<review::Model>,
    ) -> Result<Vec<ReviewResponse>, AppError> {
        let user_ids: Vec<i64> = reviews.iter().map(|r| r.user_id).collect();
        let counselor_ids: Vec<i64> = reviews.iter().map(|r| r.counselor_id).collect();

        let authors: HashMap<i64, String> = user::Entity::find()
            .filter(user::Column::Id.is_in(user_ids))
            .all(&state.db)
            .await?
            .into_iter()
            .map(|u| (u.id, u.name))
            .collect();
        let counselors: HashMap<i64, String> = counselor::Entity::find()
            .filter(counselor::Column::Id.is_in(counselor_ids))
            .all(&state.db)
            .await?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();

        Ok(reviews
            .into_iter()
            .map(|r| {
                let author = authors.get(&r.user_id).map(String::as_str);
                let counselor_name = counselors.get(&r.counselor_id).cloned();
                ReviewResponse::new(r, author, counselor_name)
            })
            .collect())
    }
}
