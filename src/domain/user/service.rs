use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::info;

use crate::domain::counselor::service::CounselorService;
use crate::domain::review::entity::review;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::pagination::{PageQuery, PageResponse};

use super::dto::{AdminUpdateUserRequest, UpdateMeRequest, UserFilter, UserResponse};
use super::entity::user;

pub struct UserService;

impl UserService {
    pub async fn find_user(state: &AppState, user_id: i64) -> Result<user::Model, AppError> {
        user::Entity::find_by_id(user_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::not_found("사용자를 찾을 수 없습니다."))
    }

    /// 사용자 목록 (관리자)
    pub async fn list_users(
        state: &AppState,
        filter: UserFilter,
        page: PageQuery,
    ) -> Result<PageResponse<UserResponse>, AppError> {
        let mut query = user::Entity::find();
        if let Some(is_active) = filter.is_active {
            query = query.filter(user::Column::IsActive.eq(is_active));
        }
        if let Some(is_counselor) = filter.is_counselor {
            query = query.filter(user::Column::IsCounselor.eq(is_counselor));
        }

        let total = query.clone().count(&state.db).await?;
        let users = query
            .order_by_asc(user::Column::Id)
            .offset(page.skip)
            .limit(page.limit)
            .all(&state.db)
            .await?;

        Ok(PageResponse::new(users, total, &page).map(UserResponse::from))
    }

    /// 내 정보 수정
    pub async fn update_me(
        state: &AppState,
        current: user::Model,
        req: UpdateMeRequest,
    ) -> Result<UserResponse, AppError> {
        let mut active = current.into_active_model();
        if let Some(name) = req.name {
            active.name = Set(name);
        }
        if let Some(phone) = req.phone {
            active.phone = Set(Some(phone));
        }
        active.updated_at = Set(Utc::now().naive_utc());

        let updated = active.update(&state.db).await?;
        Ok(updated.into())
    }

    /// 관리자의 사용자 상태/권한 변경
    pub async fn admin_update(
        state: &AppState,
        user_id: i64,
        req: AdminUpdateUserRequest,
    ) -> Result<UserResponse, AppError> {
        let target = Self::find_user(state, user_id).await?;

        let mut active = target.into_active_model();
        if let Some(is_active) = req.is_active {
            active.is_active = Set(is_active);
        }
        if let Some(is_admin) = req.is_admin {
            active.is_admin = Set(is_admin);
        }
        if let Some(is_counselor) = req.is_counselor {
            active.is_counselor = Set(is_counselor);
        }
        active.updated_at = Set(Utc::now().naive_utc());

        let updated = active.update(&state.db).await?;
        info!(
            user_id = updated.id,
            is_active = updated.is_active,
            is_admin = updated.is_admin,
            is_counselor = updated.is_counselor,
            "user flags updated"
        );
        Ok(updated.into())
    }

    /// 사용자 삭제
    ///
    /// 상담 신청, 후기, 힐링 기록, 체크리스트 응답은 FK cascade로 함께 삭제됩니다.
    /// 삭제된 후기가 있던 상담사의 평점은 같은 트랜잭션에서 다시 계산합니다.
    pub async fn delete_user(state: &AppState, user_id: i64) -> Result<(), AppError> {
        let txn = state.db.begin().await?;

        let counselor_ids: Vec<i64> = review::Entity::find()
            .select_only()
            .column(review::Column::CounselorId)
            .filter(review::Column::UserId.eq(user_id))
            .distinct()
            .into_tuple()
            .all(&txn)
            .await?;

        let result = user::Entity::delete_by_id(user_id).exec(&txn).await?;
        if result.rows_affected == 0 {
            return Err(AppError::not_found("사용자를 찾을 수 없습니다."));
        }

        for counselor_id in &counselor_ids {
            CounselorService::recompute_rating(&txn, *counselor_id).await?;
        }
        txn.commit().await?;

        info!(user_id, affected_counselors = counselor_ids.len(), "user deleted");
        Ok(())
    }
}
