use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use tracing::info;

use super::dto::{CounselorFilter, CounselorResponse, CreateCounselorRequest, UpdateCounselorRequest};
use super::entity::counselor;
use crate::domain::review::entity::review;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::pagination::{PageQuery, PageResponse};

pub struct CounselorService;

impl CounselorService {
    pub async fn find_counselor(
        state: &AppState,
        counselor_id: i64,
    ) -> Result<counselor::Model, AppError> {
        counselor::Entity::find_by_id(counselor_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::not_found("상담사를 찾을 수 없습니다."))
    }

    pub async fn list_counselors(
        state: &AppState,
        filter: CounselorFilter,
        page: PageQuery,
    ) -> Result<PageResponse<CounselorResponse>, AppError> {
        let mut query = counselor::Entity::find();
        if let Some(is_online) = filter.is_online {
            query = query.filter(counselor::Column::IsOnline.eq(is_online));
        }
        if let Some(is_active) = filter.is_active {
            query = query.filter(counselor::Column::IsActive.eq(is_active));
        }

        let total = query.clone().count(&state.db).await?;
        let counselors = query
            .order_by_asc(counselor::Column::Id)
            .offset(page.skip)
            .limit(page.limit)
            .all(&state.db)
            .await?;

        Ok(PageResponse::new(counselors, total, &page).map(CounselorResponse::from))
    }

    /// 온라인이면서 활성 상태인 상담사
    pub async fn list_online(state: &AppState) -> Result<Vec<CounselorResponse>, AppError> {
        let counselors = counselor::Entity::find()
            .filter(counselor::Column::IsOnline.eq(true))
            .filter(counselor::Column::IsActive.eq(true))
            .order_by_desc(counselor::Column::Rating)
            .all(&state.db)
            .await?;

        Ok(counselors.into_iter().map(CounselorResponse::from).collect())
    }

    pub async fn create_counselor(
        state: &AppState,
        req: CreateCounselorRequest,
    ) -> Result<CounselorResponse, AppError> {
        let email = req.email.trim().to_lowercase();
        Self::ensure_email_available(state, &email, None).await?;

        let now = Utc::now().naive_utc();
        let created = counselor::ActiveModel {
            name: Set(req.name),
            email: Set(email),
            phone: Set(req.phone),
            specialization: Set(req.specialization),
            education: Set(req.education),
            experience: Set(req.experience),
            certification: Set(req.certification),
            bio: Set(req.bio),
            profile_image: Set(req.profile_image),
            is_online: Set(req.is_online),
            is_active: Set(req.is_active),
            rating: Set(0.0),
            total_reviews: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&state.db)
        .await?;

        info!(counselor_id = created.id, "counselor created");
        Ok(created.into())
    }

    pub async fn update_counselor(
        state: &AppState,
        counselor_id: i64,
        req: UpdateCounselorRequest,
    ) -> Result<CounselorResponse, AppError> {
        let existing = Self::find_counselor(state, counselor_id).await?;
        let mut active = existing.into_active_model();

        if let Some(email) = req.email {
            let email = email.trim().to_lowercase();
            Self::ensure_email_available(state, &email, Some(counselor_id)).await?;
            active.email = Set(email);
        }
        if let Some(name) = req.name {
            active.name = Set(name);
        }
        if let Some(phone) = req.phone {
            active.phone = Set(Some(phone));
        }
        if let Some(specialization) = req.specialization {
            active.specialization = Set(Some(specialization));
        }
        if let Some(education) = req.education {
            active.education = Set(Some(education));
        }
        if let Some(experience) = req.experience {
            active.experience = Set(Some(experience));
        }
        if let Some(certification) = req.certification {
            active.certification = Set(Some(certification));
        }
        if let Some(bio) = req.bio {
            active.bio = Set(Some(bio));
        }
        if let Some(profile_image) = req.profile_image {
            active.profile_image = Set(Some(profile_image));
        }
        if let Some(is_online) = req.is_online {
            active.is_online = Set(is_online);
        }
        if let Some(is_active) = req.is_active {
            active.is_active = Set(is_active);
        }
        active.updated_at = Set(Utc::now().naive_utc());

        let updated = active.update(&state.db).await?;
        Ok(updated.into())
    }

    pub async fn delete_counselor(state: &AppState, counselor_id: i64) -> Result<(), AppError> {
        let result = counselor::Entity::delete_by_id(counselor_id)
            .exec(&state.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(AppError::not_found("상담사를 찾을 수 없습니다."));
        }
        info!(counselor_id, "counselor deleted");
        Ok(())
    }

    /// 활성 상태 토글
    pub async fn toggle_status(
        state: &AppState,
        counselor_id: i64,
    ) -> Result<CounselorResponse, AppError> {
        let existing = Self::find_counselor(state, counselor_id).await?;
        let next = !existing.is_active;

        let mut active = existing.into_active_model();
        active.is_active = Set(next);
        active.updated_at = Set(Utc::now().naive_utc());
        let updated = active.update(&state.db).await?;

        info!(counselor_id, is_active = next, "counselor status toggled");
        Ok(updated.into())
    }

    /// 승인된 활성 후기로 평점/후기 수를 다시 계산합니다.
    pub async fn recompute_rating<C>(db: &C, counselor_id: i64) -> Result<(), AppError>
    where
        C: ConnectionTrait,
    {
        let ratings: Vec<i32> = review::Entity::find()
            .select_only()
            .column(review::Column::Rating)
            .filter(review::Column::CounselorId.eq(counselor_id))
            .filter(review::Column::IsApproved.eq(true))
            .filter(review::Column::IsActive.eq(true))
            .into_tuple()
            .all(db)
            .await?;

        let Some(existing) = counselor::Entity::find_by_id(counselor_id).one(db).await? else {
            return Ok(());
        };

        let (rating, total) = average_rating(&ratings);
        let mut active = existing.into_active_model();
        active.rating = Set(rating);
        active.total_reviews = Set(total);
        active.update(db).await?;
        Ok(())
    }

    async fn ensure_email_available(
        state: &AppState,
        email: &str,
        exclude_id: Option<i64>,
    ) -> Result<(), AppError> {
        let mut query = counselor::Entity::find().filter(counselor::Column::Email.eq(email));
        if let Some(id) = exclude_id {
            query = query.filter(counselor::Column::Id.ne(id));
        }
        if query.one(&state.db).await?.is_some() {
            return Err(AppError::conflict("이미 등록된 상담사 이메일입니다."));
        }
        Ok(())
    }
}

/// 평균 평점(소수 첫째 자리 반올림)과 개수
pub fn average_rating(ratings: &[i32]) -> (f64, i32) {
    if ratings.is_empty() {
        return (0.0, 0);
    }
    let sum: i64 = ratings.iter().map(|&r| i64::from(r)).sum();
    let avg = sum as f64 / ratings.len() as f64;
    ((avg * 10.0).round() / 10.0, ratings.len() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_of_no_reviews_should_be_zero() {
        assert_eq!(average_rating(&[]), (0.0, 0));
    }

    #[test]
    fn average_should_round_to_one_decimal() {
        assert_eq!(average_rating(&[5, 4, 4]), (4.3, 3));
        assert_eq!(average_rating(&[5]), (5.0, 1));
    }
}
