use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, Iterable, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select, Set,
};
use tracing::{info, warn};

use super::dto::{
    ConsultationFilter, ConsultationResponse, ConsultationStats, CreateConsultationRequest,
    CreateSessionRequest, PublicConsultationItem, SessionResponse, UpdateConsultationRequest,
    UpdateSessionRequest,
};
use super::entity::consultation::{self, ConsultationStatus};
use super::entity::consultation_session::{self, SessionStatus};
use crate::domain::counselor::entity::counselor;
use crate::domain::user::entity::user;
use crate::state::AppState;
use crate::utils::auth::{require_owner_or_admin, require_staff};
use crate::utils::error::AppError;
use crate::utils::pagination::{PageQuery, PageResponse};

const DEFAULT_SESSION_MINUTES: i32 = 60;

pub struct ConsultationService;

impl ConsultationService {
    pub async fn find_consultation(
        state: &AppState,
        consultation_id: i64,
    ) -> Result<consultation::Model, AppError> {
        consultation::Entity::find_by_id(consultation_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::not_found("상담 신청을 찾을 수 없습니다."))
    }

    /// 상담 신청 열람 권한: 신청자 본인, 관리자, 상담사
    pub fn ensure_can_view(
        user: &user::Model,
        consultation: &consultation::Model,
    ) -> Result<(), AppError> {
        if user.is_staff() || consultation.user_id == Some(user.id) {
            return Ok(());
        }
        warn!(
            user_id = user.id,
            consultation_id = consultation.id,
            "consultation access denied"
        );
        Err(AppError::forbidden("해당 상담 신청에 접근 권한이 없습니다."))
    }

    /// 상담 신청 접수
    ///
    /// 로그인 사용자가 신청하면 소유자로 기록되고, 비회원 신청은 소유자 없이 저장됩니다.
    pub async fn create_consultation(
        state: &AppState,
        user: Option<&user::Model>,
        req: CreateConsultationRequest,
    ) -> Result<ConsultationResponse, AppError> {
        if let Some(counselor_id) = req.counselor_id {
            Self::ensure_counselor_exists(state, counselor_id).await?;
        }

        let now = Utc::now().naive_utc();
        let created = consultation::ActiveModel {
            user_id: Set(user.map(|u| u.id)),
            counselor_id: Set(req.counselor_id),
            consultation_type: Set(req.consultation_type),
            status: Set(ConsultationStatus::Pending),
            urgency_level: Set(req.urgency_level),
            title: Set(req.title),
            description: Set(req.description),
            preferred_date: Set(req.preferred_date),
            preferred_time: Set(req.preferred_time),
            contact_name: Set(req.contact_name),
            contact_phone: Set(req.contact_phone),
            contact_email: Set(req.contact_email),
            notes: Set(None),
            is_confidential: Set(req.is_confidential),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&state.db)
        .await?;

        info!(
            consultation_id = created.id,
            user_id = ?created.user_id,
            "consultation created"
        );
        Ok(created.into())
    }

    /// 내 상담 신청 목록
    pub async fn list_my_consultations(
        state: &AppState,
        user: &user::Model,
        filter: ConsultationFilter,
        page: PageQuery,
    ) -> Result<PageResponse<ConsultationResponse>, AppError> {
        let query = apply_filter(
            consultation::Entity::find().filter(consultation::Column::UserId.eq(user.id)),
            &filter,
        );
        Self::paginate(state, query, page).await
    }

    /// 전체 상담 신청 목록 (관리자)
    pub async fn list_all_consultations(
        state: &AppState,
        filter: ConsultationFilter,
        page: PageQuery,
    ) -> Result<PageResponse<ConsultationResponse>, AppError> {
        let query = apply_filter(consultation::Entity::find(), &filter);
        Self::paginate(state, query, page).await
    }

    /// 공개 목록 (연락처, 메모 제외)
    pub async fn list_public_consultations(
        state: &AppState,
        filter: ConsultationFilter,
        page: PageQuery,
    ) -> Result<PageResponse<PublicConsultationItem>, AppError> {
        let query = apply_filter(consultation::Entity::find(), &filter);
        let total = query.clone().count(&state.db).await?;
        let items = query
            .order_by_desc(consultation::Column::CreatedAt)
            .order_by_desc(consultation::Column::Id)
            .offset(page.skip)
            .limit(page.limit)
            .all(&state.db)
            .await?;

        Ok(PageResponse::new(items, total, &page).map(PublicConsultationItem::from))
    }

    async fn paginate(
        state: &AppState,
        query: Select<consultation::Entity>,
        page: PageQuery,
    ) -> Result<PageResponse<ConsultationResponse>, AppError> {
        let total = query.clone().count(&state.db).await?;
        let items = query
            .order_by_desc(consultation::Column::CreatedAt)
            .order_by_desc(consultation::Column::Id)
            .offset(page.skip)
            .limit(page.limit)
            .all(&state.db)
            .await?;

        Ok(PageResponse::new(items, total, &page).map(ConsultationResponse::from))
    }

    pub async fn get_consultation(
        state: &AppState,
        user: &user::Model,
        consultation_id: i64,
    ) -> Result<ConsultationResponse, AppError> {
        let consultation = Self::find_consultation(state, consultation_id).await?;
        Self::ensure_can_view(user, &consultation)?;
        Ok(consultation.into())
    }

    /// 상담 신청 수정
    ///
    /// 신청자 본인, 관리자, 상담사만 수정할 수 있으며
    /// 상태와 관리자 메모는 관리자/상담사만 변경할 수 있습니다.
    pub async fn update_consultation(
        state: &AppState,
        user: &user::Model,
        consultation_id: i64,
        req: UpdateConsultationRequest,
    ) -> Result<ConsultationResponse, AppError> {
        let existing = Self::find_consultation(state, consultation_id).await?;
        Self::ensure_can_view(user, &existing)?;

        if req.touches_staff_fields() && !user.is_staff() {
            warn!(
                user_id = user.id,
                consultation_id, "non-staff attempted to change consultation status"
            );
            return Err(AppError::forbidden(
                "상담 상태와 메모는 관리자 또는 상담사만 변경할 수 있습니다.",
            ));
        }

        if let Some(counselor_id) = req.counselor_id {
            Self::ensure_counselor_exists(state, counselor_id).await?;
        }

        let previous_status = existing.status;
        let mut active = existing.into_active_model();
        if let Some(consultation_type) = req.consultation_type {
            active.consultation_type = Set(consultation_type);
        }
        if let Some(urgency_level) = req.urgency_level {
            active.urgency_level = Set(urgency_level);
        }
        if let Some(status) = req.status {
            active.status = Set(status);
        }
        if let Some(title) = req.title {
            active.title = Set(title);
        }
        if let Some(description) = req.description {
            active.description = Set(description);
        }
        if let Some(preferred_date) = req.preferred_date {
            active.preferred_date = Set(Some(preferred_date));
        }
        if let Some(preferred_time) = req.preferred_time {
            active.preferred_time = Set(Some(preferred_time));
        }
        if let Some(contact_name) = req.contact_name {
            active.contact_name = Set(contact_name);
        }
        if let Some(contact_phone) = req.contact_phone {
            active.contact_phone = Set(contact_phone);
        }
        if let Some(contact_email) = req.contact_email {
            active.contact_email = Set(contact_email);
        }
        if let Some(counselor_id) = req.counselor_id {
            active.counselor_id = Set(Some(counselor_id));
        }
        if let Some(notes) = req.notes {
            active.notes = Set(Some(notes));
        }
        if let Some(is_confidential) = req.is_confidential {
            active.is_confidential = Set(is_confidential);
        }
        active.updated_at = Set(Utc::now().naive_utc());

        let updated = active.update(&state.db).await?;
        if updated.status != previous_status {
            info!(
                consultation_id,
                changed_by = user.id,
                from = ?previous_status,
                to = ?updated.status,
                "consultation status changed"
            );
        }
        Ok(updated.into())
    }

    /// 상담 신청 삭제 (신청자 본인 또는 관리자)
    pub async fn delete_consultation(
        state: &AppState,
        user: &user::Model,
        consultation_id: i64,
    ) -> Result<(), AppError> {
        let existing = Self::find_consultation(state, consultation_id).await?;
        require_owner_or_admin(user, existing.user_id)?;

        consultation::Entity::delete_by_id(existing.id)
            .exec(&state.db)
            .await?;
        info!(consultation_id, deleted_by = user.id, "consultation deleted");
        Ok(())
    }

    /// 상태별 건수 (매 호출마다 집계)
    pub async fn stats(state: &AppState) -> Result<ConsultationStats, AppError> {
        let mut stats = ConsultationStats {
            total: consultation::Entity::find().count(&state.db).await?,
            ..Default::default()
        };

        for status in ConsultationStatus::iter() {
            let count = consultation::Entity::find()
                .filter(consultation::Column::Status.eq(status))
                .count(&state.db)
                .await?;
            stats.set(status, count);
        }

        Ok(stats)
    }

    // ============== 상담 회기 ==============

    /// 회기 등록 (상담사 전용)
    ///
    /// 등록한 상담사 계정이 회기 담당자로 기록됩니다.
    pub async fn add_session(
        state: &AppState,
        user: &user::Model,
        consultation_id: i64,
        req: CreateSessionRequest,
    ) -> Result<SessionResponse, AppError> {
        if !user.is_counselor {
            warn!(user_id = user.id, consultation_id, "non-counselor attempted to add session");
            return Err(AppError::forbidden("상담사만 회기를 등록할 수 있습니다."));
        }
        let consultation = Self::find_consultation(state, consultation_id).await?;

        let existing_sessions = consultation_session::Entity::find()
            .filter(consultation_session::Column::ConsultationId.eq(consultation.id))
            .count(&state.db)
            .await?;

        let now = Utc::now().naive_utc();
        let created = consultation_session::ActiveModel {
            consultation_id: Set(consultation.id),
            session_number: Set(existing_sessions as i32 + 1),
            session_date: Set(req.session_date),
            session_time: Set(req.session_time),
            duration_minutes: Set(req.duration_minutes.unwrap_or(DEFAULT_SESSION_MINUTES)),
            counselor_user_id: Set(Some(user.id)),
            notes: Set(req.notes),
            status: Set(SessionStatus::Scheduled),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&state.db)
        .await?;

        info!(
            consultation_id,
            session_id = created.id,
            session_number = created.session_number,
            "consultation session added"
        );
        Ok(created.into())
    }

    pub async fn list_sessions(
        state: &AppState,
        user: &user::Model,
        consultation_id: i64,
    ) -> Result<Vec<SessionResponse>, AppError> {
        let consultation = Self::find_consultation(state, consultation_id).await?;
        Self::ensure_can_view(user, &consultation)?;

        let sessions = consultation_session::Entity::find()
            .filter(consultation_session::Column::ConsultationId.eq(consultation.id))
            .order_by_asc(consultation_session::Column::SessionNumber)
            .all(&state.db)
            .await?;

        Ok(sessions.into_iter().map(SessionResponse::from).collect())
    }

    /// 회기 수정 (관리자/상담사)
    pub async fn update_session(
        state: &AppState,
        user: &user::Model,
        consultation_id: i64,
        session_id: i64,
        req: UpdateSessionRequest,
    ) -> Result<SessionResponse, AppError> {
        require_staff(user)?;

        let session = consultation_session::Entity::find_by_id(session_id)
            .filter(consultation_session::Column::ConsultationId.eq(consultation_id))
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::not_found("상담 회기를 찾을 수 없습니다."))?;

        let mut active = session.into_active_model();
        if let Some(session_date) = req.session_date {
            active.session_date = Set(Some(session_date));
        }
        if let Some(session_time) = req.session_time {
            active.session_time = Set(Some(session_time));
        }
        if let Some(duration_minutes) = req.duration_minutes {
            active.duration_minutes = Set(duration_minutes);
        }
        if let Some(notes) = req.notes {
            active.notes = Set(Some(notes));
        }
        if let Some(status) = req.status {
            active.status = Set(status);
        }
        active.updated_at = Set(Utc::now().naive_utc());

        let updated = active.update(&state.db).await?;
        Ok(updated.into())
    }

    async fn ensure_counselor_exists(state: &AppState, counselor_id: i64) -> Result<(), AppError> {
        let exists = counselor::Entity::find_by_id(counselor_id)
            .one(&state.db)
            .await?
            .is_some();
        if !exists {
            return Err(AppError::bad_request("존재하지 않는 상담사입니다."));
        }
        Ok(())
    }
}

fn apply_filter(
    mut query: Select<consultation::Entity>,
    filter: &ConsultationFilter,
) -> Select<consultation::Entity> {
    if let Some(status) = filter.status {
        query = query.filter(consultation::Column::Status.eq(status));
    }
    if let Some(consultation_type) = filter.consultation_type {
        query = query.filter(consultation::Column::ConsultationType.eq(consultation_type));
    }
    if let Some(urgency_level) = filter.urgency_level {
        query = query.filter(consultation::Column::UrgencyLevel.eq(urgency_level));
    }
    query
}
