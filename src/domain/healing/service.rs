use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, Set,
};
use tracing::{info, warn};

use super::dto::{
    check_step_number, normalize_steps, progress_percent, ProgressResponse, StepResponse,
    UpsertProgressRequest, UpsertStepRequest,
};
use super::entity::healing_progress::{self, CompletedSteps};
use super::entity::healing_step::{self, Answers, QaPair};
use crate::domain::consultation::entity::{consultation, consultation_session};
use crate::domain::consultation::service::ConsultationService;
use crate::domain::user::entity::user;
use crate::state::AppState;
use crate::utils::error::AppError;

pub struct HealingService;

impl HealingService {
    /// 상담 신청 조회 + 열람 권한 확인 (신청자 본인 또는 관리자/상담사)
    async fn accessible_consultation(
        state: &AppState,
        user: &user::Model,
        consultation_id: i64,
    ) -> Result<consultation::Model, AppError> {
        let consultation = ConsultationService::find_consultation(state, consultation_id).await?;
        ConsultationService::ensure_can_view(user, &consultation)?;
        Ok(consultation)
    }

    // ============== 진행 현황 ==============

    pub async fn get_progress(
        state: &AppState,
        user: &user::Model,
        consultation_id: i64,
    ) -> Result<ProgressResponse, AppError> {
        let consultation = Self::accessible_consultation(state, user, consultation_id).await?;

        let progress = healing_progress::Entity::find()
            .filter(healing_progress::Column::ConsultationId.eq(consultation.id))
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::not_found("힐링 진행 기록이 없습니다."))?;

        Ok(progress.into())
    }

    /// 진행 현황 저장 (상담 신청당 1건)
    pub async fn upsert_progress(
        state: &AppState,
        user: &user::Model,
        consultation_id: i64,
        req: UpsertProgressRequest,
    ) -> Result<ProgressResponse, AppError> {
        let consultation = Self::accessible_consultation(state, user, consultation_id).await?;

        let completed = normalize_steps(req.completed_steps)?;
        let total_progress = req
            .total_progress
            .unwrap_or_else(|| progress_percent(completed.len()));

        let existing = healing_progress::Entity::find()
            .filter(healing_progress::Column::ConsultationId.eq(consultation.id))
            .one(&state.db)
            .await?;

        let now = Utc::now().naive_utc();
        let saved = match existing {
            Some(progress) => {
                let mut active = progress.into_active_model();
                active.current_step = Set(req.current_step);
                active.completed_steps = Set(CompletedSteps(completed));
                active.total_progress = Set(total_progress);
                active.notes = Set(req.notes);
                active.updated_at = Set(now);
                active.update(&state.db).await?
            }
            None => {
                healing_progress::ActiveModel {
                    consultation_id: Set(consultation.id),
                    current_step: Set(req.current_step),
                    completed_steps: Set(CompletedSteps(completed)),
                    total_progress: Set(total_progress),
                    notes: Set(req.notes),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                }
                .insert(&state.db)
                .await?
            }
        };

        info!(
            consultation_id,
            current_step = saved.current_step,
            total_progress = saved.total_progress,
            "healing progress saved"
        );
        Ok(saved.into())
    }

    // ============== 단계 기록 ==============

    pub async fn list_steps(
        state: &AppState,
        user: &user::Model,
        consultation_id: i64,
    ) -> Result<Vec<StepResponse>, AppError> {
        let consultation = Self::accessible_consultation(state, user, consultation_id).await?;

        let steps = healing_step::Entity::find()
            .filter(healing_step::Column::ConsultationId.eq(consultation.id))
            .order_by_asc(healing_step::Column::StepNumber)
            .all(&state.db)
            .await?;

        Ok(steps.into_iter().map(StepResponse::from).collect())
    }

    async fn find_step(
        state: &AppState,
        consultation_id: i64,
        step_number: i32,
    ) -> Result<Option<healing_step::Model>, AppError> {
        let step = healing_step::Entity::find()
            .filter(healing_step::Column::ConsultationId.eq(consultation_id))
            .filter(healing_step::Column::StepNumber.eq(step_number))
            .one(&state.db)
            .await?;
        Ok(step)
    }

    pub async fn get_step(
        state: &AppState,
        user: &user::Model,
        consultation_id: i64,
        step_number: i32,
    ) -> Result<StepResponse, AppError> {
        check_step_number(step_number)?;
        let consultation = Self::accessible_consultation(state, user, consultation_id).await?;

        Self::find_step(state, consultation.id, step_number)
            .await?
            .map(StepResponse::from)
            .ok_or_else(|| AppError::not_found("해당 단계 기록이 없습니다."))
    }

    /// 단계 기록 저장 ((상담 신청, 단계 번호)당 1건)
    ///
    /// 기록 소유자는 상담 신청자이며, 비회원 신청이면 작성자로 기록됩니다.
    pub async fn upsert_step(
        state: &AppState,
        user: &user::Model,
        consultation_id: i64,
        step_number: i32,
        req: UpsertStepRequest,
    ) -> Result<StepResponse, AppError> {
        check_step_number(step_number)?;
        let consultation = Self::accessible_consultation(state, user, consultation_id).await?;

        if req.counselor_feedback.is_some() && !user.is_staff() {
            warn!(user_id = user.id, consultation_id, "non-staff attempted to write counselor feedback");
            return Err(AppError::forbidden(
                "상담사 피드백은 관리자 또는 상담사만 작성할 수 있습니다.",
            ));
        }

        if let Some(session_id) = req.session_id {
            let belongs = consultation_session::Entity::find_by_id(session_id)
                .filter(consultation_session::Column::ConsultationId.eq(consultation.id))
                .one(&state.db)
                .await?
                .is_some();
            if !belongs {
                return Err(AppError::bad_request("해당 상담의 회기가 아닙니다."));
            }
        }

        let answers = Answers(req.answers.into_iter().map(QaPair::from).collect());
        let now = Utc::now().naive_utc();

        let saved = match Self::find_step(state, consultation.id, step_number).await? {
            Some(step) => {
                let mut active = step.into_active_model();
                active.answers = Set(answers);
                active.stress_level = Set(req.stress_level);
                active.additional_notes = Set(req.additional_notes);
                if let Some(feedback) = req.counselor_feedback {
                    active.counselor_feedback = Set(Some(feedback));
                }
                if let Some(session_id) = req.session_id {
                    active.session_id = Set(Some(session_id));
                }
                active.updated_at = Set(now);
                active.update(&state.db).await?
            }
            None => {
                healing_step::ActiveModel {
                    consultation_id: Set(consultation.id),
                    user_id: Set(consultation.user_id.unwrap_or(user.id)),
                    session_id: Set(req.session_id),
                    step_number: Set(step_number),
                    answers: Set(answers),
                    stress_level: Set(req.stress_level),
                    additional_notes: Set(req.additional_notes),
                    counselor_feedback: Set(req.counselor_feedback),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                }
                .insert(&state.db)
                .await?
            }
        };

        info!(consultation_id, step_number, "healing step saved");
        Ok(saved.into())
    }

    pub async fn delete_step(
        state: &AppState,
        user: &user::Model,
        consultation_id: i64,
        step_number: i32,
    ) -> Result<(), AppError> {
        check_step_number(step_number)?;
        let consultation = Self::accessible_consultation(state, user, consultation_id).await?;

        let result = healing_step::Entity::delete_many()
            .filter(healing_step::Column::ConsultationId.eq(consultation.id))
            .filter(healing_step::Column::StepNumber.eq(step_number))
            .exec(&state.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(AppError::not_found("해당 단계 기록이 없습니다."));
        }

        info!(consultation_id, step_number, deleted_by = user.id, "healing step deleted");
        Ok(())
    }
}
