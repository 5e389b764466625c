use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::entity::healing_progress;
use super::entity::healing_step::{self, QaPair};
use crate::utils::error::AppError;

pub const MAX_STEP: i32 = 12;

// ============== 진행 현황 ==============

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpsertProgressRequest {
    #[validate(range(min = 1, max = 12, message = "현재 단계는 1~12 사이여야 합니다"))]
    pub current_step: i32,

    #[serde(default)]
    #[validate(length(max = 12, message = "완료 단계는 최대 12개입니다"))]
    pub completed_steps: Vec<i32>,

    /// 생략하면 완료 단계 수로 계산합니다.
    #[validate(range(min = 0, max = 100, message = "진행률은 0~100 사이여야 합니다"))]
    pub total_progress: Option<i32>,

    pub notes: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProgressResponse {
    pub id: i64,
    pub consultation_id: i64,
    pub current_step: i32,
    pub completed_steps: Vec<i32>,
    pub total_progress: i32,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<healing_progress::Model> for ProgressResponse {
    fn from(model: healing_progress::Model) -> Self {
        Self {
            id: model.id,
            consultation_id: model.consultation_id,
            current_step: model.current_step,
            completed_steps: model.completed_steps.0,
            total_progress: model.total_progress,
            notes: model.notes,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// 완료 단계 정규화 (정렬, 중복 제거, 범위 확인)
pub fn normalize_steps(mut steps: Vec<i32>) -> Result<Vec<i32>, AppError> {
    if let Some(invalid) = steps.iter().find(|s| !(1..=MAX_STEP).contains(*s)) {
        return Err(AppError::bad_request(format!(
            "단계 번호는 1~{MAX_STEP} 사이여야 합니다: {invalid}"
        )));
    }
    steps.sort_unstable();
    steps.dedup();
    Ok(steps)
}

/// 완료 단계 수 기준 진행률 (반올림)
pub fn progress_percent(completed: usize) -> i32 {
    let completed = completed.min(MAX_STEP as usize) as f64;
    (completed * 100.0 / f64::from(MAX_STEP)).round() as i32
}

// ============== 단계 기록 ==============

#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
pub struct QaPairInput {
    #[validate(length(min = 1, max = 500, message = "질문은 1~500자여야 합니다"))]
    pub question: String,

    #[validate(length(max = 5000, message = "답변은 5000자를 초과할 수 없습니다"))]
    pub answer: Option<String>,
}

impl From<QaPairInput> for QaPair {
    fn from(input: QaPairInput) -> Self {
        Self {
            question: input.question,
            answer: input.answer,
        }
    }
}

/// 단계 기록 저장 요청 (없으면 생성, 있으면 대체)
///
/// `counselor_feedback`은 관리자/상담사만 작성할 수 있습니다.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpsertStepRequest {
    #[serde(default)]
    #[validate(length(max = 5, message = "질문/답변은 최대 5개입니다"), nested)]
    pub answers: Vec<QaPairInput>,

    #[validate(range(min = 1, max = 10, message = "스트레스 지수는 1~10 사이여야 합니다"))]
    pub stress_level: Option<i32>,

    pub additional_notes: Option<String>,

    pub counselor_feedback: Option<String>,

    pub session_id: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StepResponse {
    pub id: i64,
    pub consultation_id: i64,
    pub user_id: i64,
    pub session_id: Option<i64>,
    pub step_number: i32,
    pub answers: Vec<QaPair>,
    pub stress_level: Option<i32>,
    pub additional_notes: Option<String>,
    pub counselor_feedback: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<healing_step::Model> for StepResponse {
    fn from(model: healing_step::Model) -> Self {
        Self {
            id: model.id,
            consultation_id: model.consultation_id,
            user_id: model.user_id,
            session_id: model.session_id,
            step_number: model.step_number,
            answers: model.answers.0,
            stress_level: model.stress_level,
            additional_notes: model.additional_notes,
            counselor_feedback: model.counselor_feedback,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

pub fn check_step_number(step_number: i32) -> Result<(), AppError> {
    if !(1..=MAX_STEP).contains(&step_number) {
        return Err(AppError::bad_request(format!(
            "단계 번호는 1~{MAX_STEP} 사이여야 합니다."
        )));
    }
    Ok(())
}
