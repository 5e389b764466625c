use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::entity::consultation::{self, ConsultationStatus, ConsultationType, UrgencyLevel};
use super::entity::consultation_session::{self, SessionStatus};

// ============== 상담 신청 ==============

/// 상담 신청 요청 (비회원 접수 가능)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateConsultationRequest {
    pub consultation_type: ConsultationType,

    #[serde(default = "default_urgency")]
    pub urgency_level: UrgencyLevel,

    #[validate(length(min = 1, max = 200, message = "제목은 1~200자여야 합니다"))]
    pub title: String,

    #[validate(length(min = 1, max = 5000, message = "상담 내용은 1~5000자여야 합니다"))]
    pub description: String,

    pub preferred_date: Option<NaiveDate>,

    #[validate(length(max = 50, message = "희망 시간은 50자를 초과할 수 없습니다"))]
    pub preferred_time: Option<String>,

    #[validate(length(min = 1, max = 200, message = "신청자 이름은 1~200자여야 합니다"))]
    pub contact_name: String,

    #[validate(custom(function = "crate::utils::validation::validate_phone"))]
    pub contact_phone: String,

    #[validate(email(message = "이메일 형식이 올바르지 않습니다"))]
    pub contact_email: String,

    /// 희망 상담사
    pub counselor_id: Option<i64>,

    #[serde(default = "default_confidential")]
    pub is_confidential: bool,
}

fn default_urgency() -> UrgencyLevel {
    UrgencyLevel::Medium
}

fn default_confidential() -> bool {
    true
}

/// 상담 신청 수정 요청 (부분 수정)
///
/// `status`와 `notes`는 관리자/상담사만 변경할 수 있습니다.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateConsultationRequest {
    pub consultation_type: Option<ConsultationType>,
    pub urgency_level: Option<UrgencyLevel>,
    pub status: Option<ConsultationStatus>,

    #[validate(length(min = 1, max = 200, message = "제목은 1~200자여야 합니다"))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 5000, message = "상담 내용은 1~5000자여야 합니다"))]
    pub description: Option<String>,

    pub preferred_date: Option<NaiveDate>,

    #[validate(length(max = 50, message = "희망 시간은 50자를 초과할 수 없습니다"))]
    pub preferred_time: Option<String>,

    #[validate(length(min = 1, max = 200, message = "신청자 이름은 1~200자여야 합니다"))]
    pub contact_name: Option<String>,

    #[validate(custom(function = "crate::utils::validation::validate_phone"))]
    pub contact_phone: Option<String>,

    #[validate(email(message = "이메일 형식이 올바르지 않습니다"))]
    pub contact_email: Option<String>,

    pub counselor_id: Option<i64>,

    pub notes: Option<String>,

    pub is_confidential: Option<bool>,
}

impl UpdateConsultationRequest {
    /// 관리자/상담사 전용 필드를 포함하는지 여부
    pub fn touches_staff_fields(&self) -> bool {
        self.status.is_some() || self.notes.is_some()
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ConsultationResponse {
    pub id: i64,
    pub user_id: Option<i64>,
    pub counselor_id: Option<i64>,
    pub consultation_type: ConsultationType,
    pub status: ConsultationStatus,
    pub urgency_level: UrgencyLevel,
    pub title: String,
    pub description: String,
    pub preferred_date: Option<NaiveDate>,
    pub preferred_time: Option<String>,
    pub contact_name: String,
    pub contact_phone: String,
    pub contact_email: String,
    pub notes: Option<String>,
    pub is_confidential: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<consultation::Model> for ConsultationResponse {
    fn from(model: consultation::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            counselor_id: model.counselor_id,
            consultation_type: model.consultation_type,
            status: model.status,
            urgency_level: model.urgency_level,
            title: model.title,
            description: model.description,
            preferred_date: model.preferred_date,
            preferred_time: model.preferred_time,
            contact_name: model.contact_name,
            contact_phone: model.contact_phone,
            contact_email: model.contact_email,
            notes: model.notes,
            is_confidential: model.is_confidential,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// 공개 목록 항목 (연락처/메모 제외)
#[derive(Debug, Serialize, ToSchema)]
pub struct PublicConsultationItem {
    pub id: i64,
    pub consultation_type: ConsultationType,
    pub status: ConsultationStatus,
    pub urgency_level: UrgencyLevel,
    pub title: String,
    pub created_at: NaiveDateTime,
}

impl From<consultation::Model> for PublicConsultationItem {
    fn from(model: consultation::Model) -> Self {
        Self {
            id: model.id,
            consultation_type: model.consultation_type,
            status: model.status,
            urgency_level: model.urgency_level,
            title: model.title,
            created_at: model.created_at,
        }
    }
}

/// 상담 목록 필터
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ConsultationFilter {
    pub status: Option<ConsultationStatus>,
    pub consultation_type: Option<ConsultationType>,
    pub urgency_level: Option<UrgencyLevel>,
}

/// 상태별 신청 건수
#[derive(Debug, Default, PartialEq, Serialize, ToSchema)]
pub struct ConsultationStats {
    pub total: u64,
    pub pending: u64,
    pub reviewing: u64,
    pub confirmed: u64,
    pub completed: u64,
    pub cancelled: u64,
}

impl ConsultationStats {
    pub fn set(&mut self, status: ConsultationStatus, count: u64) {
        match status {
            ConsultationStatus::Pending => self.pending = count,
            ConsultationStatus::Reviewing => self.reviewing = count,
            ConsultationStatus::Confirmed => self.confirmed = count,
            ConsultationStatus::Completed => self.completed = count,
            ConsultationStatus::Cancelled => self.cancelled = count,
        }
    }
}

// ============== 상담 회기 ==============

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateSessionRequest {
    pub session_date: Option<NaiveDate>,
    pub session_time: Option<NaiveTime>,

    #[validate(range(min = 10, max = 480, message = "회기 시간은 10~480분이어야 합니다"))]
    pub duration_minutes: Option<i32>,

    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateSessionRequest {
    pub session_date: Option<NaiveDate>,
    pub session_time: Option<NaiveTime>,

    #[validate(range(min = 10, max = 480, message = "회기 시간은 10~480분이어야 합니다"))]
    pub duration_minutes: Option<i32>,

    pub notes: Option<String>,
    pub status: Option<SessionStatus>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SessionResponse {
    pub id: i64,
    pub consultation_id: i64,
    pub session_number: i32,
    pub session_date: Option<NaiveDate>,
    pub session_time: Option<NaiveTime>,
    pub duration_minutes: i32,
    pub counselor_user_id: Option<i64>,
    pub notes: Option<String>,
    pub status: SessionStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<consultation_session::Model> for SessionResponse {
    fn from(model: consultation_session::Model) -> Self {
        Self {
            id: model.id,
            consultation_id: model.consultation_id,
            session_number: model.session_number,
            session_date: model.session_date,
            session_time: model.session_time,
            duration_minutes: model.duration_minutes,
            counselor_user_id: model.counselor_user_id,
            notes: model.notes,
            status: model.status,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
