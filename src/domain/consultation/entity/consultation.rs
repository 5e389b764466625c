use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 상담 유형
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum ConsultationType {
    #[sea_orm(string_value = "individual")]
    Individual,
    #[sea_orm(string_value = "couple")]
    Couple,
    #[sea_orm(string_value = "family")]
    Family,
    #[sea_orm(string_value = "youth")]
    Youth,
    #[sea_orm(string_value = "trauma")]
    Trauma,
    #[sea_orm(string_value = "other")]
    Other,
}

/// 상담 진행 상태
///
/// 상태 간 전이 규칙은 두지 않으며, 권한이 있는 사용자는 어떤 값으로든 변경할 수 있습니다.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum ConsultationStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "reviewing")]
    Reviewing,
    #[sea_orm(string_value = "confirmed")]
    Confirmed,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

/// 긴급도
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum UrgencyLevel {
    #[sea_orm(string_value = "low")]
    Low,
    #[sea_orm(string_value = "medium")]
    Medium,
    #[sea_orm(string_value = "high")]
    High,
    #[sea_orm(string_value = "urgent")]
    Urgent,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "consultations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// 비회원 접수 시 None
    pub user_id: Option<i64>,
    pub counselor_id: Option<i64>,
    pub consultation_type: ConsultationType,
    pub status: ConsultationStatus,
    pub urgency_level: UrgencyLevel,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub preferred_date: Option<Date>,
    pub preferred_time: Option<String>,
    pub contact_name: String,
    pub contact_phone: String,
    pub contact_email: String,
    /// 관리자 메모
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    pub is_confidential: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::domain::user::entity::user::Entity",
        from = "Column::UserId",
        to = "crate::domain::user::entity::user::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(
        belongs_to = "crate::domain::counselor::entity::counselor::Entity",
        from = "Column::CounselorId",
        to = "crate::domain::counselor::entity::counselor::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Counselor,
    #[sea_orm(has_many = "super::consultation_session::Entity")]
    ConsultationSession,
}

impl Related<crate::domain::user::entity::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<crate::domain::counselor::entity::counselor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Counselor.def()
    }
}

impl Related<super::consultation_session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ConsultationSession.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
