use sea_orm::entity::prelude::*;
use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 질문/답변 한 쌍
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct QaPair {
    pub question: String,
    pub answer: Option<String>,
}

/// 단계별 질문/답변 목록 (순서 유지, JSON 컬럼)
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct Answers(pub Vec<QaPair>);

/// 힐링 프로그램 단계 기록
///
/// (consultation_id, step_number) 조합이 유일합니다.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "healing_steps")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub consultation_id: i64,
    pub user_id: i64,
    pub session_id: Option<i64>,
    /// 1~12 (CHECK 제약)
    pub step_number: i32,
    pub answers: Answers,
    /// 1~10 (CHECK 제약)
    pub stress_level: Option<i32>,
    #[sea_orm(column_type = "Text", nullable)]
    pub additional_notes: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub counselor_feedback: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::domain::consultation::entity::consultation::Entity",
        from = "Column::ConsultationId",
        to = "crate::domain::consultation::entity::consultation::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Consultation,
    #[sea_orm(
        belongs_to = "crate::domain::user::entity::user::Entity",
        from = "Column::UserId",
        to = "crate::domain::user::entity::user::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(
        belongs_to = "crate::domain::consultation::entity::consultation_session::Entity",
        from = "Column::SessionId",
        to = "crate::domain::consultation::entity::consultation_session::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Session,
}

impl ActiveModelBehavior for ActiveModel {}
