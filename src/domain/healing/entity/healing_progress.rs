use sea_orm::entity::prelude::*;
use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

/// 완료된 단계 번호 목록 (JSON 컬럼)
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct CompletedSteps(pub Vec<i32>);

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "healing_progress")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub consultation_id: i64,
    /// 1~12
    pub current_step: i32,
    pub completed_steps: CompletedSteps,
    /// 0~100
    pub total_progress: i32,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
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
}

impl ActiveModelBehavior for ActiveModel {}
