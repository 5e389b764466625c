use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_checklist_responses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub consultation_id: i64,
    pub master_id: i64,
    pub item_id: i64,
    #[sea_orm(column_type = "Text", nullable)]
    pub response_value: Option<String>,
    pub response_data: Option<Json>,
    pub completed_at: DateTime,
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
        belongs_to = "crate::domain::consultation::entity::consultation::Entity",
        from = "Column::ConsultationId",
        to = "crate::domain::consultation::entity::consultation::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Consultation,
    #[sea_orm(
        belongs_to = "super::checklist_master::Entity",
        from = "Column::MasterId",
        to = "super::checklist_master::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    ChecklistMaster,
    #[sea_orm(
        belongs_to = "super::checklist_item::Entity",
        from = "Column::ItemId",
        to = "super::checklist_item::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    ChecklistItem,
}

impl ActiveModelBehavior for ActiveModel {}
