use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reviews")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub counselor_id: i64,
    pub consultation_id: Option<i64>,
    /// 1~5 (CHECK 제약)
    pub rating: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub is_anonymous: bool,
    pub is_approved: bool,
    pub is_active: bool,
    pub image_url: Option<String>,
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
        on_delete = "Cascade"
    )]
    Counselor,
    #[sea_orm(
        belongs_to = "crate::domain::consultation::entity::consultation::Entity",
        from = "Column::ConsultationId",
        to = "crate::domain::consultation::entity::consultation::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Consultation,
    #[sea_orm(has_many = "super::review_like::Entity")]
    ReviewLike,
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

impl Related<super::review_like::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ReviewLike.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
