use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub email: String,
    #[serde(skip_serializing)]
    pub hashed_password: String,
    pub name: String,
    pub phone: Option<String>,
    pub is_active: bool,
    pub is_admin: bool,
    pub is_counselor: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Model {
    /// 관리자 또는 상담사 여부
    pub fn is_staff(&self) -> bool {
        self.is_admin || self.is_counselor
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "crate::domain::consultation::entity::consultation::Entity")]
    Consultation,
    #[sea_orm(has_many = "crate::domain::review::entity::review::Entity")]
    Review,
    #[sea_orm(has_many = "crate::domain::notice::entity::notice::Entity")]
    Notice,
}

impl Related<crate::domain::consultation::entity::consultation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Consultation.def()
    }
}

impl Related<crate::domain::review::entity::review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Review.def()
    }
}

impl Related<crate::domain::notice::entity::notice::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Notice.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
