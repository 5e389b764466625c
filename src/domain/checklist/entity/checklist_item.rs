use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 문항 유형
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    #[sea_orm(string_value = "checkbox")]
    Checkbox,
    #[sea_orm(string_value = "radio")]
    Radio,
    #[sea_orm(string_value = "text")]
    Text,
    #[sea_orm(string_value = "scale")]
    Scale,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "checklist_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub master_id: i64,
    #[sea_orm(column_type = "Text")]
    pub question: String,
    pub item_type: ItemType,
    /// radio 유형의 선택지 목록
    pub options: Option<Json>,
    /// 화면 표시용 필수 여부. 제출 검증과 완료율 계산에는 쓰이지 않습니다.
    pub required: bool,
    pub order_index: i32,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::checklist_master::Entity",
        from = "Column::MasterId",
        to = "super::checklist_master::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    ChecklistMaster,
}

impl Related<super::checklist_master::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ChecklistMaster.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
