//! 버전 기반 스키마 마이그레이션
//!
//! 각 버전은 자신이 만든 테이블/인덱스만 소유하며, 롤백 시 역순으로 그것만 삭제합니다.
//! 적용 이력은 `schema_migrations` 테이블에 기록됩니다.

use chrono::Utc;
use sea_orm::sea_query::{Expr, Index, IndexCreateStatement, Table, TableCreateStatement, TableDropStatement};
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder, Schema,
    Set, TransactionTrait,
};
use tracing::info;

use crate::domain::board::entity::{board, board_like, comment};
use crate::domain::checklist::entity::{checklist_item, checklist_master, user_checklist_response};
use crate::domain::consultation::entity::{consultation, consultation_session};
use crate::domain::counselor::entity::counselor;
use crate::domain::healing::entity::{healing_progress, healing_step};
use crate::domain::notice::entity::notice;
use crate::domain::review::entity::{review, review_like};
use crate::domain::user::entity::user;

pub mod schema_migration {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "schema_migrations")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub version: i32,
        pub name: String,
        pub applied_at: DateTime,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// 테이블 하나와 그 테이블에 딸린 인덱스
struct SchemaObject {
    create: TableCreateStatement,
    indexes: Vec<IndexCreateStatement>,
    drop: TableDropStatement,
}

impl SchemaObject {
    fn new<E: EntityTrait>(schema: &Schema, entity: E) -> Self {
        Self {
            create: schema.create_table_from_entity(entity),
            indexes: Vec::new(),
            drop: Table::drop().table(entity).if_exists().to_owned(),
        }
    }

    fn check(mut self, expr: sea_orm::sea_query::SimpleExpr) -> Self {
        self.create.check(expr);
        self
    }

    fn index(mut self, index: IndexCreateStatement) -> Self {
        self.indexes.push(index);
        self
    }
}

pub struct Migration {
    pub version: i32,
    pub name: &'static str,
    objects: fn(&Schema) -> Vec<SchemaObject>,
}

/// 전체 마이그레이션 목록 (버전 오름차순)
pub fn migrations() -> Vec<Migration> {
    vec![
        Migration {
            version: 1,
            name: "create_core_tables",
            objects: core_tables,
        },
        Migration {
            version: 2,
            name: "create_board_tables",
            objects: board_tables,
        },
        Migration {
            version: 3,
            name: "create_healing_tables",
            objects: healing_tables,
        },
        Migration {
            version: 4,
            name: "create_checklist_tables",
            objects: checklist_tables,
        },
    ]
}

fn core_tables(schema: &Schema) -> Vec<SchemaObject> {
    vec![
        SchemaObject::new(schema, user::Entity),
        SchemaObject::new(schema, counselor::Entity),
        SchemaObject::new(schema, consultation::Entity)
            .index(
                Index::create()
                    .name("idx_consultations_user_id")
                    .table(consultation::Entity)
                    .col(consultation::Column::UserId)
                    .to_owned(),
            )
            .index(
                Index::create()
                    .name("idx_consultations_status")
                    .table(consultation::Entity)
                    .col(consultation::Column::Status)
                    .to_owned(),
            ),
        SchemaObject::new(schema, review::Entity)
            .check(Expr::col(review::Column::Rating).between(1, 5))
            .index(
                Index::create()
                    .name("idx_reviews_counselor_id")
                    .table(review::Entity)
                    .col(review::Column::CounselorId)
                    .to_owned(),
            ),
        SchemaObject::new(schema, review_like::Entity).index(
            Index::create()
                .name("uq_review_likes_review_user")
                .table(review_like::Entity)
                .col(review_like::Column::ReviewId)
                .col(review_like::Column::UserId)
                .unique()
                .to_owned(),
        ),
        SchemaObject::new(schema, notice::Entity),
    ]
}

fn board_tables(schema: &Schema) -> Vec<SchemaObject> {
    vec![
        SchemaObject::new(schema, board::Entity),
        SchemaObject::new(schema, comment::Entity).index(
            Index::create()
                .name("idx_comments_board_id")
                .table(comment::Entity)
                .col(comment::Column::BoardId)
                .to_owned(),
        ),
        SchemaObject::new(schema, board_like::Entity).index(
            Index::create()
                .name("uq_board_likes_board_ip")
                .table(board_like::Entity)
                .col(board_like::Column::BoardId)
                .col(board_like::Column::IpAddress)
                .unique()
                .to_owned(),
        ),
    ]
}

fn healing_tables(schema: &Schema) -> Vec<SchemaObject> {
    vec![
        SchemaObject::new(schema, consultation_session::Entity).index(
            Index::create()
                .name("idx_consultation_sessions_consultation_id")
                .table(consultation_session::Entity)
                .col(consultation_session::Column::ConsultationId)
                .to_owned(),
        ),
        SchemaObject::new(schema, healing_progress::Entity)
            .check(Expr::col(healing_progress::Column::CurrentStep).between(1, 12))
            .check(Expr::col(healing_progress::Column::TotalProgress).between(0, 100)),
        SchemaObject::new(schema, healing_step::Entity)
            .check(Expr::col(healing_step::Column::StepNumber).between(1, 12))
            .check(
                Expr::col(healing_step::Column::StressLevel)
                    .is_null()
                    .or(Expr::col(healing_step::Column::StressLevel).between(1, 10)),
            )
            .index(
                Index::create()
                    .name("uq_healing_steps_consultation_step")
                    .table(healing_step::Entity)
                    .col(healing_step::Column::ConsultationId)
                    .col(healing_step::Column::StepNumber)
                    .unique()
                    .to_owned(),
            ),
    ]
}

fn checklist_tables(schema: &Schema) -> Vec<SchemaObject> {
    vec![
        SchemaObject::new(schema, checklist_master::Entity),
        SchemaObject::new(schema, checklist_item::Entity).index(
            Index::create()
                .name("idx_checklist_items_master_order")
                .table(checklist_item::Entity)
                .col(checklist_item::Column::MasterId)
                .col(checklist_item::Column::OrderIndex)
                .to_owned(),
        ),
        SchemaObject::new(schema, user_checklist_response::Entity).index(
            Index::create()
                .name("idx_user_checklist_responses_user_consultation")
                .table(user_checklist_response::Entity)
                .col(user_checklist_response::Column::UserId)
                .col(user_checklist_response::Column::ConsultationId)
                .to_owned(),
        ),
    ]
}

async fn ensure_tracking_table(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);
    let stmt = backend.build(
        schema
            .create_table_from_entity(schema_migration::Entity)
            .if_not_exists(),
    );
    db.execute(stmt).await?;
    Ok(())
}

/// 적용된 버전 목록 (오름차순)
pub async fn applied_versions(db: &DatabaseConnection) -> Result<Vec<i32>, DbErr> {
    ensure_tracking_table(db).await?;
    let rows = schema_migration::Entity::find()
        .order_by_asc(schema_migration::Column::Version)
        .all(db)
        .await?;
    Ok(rows.into_iter().map(|row| row.version).collect())
}

/// 미적용 마이그레이션을 모두 적용합니다.
///
/// 새로 적용된 버전 목록을 반환합니다.
pub async fn migrate_up(db: &DatabaseConnection) -> Result<Vec<i32>, DbErr> {
    let applied = applied_versions(db).await?;
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);
    let mut newly_applied = Vec::new();

    for migration in migrations() {
        if applied.contains(&migration.version) {
            continue;
        }

        let txn = db.begin().await?;
        for object in (migration.objects)(&schema) {
            txn.execute(backend.build(&object.create)).await?;
            for index in &object.indexes {
                txn.execute(backend.build(index)).await?;
            }
        }
        schema_migration::ActiveModel {
            version: Set(migration.version),
            name: Set(migration.name.to_string()),
            applied_at: Set(Utc::now().naive_utc()),
        }
        .insert(&txn)
        .await?;
        txn.commit().await?;

        info!(
            version = migration.version,
            name = migration.name,
            "migration applied"
        );
        newly_applied.push(migration.version);
    }

    Ok(newly_applied)
}

/// 최근 적용된 마이그레이션부터 `steps`개를 롤백합니다.
///
/// 롤백된 버전 목록을 반환합니다.
pub async fn migrate_down(db: &DatabaseConnection, steps: usize) -> Result<Vec<i32>, DbErr> {
    let applied = applied_versions(db).await?;
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);
    let all = migrations();
    let mut rolled_back = Vec::new();

    for version in applied.into_iter().rev().take(steps) {
        let migration = all
            .iter()
            .find(|m| m.version == version)
            .ok_or_else(|| DbErr::Custom(format!("unknown migration version {}", version)))?;

        let txn = db.begin().await?;
        for object in (migration.objects)(&schema).into_iter().rev() {
            txn.execute(backend.build(&object.drop)).await?;
        }
        schema_migration::Entity::delete_by_id(version)
            .exec(&txn)
            .await?;
        txn.commit().await?;

        info!(version, name = migration.name, "migration rolled back");
        rolled_back.push(version);
    }

    Ok(rolled_back)
}
