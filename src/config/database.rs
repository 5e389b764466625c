use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use tracing::info;

use super::app_config::AppConfig;
use super::migration::migrate_up;
use super::seed::seed_sample_data;

/// DB 연결 후 설정에 따라 마이그레이션과 샘플 데이터 적재를 수행합니다.
pub async fn establish_connection(config: &AppConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.database_url.clone());
    options
        .max_connections(10)
        .connect_timeout(Duration::from_secs(8))
        .sqlx_logging(false);

    let db = Database::connect(options).await?;
    info!("Successfully connected to the database.");

    if config.run_migrations {
        let applied = migrate_up(&db).await?;
        info!(applied = ?applied, "Database migrations completed.");
    } else {
        info!("Skipping database migrations (DB_RUN_MIGRATIONS is false).");
    }

    if config.seed_sample_data {
        seed_sample_data(&db, config.bcrypt_cost).await?;
    }

    Ok(db)
}
