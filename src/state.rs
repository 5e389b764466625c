use crate::config::AppConfig;
use sea_orm::DatabaseConnection;

/// 핸들러 간 공유 상태
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: AppConfig,
}
