pub mod app_config;
pub mod database;
pub mod migration;
pub mod seed;

pub use app_config::{AppConfig, ConfigError};
pub use database::establish_connection;
