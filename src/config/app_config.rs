use std::env;

const DEV_JWT_SECRET: &str = "healing-center-dev-secret";

/// 애플리케이션 설정
///
/// main에서 한 번 생성되어 `AppState`를 통해 전달됩니다.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_port: u16,
    pub database_url: String,
    pub jwt_secret: String,
    /// Access Token 만료 시간 (초)
    pub jwt_expiration: i64,
    /// Refresh Token 만료 시간 (초)
    pub refresh_token_expiration: i64,
    pub cors_origins: Vec<String>,
    pub run_migrations: bool,
    pub seed_sample_data: bool,
    pub app_env: String,
    pub bcrypt_cost: u32,
    /// 일별 로그 파일 디렉터리
    pub log_dir: String,
}

impl AppConfig {
    /// 환경 변수에서 설정 로드
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 키 조회 함수로부터 설정 구성
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let server_port = get("SERVER_PORT", "8080")
            .parse()
            .map_err(|_| ConfigError::InvalidPort)?;

        let database_url = get("DATABASE_URL", "sqlite://healing.db?mode=rwc");

        let app_env = get("APP_ENV", "development");

        let jwt_secret = match lookup("JWT_SECRET").filter(|s| !s.is_empty()) {
            Some(secret) => secret,
            None if app_env == "production" => return Err(ConfigError::MissingJwtSecret),
            None => DEV_JWT_SECRET.to_string(),
        };

        let jwt_expiration = get("JWT_EXPIRATION", "1800")
            .parse()
            .map_err(|_| ConfigError::InvalidExpiration("JWT_EXPIRATION"))?;

        let refresh_token_expiration = get("REFRESH_TOKEN_EXPIRATION", "604800")
            .parse()
            .map_err(|_| ConfigError::InvalidExpiration("REFRESH_TOKEN_EXPIRATION"))?;

        let cors_origins = get(
            "CORS_ORIGINS",
            "http://localhost:3000,http://127.0.0.1:3000",
        )
        .split(',')
        .map(|origin| origin.trim().to_string())
        .filter(|origin| !origin.is_empty())
        .collect();

        let run_migrations = parse_bool("DB_RUN_MIGRATIONS", &get("DB_RUN_MIGRATIONS", "true"))?;
        let seed_sample_data = parse_bool("SEED_SAMPLE_DATA", &get("SEED_SAMPLE_DATA", "false"))?;

        let bcrypt_cost = get("BCRYPT_COST", "12")
            .parse::<u32>()
            .ok()
            .filter(|cost| (4..=31).contains(cost))
            .ok_or(ConfigError::InvalidBcryptCost)?;

        let log_dir = get("LOG_DIR", "logs");

        Ok(Self {
            server_port,
            database_url,
            jwt_secret,
            jwt_expiration,
            refresh_token_expiration,
            cors_origins,
            run_migrations,
            seed_sample_data,
            app_env,
            bcrypt_cost,
            log_dir,
        })
    }

    pub fn is_production(&self) -> bool {
        self.app_env == "production"
    }

    /// `JWT_SECRET` 미설정으로 개발용 시크릿을 쓰는 중인지
    pub fn uses_dev_jwt_secret(&self) -> bool {
        self.jwt_secret == DEV_JWT_SECRET
    }
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidBool(key)),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid port number")]
    InvalidPort,
    #[error("Invalid expiration time for {0}")]
    InvalidExpiration(&'static str),
    #[error("Invalid boolean value for {0}")]
    InvalidBool(&'static str),
    #[error("BCRYPT_COST must be between 4 and 31")]
    InvalidBcryptCost,
    #[error("JWT_SECRET environment variable is required in production")]
    MissingJwtSecret,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn should_apply_defaults() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.server_port, 8080);
        assert_eq!(config.jwt_expiration, 1800);
        assert_eq!(config.refresh_token_expiration, 604800);
        assert!(config.run_migrations);
        assert!(!config.seed_sample_data);
        assert!(config.uses_dev_jwt_secret());
        assert_eq!(config.log_dir, "logs");
        assert_eq!(config.cors_origins.len(), 2);
    }

    #[test]
    fn should_split_cors_origins() {
        let config =
            config_from(&[("CORS_ORIGINS", "https://a.example, https://b.example,")]).unwrap();

        assert_eq!(
            config.cors_origins,
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
    }

    #[test]
    fn should_read_log_dir_and_secret_from_lookup() {
        let config = config_from(&[
            ("LOG_DIR", "/var/log/healing"),
            ("JWT_SECRET", "prod-secret"),
        ])
        .unwrap();

        assert_eq!(config.log_dir, "/var/log/healing");
        assert!(!config.uses_dev_jwt_secret());
    }

    #[test]
    fn should_reject_invalid_port() {
        let result = config_from(&[("SERVER_PORT", "not-a-port")]);
        assert!(matches!(result, Err(ConfigError::InvalidPort)));
    }

    #[test]
    fn should_reject_invalid_bool() {
        let result = config_from(&[("SEED_SAMPLE_DATA", "maybe")]);
        assert!(matches!(result, Err(ConfigError::InvalidBool("SEED_SAMPLE_DATA"))));
    }

    #[test]
    fn production_should_require_jwt_secret() {
        let result = config_from(&[("APP_ENV", "production")]);
        assert!(matches!(result, Err(ConfigError::MissingJwtSecret)));

        let config = config_from(&[("APP_ENV", "production"), ("JWT_SECRET", "s3cr3t")]).unwrap();
        assert!(config.is_production());
        assert_eq!(config.jwt_secret, "s3cr3t");
    }

    #[test]
    fn should_reject_out_of_range_bcrypt_cost() {
        let result = config_from(&[("BCRYPT_COST", "2")]);
        assert!(matches!(result, Err(ConfigError::InvalidBcryptCost)));
    }
}
