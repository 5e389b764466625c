use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use tracing::{info, warn};

use super::dto::{LoginRequest, RegisterRequest, TokenRefreshRequest, TokenResponse};
use crate::domain::user::entity::user;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::jwt::{decode_refresh_token, encode_refresh_token, encode_token};
use crate::utils::password::{hash_password, verify_password};

const INVALID_CREDENTIALS: &str = "이메일 또는 비밀번호가 올바르지 않습니다.";

pub struct AuthService;

impl AuthService {
    /// 회원가입
    pub async fn register(state: &AppState, req: RegisterRequest) -> Result<user::Model, AppError> {
        let email = req.email.trim().to_lowercase();

        let exists = user::Entity::find()
            .filter(user::Column::Email.eq(&email))
            .one(&state.db)
            .await?
            .is_some();
        if exists {
            return Err(AppError::conflict("이미 등록된 이메일입니다."));
        }

        let hashed_password = hash_password(&req.password, state.config.bcrypt_cost)?;
        let now = Utc::now().naive_utc();

        // 동시 가입 경합은 UNIQUE 제약이 Conflict로 변환합니다.
        let user = user::ActiveModel {
            email: Set(email),
            hashed_password: Set(hashed_password),
            name: Set(req.name.trim().to_string()),
            phone: Set(req.phone),
            is_active: Set(true),
            is_admin: Set(false),
            is_counselor: Set(req.is_counselor),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&state.db)
        .await?;

        info!(user_id = user.id, is_counselor = user.is_counselor, "user registered");
        Ok(user)
    }

    /// 로그인
    ///
    /// 비활성 계정은 자격 증명이 맞더라도 별도 코드로 거부합니다.
    pub async fn login(state: &AppState, req: LoginRequest) -> Result<TokenResponse, AppError> {
        let email = req.email.trim().to_lowercase();

        let user = user::Entity::find()
            .filter(user::Column::Email.eq(&email))
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::unauthorized(INVALID_CREDENTIALS))?;

        if !verify_password(&req.password, &user.hashed_password) {
            warn!(user_id = user.id, "login failed: password mismatch");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        if !user.is_active {
            warn!(user_id = user.id, "login rejected: inactive account");
            return Err(AppError::InactiveAccount(
                "비활성화된 계정입니다. 관리자에게 문의하세요.".to_string(),
            ));
        }

        info!(user_id = user.id, "user logged in");
        Self::issue_tokens(state, user)
    }

    /// Refresh Token으로 새 토큰 쌍 발급
    pub async fn refresh(
        state: &AppState,
        req: TokenRefreshRequest,
    ) -> Result<TokenResponse, AppError> {
        let claims = decode_refresh_token(&req.refresh_token, &state.config.jwt_secret)?;
        let user_id: i64 = claims
            .sub
            .parse()
            .map_err(|_| AppError::unauthorized("유효하지 않은 토큰입니다."))?;

        let user = user::Entity::find_by_id(user_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::unauthorized("존재하지 않는 사용자입니다."))?;

        if !user.is_active {
            return Err(AppError::InactiveAccount(
                "비활성화된 계정입니다. 관리자에게 문의하세요.".to_string(),
            ));
        }

        Self::issue_tokens(state, user)
    }

    fn issue_tokens(state: &AppState, user: user::Model) -> Result<TokenResponse, AppError> {
        let access_token = encode_token(
            user.id.to_string(),
            &state.config.jwt_secret,
            state.config.jwt_expiration,
        )?;
        let refresh_token = encode_refresh_token(
            user.id.to_string(),
            &state.config.jwt_secret,
            state.config.refresh_token_expiration,
        )?;

        Ok(TokenResponse {
            access_token,
            refresh_token,
            token_type: "bearer".to_string(),
            expires_in: state.config.jwt_expiration,
            user: user.into(),
        })
    }
}
