use axum::{
    async_trait,
    extract::{ConnectInfo, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use axum_extra::extract::cookie::CookieJar;
use sea_orm::EntityTrait;
use std::net::SocketAddr;
use tracing::warn;

use crate::domain::user::entity::user;
use crate::state::AppState;
use crate::utils::cookie::ACCESS_TOKEN_COOKIE;
use crate::utils::error::AppError;
use crate::utils::jwt::{decode_access_token, Claims};

/// 인증된 토큰 정보를 담는 Extractor
pub struct AuthUser(pub Claims);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_token(parts)?
            .ok_or_else(|| AppError::Unauthorized("로그인이 필요합니다.".to_string()))?;

        // 토큰 검증 및 디코딩 (access token만 허용)
        let claims = decode_access_token(&token, &state.config.jwt_secret)?;

        Ok(AuthUser(claims))
    }
}

/// Authorization 헤더 또는 쿠키에서 토큰 추출
///
/// 토큰이 전혀 없으면 `Ok(None)`, 형식이 잘못되었으면 에러를 반환합니다.
fn extract_token(parts: &Parts) -> Result<Option<String>, AppError> {
    if let Some(auth_header) = parts.headers.get(AUTHORIZATION) {
        let auth_header_str = auth_header
            .to_str()
            .map_err(|_| AppError::Unauthorized("잘못된 헤더 형식입니다.".to_string()))?;

        let token = auth_header_str.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Unauthorized("토큰 형식이 올바르지 않습니다.".to_string())
        })?;

        return Ok(Some(token.to_string()));
    }

    let jar = CookieJar::from_headers(&parts.headers);
    Ok(jar
        .get(ACCESS_TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty()))
}

/// 토큰을 사용자 레코드로 해석합니다.
///
/// 존재하지 않거나 비활성화된 사용자는 인증 실패로 처리합니다.
pub async fn authenticate(state: &AppState, claims: &Claims) -> Result<user::Model, AppError> {
    let user_id: i64 = claims
        .sub
        .parse()
        .map_err(|_| AppError::Unauthorized("유효하지 않은 사용자 ID입니다.".to_string()))?;

    let user = user::Entity::find_by_id(user_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::Unauthorized("존재하지 않는 사용자입니다.".to_string()))?;

    if !user.is_active {
        return Err(AppError::InactiveAccount(
            "비활성화된 계정입니다.".to_string(),
        ));
    }

    Ok(user)
}

/// 관리자 권한 확인
pub fn require_admin(user: &user::Model) -> Result<(), AppError> {
    if !user.is_admin {
        warn!(user_id = user.id, "admin permission denied");
        return Err(AppError::Forbidden("관리자 권한이 필요합니다.".to_string()));
    }
    Ok(())
}

/// 관리자 또는 상담사 권한 확인
pub fn require_staff(user: &user::Model) -> Result<(), AppError> {
    if !user.is_staff() {
        warn!(user_id = user.id, "staff permission denied");
        return Err(AppError::Forbidden(
            "관리자 또는 상담사만 접근할 수 있습니다.".to_string(),
        ));
    }
    Ok(())
}

/// 소유자 또는 관리자 확인
pub fn require_owner_or_admin(user: &user::Model, owner_id: Option<i64>) -> Result<(), AppError> {
    if user.is_admin || owner_id == Some(user.id) {
        return Ok(());
    }
    warn!(user_id = user.id, ?owner_id, "ownership check failed");
    Err(AppError::Forbidden("접근 권한이 없습니다.".to_string()))
}

/// 인증 + 활성 사용자 로딩 Extractor
pub struct CurrentUser(pub user::Model);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser(claims) = AuthUser::from_request_parts(parts, state).await?;
        let user = authenticate(state, &claims).await?;
        Ok(CurrentUser(user))
    }
}

/// 관리자 전용 Extractor
pub struct AdminUser(pub user::Model);

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;
        require_admin(&user)?;
        Ok(AdminUser(user))
    }
}

/// 선택적 인증 Extractor
///
/// 토큰이 없으면 익명으로 통과하고, 토큰이 있으면 반드시 유효해야 합니다.
pub struct MaybeUser(pub Option<user::Model>);

#[async_trait]
impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = extract_token(parts)? else {
            return Ok(MaybeUser(None));
        };
        let claims = decode_access_token(&token, &state.config.jwt_secret)?;
        let user = authenticate(state, &claims).await?;
        Ok(MaybeUser(Some(user)))
    }
}

/// 요청자 IP 주소 Extractor
///
/// 소켓 주소를 우선 사용하고, 없으면 `x-forwarded-for`의 첫 번째 값을 사용합니다.
pub struct ClientIp(pub String);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for ClientIp {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(ConnectInfo(addr)) = parts.extensions.get::<ConnectInfo<SocketAddr>>() {
            return Ok(ClientIp(addr.ip().to_string()));
        }

        parts
            .headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(|ip| ip.trim().to_string())
            .filter(|ip| !ip.is_empty())
            .map(ClientIp)
            .ok_or_else(|| AppError::bad_request("클라이언트 IP를 확인할 수 없습니다."))
    }
}
