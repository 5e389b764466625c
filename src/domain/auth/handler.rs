use axum::{extract::State, Json};
use axum_extra::extract::cookie::CookieJar;

use super::dto::{LoginRequest, RegisterRequest, TokenRefreshRequest, TokenResponse};
use super::service::AuthService;
use crate::domain::user::dto::UserResponse;
use crate::state::AppState;
use crate::utils::auth::CurrentUser;
use crate::utils::cookie::{access_token_cookie, expired_access_token_cookie};
use crate::utils::error::AppError;
use crate::utils::extract::ValidJson;
use crate::utils::BaseResponse;

/// 회원가입
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "가입 성공", body = UserResponse),
        (status = 400, description = "잘못된 요청", body = ErrorResponse),
        (status = 409, description = "이메일 중복", body = ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn register(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<RegisterRequest>,
) -> Result<Json<BaseResponse<UserResponse>>, AppError> {
    let user = AuthService::register(&state, req).await?;

    Ok(Json(BaseResponse::success_with_message(
        user.into(),
        "회원가입이 완료되었습니다.",
    )))
}

/// 로그인
///
/// access/refresh 토큰을 발급하고 access token을 HttpOnly 쿠키로도 설정합니다.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "로그인 성공", body = TokenResponse),
        (status = 401, description = "자격 증명 불일치(AUTH4001) 또는 비활성 계정(AUTH4003)", body = ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidJson(req): ValidJson<LoginRequest>,
) -> Result<(CookieJar, Json<BaseResponse<TokenResponse>>), AppError> {
    let result = AuthService::login(&state, req).await?;
    let jar = jar.add(access_token_cookie(
        result.access_token.clone(),
        state.config.jwt_expiration,
        state.config.is_production(),
    ));

    Ok((jar, Json(BaseResponse::success(result))))
}

/// 토큰 갱신
#[utoipa::path(
    post,
    path = "/api/v1/auth/refresh",
    request_body = TokenRefreshRequest,
    responses(
        (status = 200, description = "갱신 성공", body = TokenResponse),
        (status = 401, description = "유효하지 않은 토큰", body = ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidJson(req): ValidJson<TokenRefreshRequest>,
) -> Result<(CookieJar, Json<BaseResponse<TokenResponse>>), AppError> {
    let result = AuthService::refresh(&state, req).await?;
    let jar = jar.add(access_token_cookie(
        result.access_token.clone(),
        state.config.jwt_expiration,
        state.config.is_production(),
    ));

    Ok((jar, Json(BaseResponse::success(result))))
}

/// 로그아웃
///
/// 서버는 토큰을 저장하지 않으므로 쿠키만 만료시킵니다.
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    responses(
        (status = 200, description = "로그아웃 성공", body = MessageResponse)
    ),
    tag = "Auth"
)]
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<BaseResponse<()>>) {
    (
        jar.add(expired_access_token_cookie(state.config.is_production())),
        Json(BaseResponse::message_only("로그아웃되었습니다.")),
    )
}

/// 내 정보 조회
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "조회 성공", body = UserResponse),
        (status = 401, description = "인증 실패", body = ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn me(CurrentUser(user): CurrentUser) -> Json<BaseResponse<UserResponse>> {
    Json(BaseResponse::success(user.into()))
}
