use axum_extra::extract::cookie::{Cookie, SameSite};

/// 쿠키 이름 상수
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// Access Token 쿠키 생성
///
/// `Secure` 속성은 프로덕션 환경에서만 붙입니다.
pub fn access_token_cookie(token: String, max_age_seconds: i64, secure: bool) -> Cookie<'static> {
    Cookie::build((ACCESS_TOKEN_COOKIE, token))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(time::Duration::seconds(max_age_seconds))
        .build()
}

/// Access Token 쿠키 삭제 (만료 처리)
pub fn expired_access_token_cookie(secure: bool) -> Cookie<'static> {
    access_token_cookie(String::new(), 0, secure)
}
