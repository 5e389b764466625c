use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::user::dto::UserResponse;

/// 회원가입 요청 DTO
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(email(message = "이메일 형식이 올바르지 않습니다"))]
    pub email: String,

    #[validate(length(min = 8, max = 128, message = "비밀번호는 8~128자여야 합니다"))]
    pub password: String,

    #[validate(
        length(min = 1, max = 100, message = "이름은 1~100자여야 합니다"),
        custom(function = "crate::utils::validation::validate_not_blank")
    )]
    pub name: String,

    #[validate(custom(function = "crate::utils::validation::validate_phone"))]
    pub phone: Option<String>,

    /// 상담사 계정으로 가입
    #[serde(default)]
    pub is_counselor: bool,
}

/// 로그인 요청 DTO
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "이메일 형식이 올바르지 않습니다"))]
    pub email: String,

    #[validate(length(min = 1, message = "비밀번호는 필수입니다"))]
    pub password: String,
}

/// 토큰 갱신 요청 DTO
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct TokenRefreshRequest {
    #[validate(length(min = 1, message = "refresh_token은 필수입니다"))]
    pub refresh_token: String,
}

/// 토큰 발급 응답
///
/// access token은 `access_token` 쿠키로도 함께 전달됩니다.
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    #[schema(example = "bearer")]
    pub token_type: String,
    /// access token 만료까지 남은 시간 (초)
    pub expires_in: i64,
    pub user: UserResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(email: &str, password: &str, name: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.into(),
            password: password.into(),
            name: name.into(),
            phone: None,
            is_counselor: false,
        }
    }

    #[test]
    fn register_should_accept_valid_input() {
        assert!(register("a@x.com", "pw12345678", "A").validate().is_ok());
    }

    #[test]
    fn register_should_reject_malformed_email() {
        assert!(register("not-an-email", "pw12345678", "A").validate().is_err());
    }

    #[test]
    fn register_should_reject_short_password() {
        assert!(register("a@x.com", "short", "A").validate().is_err());
    }

    #[test]
    fn register_should_reject_blank_name() {
        assert!(register("a@x.com", "pw12345678", "   ").validate().is_err());
    }

    #[test]
    fn register_should_default_is_counselor_to_false() {
        let req: RegisterRequest = serde_json::from_str(
            r#"{"email":"a@x.com","password":"pw12345678","name":"A"}"#,
        )
        .unwrap();
        assert!(!req.is_counselor);
    }
}
