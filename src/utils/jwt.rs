use chrono::{TimeDelta, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::error::AppError;

pub const ACCESS_TOKEN_TYPE: &str = "access";
pub const REFRESH_TOKEN_TYPE: &str = "refresh";

/// JWT Claims 구조체
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (User ID)
    pub sub: String,
    /// Issued At
    pub iat: usize,
    /// Expiration
    pub exp: usize,
    /// Token Type (access, refresh)
    pub token_type: String,
}

fn encode_with_type(
    sub: String,
    secret: &str,
    expiration_seconds: i64,
    token_type: &str,
) -> Result<String, AppError> {
    let now = Utc::now();
    let expiration = TimeDelta::try_seconds(expiration_seconds)
        .and_then(|ttl| now.checked_add_signed(ttl))
        .ok_or_else(|| AppError::internal_error("Invalid token expiration"))?;

    let claims = Claims {
        sub,
        iat: now.timestamp() as usize,
        exp: expiration.timestamp() as usize,
        token_type: token_type.to_string(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalError(format!("Token creation failed: {}", e)))
}

/// JWT 토큰 생성 (Access Token)
pub fn encode_token(
    sub: String,
    secret: &str,
    expiration_seconds: i64,
) -> Result<String, AppError> {
    encode_with_type(sub, secret, expiration_seconds, ACCESS_TOKEN_TYPE)
}

/// Refresh Token 생성
pub fn encode_refresh_token(
    sub: String,
    secret: &str,
    expiration_seconds: i64,
) -> Result<String, AppError> {
    encode_with_type(sub, secret, expiration_seconds, REFRESH_TOKEN_TYPE)
}

/// JWT 토큰 검증
pub fn decode_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    let validation = Validation::default();

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
            AppError::Unauthorized("토큰이 만료되었습니다.".into())
        }
        _ => AppError::Unauthorized("유효하지 않은 토큰입니다.".into()),
    })
}

fn decode_typed(token: &str, secret: &str, expected: &str) -> Result<Claims, AppError> {
    let claims = decode_token(token, secret)?;
    if claims.token_type != expected {
        return Err(AppError::Unauthorized(
            "유효하지 않은 토큰 타입입니다.".into(),
        ));
    }
    Ok(claims)
}

/// Access Token만 허용
pub fn decode_access_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    decode_typed(token, secret, ACCESS_TOKEN_TYPE)
}

/// Refresh Token만 허용
pub fn decode_refresh_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    decode_typed(token, secret, REFRESH_TOKEN_TYPE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_and_decode() {
        let secret = "test_secret";
        let sub = "123".to_string();

        let token = encode_token(sub.clone(), secret, 3600).expect("Token generation failed");
        let claims = decode_access_token(&token, secret).expect("Token validation failed");

        assert_eq!(claims.sub, sub);
        assert_eq!(claims.token_type, ACCESS_TOKEN_TYPE);
    }

    #[test]
    fn test_invalid_token() {
        let result = decode_token("invalid_token", "test_secret");
        assert!(result.is_err());
    }

    #[test]
    fn test_wrong_secret() {
        let token = encode_token("1".into(), "secret_a", 3600).unwrap();
        let result = decode_token(&token, "secret_b");
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn refresh_token_should_not_pass_as_access_token() {
        let token = encode_refresh_token("1".into(), "test_secret", 3600).unwrap();

        assert!(decode_access_token(&token, "test_secret").is_err());
        assert!(decode_refresh_token(&token, "test_secret").is_ok());
    }

    #[test]
    fn expired_token_should_be_rejected() {
        // 기본 leeway(60초)보다 충분히 과거로 설정
        let token = encode_token("1".into(), "test_secret", -600).unwrap();
        let result = decode_access_token(&token, "test_secret");

        match result {
            Err(AppError::Unauthorized(msg)) => assert!(msg.contains("만료")),
            other => panic!("expected expired token error, got {:?}", other),
        }
    }
}
