use super::error::AppError;

/// 비밀번호 해싱 (bcrypt)
pub fn hash_password(password: &str, cost: u32) -> Result<String, AppError> {
    bcrypt::hash(password, cost)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {}", e)))
}

/// 비밀번호 검증
///
/// 저장된 해시가 손상된 경우에도 불일치로 취급합니다.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    bcrypt::verify(password, password_hash).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_COST: u32 = 4;

    #[test]
    fn should_verify_hashed_password() {
        let hash = hash_password("pw12345678", TEST_COST).unwrap();

        assert_ne!(hash, "pw12345678");
        assert!(verify_password("pw12345678", &hash));
        assert!(!verify_password("wrong-password", &hash));
    }

    #[test]
    fn should_reject_malformed_hash() {
        assert!(!verify_password("pw12345678", "not-a-bcrypt-hash"));
    }

    #[test]
    fn should_fail_on_invalid_cost() {
        assert!(hash_password("pw12345678", 1).is_err());
    }
}
