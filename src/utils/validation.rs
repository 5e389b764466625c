use regex::Regex;
use std::sync::LazyLock;
use validator::ValidationError;

/// 국내 휴대폰/유선 번호 (하이픈 선택)
static PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^0\d{1,2}-?\d{3,4}-?\d{4}$").expect("valid phone regex"));

pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if PHONE_REGEX.is_match(phone) {
        Ok(())
    } else {
        let mut err = ValidationError::new("phone");
        err.message = Some("전화번호 형식이 올바르지 않습니다".into());
        Err(err)
    }
}

/// 공백만으로 이루어진 문자열 거부
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("빈 값일 수 없습니다".into());
        Err(err)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_accept_common_phone_formats() {
        assert!(validate_phone("010-1234-5678").is_ok());
        assert!(validate_phone("01012345678").is_ok());
        assert!(validate_phone("031-123-4567").is_ok());
    }

    #[test]
    fn phone_pattern_should_compile() {
        assert!(LazyLock::force(&PHONE_REGEX).is_match("02-123-4567"));
    }

    #[test]
    fn should_reject_invalid_phone() {
        assert!(validate_phone("12345").is_err());
        assert!(validate_phone("010-12ab-5678").is_err());
    }

    #[test]
    fn should_reject_blank_text() {
        assert!(validate_not_blank("   ").is_err());
        assert!(validate_not_blank("내용").is_ok());
    }
}
