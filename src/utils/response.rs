use serde::Serialize;
use utoipa::ToSchema;

/// API 공통 응답 구조체
///
/// 형식:
/// ```json
/// {
///   "is_success": true,
///   "code": "COMMON200",
///   "message": "성공입니다.",
///   "result": { ... }
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct BaseResponse<T: Serialize> {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: Option<T>,
}

const SUCCESS_CODE: &str = "COMMON200";
const SUCCESS_MESSAGE: &str = "성공입니다.";

impl<T: Serialize> BaseResponse<T> {
    fn ok(message: String, result: Option<T>) -> Self {
        Self {
            is_success: true,
            code: SUCCESS_CODE.to_string(),
            message,
            result,
        }
    }

    /// 성공 응답 생성
    pub fn success(result: T) -> Self {
        Self::ok(SUCCESS_MESSAGE.to_string(), Some(result))
    }

    /// 메시지를 지정한 성공 응답 생성
    pub fn success_with_message(result: T, message: impl Into<String>) -> Self {
        Self::ok(message.into(), Some(result))
    }
}

impl BaseResponse<()> {
    /// 본문 없는 성공 응답 (삭제 등)
    pub fn message_only(message: impl Into<String>) -> Self {
        Self::ok(message.into(), None)
    }
}

/// 에러 응답 구조체
///
/// 성공 응답과 같은 봉투를 쓰되 `is_success`는 항상 false, `result`는 null입니다.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: Option<()>,
}

impl ErrorResponse {
    /// 에러 응답 생성
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            is_success: false,
            code: code.into(),
            message: message.into(),
            result: None,
        }
    }
}

/// 본문 없는 성공 응답 (Swagger 문서용)
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: Option<()>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_should_wrap_result_in_envelope() {
        let body = serde_json::to_value(BaseResponse::success(json!({ "id": 1 }))).unwrap();

        assert_eq!(body["is_success"], true);
        assert_eq!(body["code"], "COMMON200");
        assert_eq!(body["result"]["id"], 1);
    }

    #[test]
    fn message_only_should_serialize_null_result() {
        let body = serde_json::to_value(BaseResponse::message_only("삭제되었습니다.")).unwrap();

        assert_eq!(body["message"], "삭제되었습니다.");
        assert!(body["result"].is_null());
    }

    #[test]
    fn error_response_should_not_be_success() {
        let body = serde_json::to_value(ErrorResponse::new("COMMON404", "없음")).unwrap();

        assert_eq!(body["is_success"], false);
        assert_eq!(body["code"], "COMMON404");
    }
}
