use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::entity::user;

/// 사용자 정보 응답 (비밀번호 해시 제외)
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
    pub is_active: bool,
    pub is_admin: bool,
    pub is_counselor: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<user::Model> for UserResponse {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            name: model.name,
            phone: model.phone,
            is_active: model.is_active,
            is_admin: model.is_admin,
            is_counselor: model.is_counselor,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// 내 정보 수정 요청
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateMeRequest {
    #[validate(length(min = 1, max = 100, message = "이름은 1~100자여야 합니다"))]
    pub name: Option<String>,

    #[validate(custom(function = "crate::utils::validation::validate_phone"))]
    pub phone: Option<String>,
}

/// 관리자의 사용자 권한/상태 변경 요청
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AdminUpdateUserRequest {
    pub is_active: Option<bool>,
    pub is_admin: Option<bool>,
    pub is_counselor: Option<bool>,
}

/// 사용자 목록 필터
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserFilter {
    pub is_active: Option<bool>,
    pub is_counselor: Option<bool>,
}
