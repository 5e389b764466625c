use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::entity::counselor;

#[derive(Debug, Serialize, ToSchema)]
pub struct CounselorResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub specialization: Option<String>,
    pub education: Option<String>,
    pub experience: Option<String>,
    pub certification: Option<String>,
    pub bio: Option<String>,
    pub profile_image: Option<String>,
    pub is_online: bool,
    pub is_active: bool,
    #[schema(example = 4.5)]
    pub rating: f64,
    pub total_reviews: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<counselor::Model> for CounselorResponse {
    fn from(model: counselor::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            phone: model.phone,
            specialization: model.specialization,
            education: model.education,
            experience: model.experience,
            certification: model.certification,
            bio: model.bio,
            profile_image: model.profile_image,
            is_online: model.is_online,
            is_active: model.is_active,
            rating: model.rating,
            total_reviews: model.total_reviews,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// 상담사 등록 요청
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCounselorRequest {
    #[validate(length(min = 1, max = 200, message = "이름은 1~200자여야 합니다"))]
    pub name: String,

    #[validate(email(message = "이메일 형식이 올바르지 않습니다"))]
    pub email: String,

    #[validate(custom(function = "crate::utils::validation::validate_phone"))]
    pub phone: Option<String>,

    pub specialization: Option<String>,
    pub education: Option<String>,
    pub experience: Option<String>,
    pub certification: Option<String>,
    pub bio: Option<String>,

    #[validate(length(max = 500, message = "이미지 URL은 500자를 초과할 수 없습니다"))]
    pub profile_image: Option<String>,

    #[serde(default)]
    pub is_online: bool,

    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

/// 상담사 정보 수정 요청 (부분 수정)
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCounselorRequest {
    #[validate(length(min = 1, max = 200, message = "이름은 1~200자여야 합니다"))]
    pub name: Option<String>,

    #[validate(email(message = "이메일 형식이 올바르지 않습니다"))]
    pub email: Option<String>,

    #[validate(custom(function = "crate::utils::validation::validate_phone"))]
    pub phone: Option<String>,

    pub specialization: Option<String>,
    pub education: Option<String>,
    pub experience: Option<String>,
    pub certification: Option<String>,
    pub bio: Option<String>,

    #[validate(length(max = 500, message = "이미지 URL은 500자를 초과할 수 없습니다"))]
    pub profile_image: Option<String>,

    pub is_online: Option<bool>,
    pub is_active: Option<bool>,
}

/// 상담사 목록 필터
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CounselorFilter {
    pub is_online: Option<bool>,
    pub is_active: Option<bool>,
}
