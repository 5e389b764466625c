use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::entity::review;

pub const ANONYMOUS_NAME: &str = "익명";
const NAME_MASK: &str = "**";

/// 표시용 이름 마스킹 ("홍길동" -> "홍**")
pub fn mask_name(name: &str) -> String {
    match name.trim().chars().next() {
        Some(first) => format!("{first}{NAME_MASK}"),
        None => ANONYMOUS_NAME.to_string(),
    }
}

/// 후기 작성자 표시명
///
/// 익명 후기는 "익명", 그 외에는 마스킹된 이름을 사용합니다. 저장값은 바꾸지 않습니다.
pub fn display_author(is_anonymous: bool, author_name: Option<&str>) -> String {
    match (is_anonymous, author_name) {
        (false, Some(name)) => mask_name(name),
        _ => ANONYMOUS_NAME.to_string(),
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReviewRequest {
    pub counselor_id: i64,
    pub consultation_id: Option<i64>,

    #[validate(range(min = 1, max = 5, message = "별점은 1~5 사이여야 합니다"))]
    #[schema(minimum = 1, maximum = 5)]
    pub rating: i32,

    #[validate(length(min = 1, max = 200, message = "제목은 1~200자여야 합니다"))]
    pub title: String,

    #[validate(length(min = 1, max = 5000, message = "내용은 1~5000자여야 합니다"))]
    pub content: String,

    #[serde(default)]
    pub is_anonymous: bool,

    #[validate(length(max = 500, message = "이미지 URL은 500자를 초과할 수 없습니다"))]
    pub image_url: Option<String>,
}

/// 후기 수정 요청 (부분 수정, `is_approved`는 관리자 전용)
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateReviewRequest {
    #[validate(range(min = 1, max = 5, message = "별점은 1~5 사이여야 합니다"))]
    pub rating: Option<i32>,

    #[validate(length(min = 1, max = 200, message = "제목은 1~200자여야 합니다"))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 5000, message = "내용은 1~5000자여야 합니다"))]
    pub content: Option<String>,

    pub is_anonymous: Option<bool>,
    pub is_approved: Option<bool>,
    pub is_active: Option<bool>,

    #[validate(length(max = 500, message = "이미지 URL은 500자를 초과할 수 없습니다"))]
    pub image_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReviewFilter {
    pub counselor_id: Option<i64>,
    pub is_approved: Option<bool>,
    pub is_active: Option<bool>,
}

/// 공개 후기 목록 필터
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ApprovedReviewFilter {
    pub counselor_id: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewResponse {
    pub id: i64,
    /// 익명 후기는 노출하지 않음
    pub user_id: Option<i64>,
    pub counselor_id: i64,
    pub consultation_id: Option<i64>,
    pub rating: i32,
    pub title: String,
    pub content: String,
    pub is_anonymous: bool,
    pub is_approved: bool,
    pub is_active: bool,
    pub image_url: Option<String>,
    #[schema(example = "홍**")]
    pub author_name: String,
    pub counselor_name: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl ReviewResponse {
    pub fn new(
        model: review::Model,
        author_name: Option<&str>,
        counselor_name: Option<String>,
    ) -> Self {
        Self {
            id: model.id,
            user_id: (!model.is_anonymous).then_some(model.user_id),
            counselor_id: model.counselor_id,
            consultation_id: model.consultation_id,
            rating: model.rating,
            title: model.title,
            content: model.content,
            author_name: display_author(model.is_anonymous, author_name),
            is_anonymous: model.is_anonymous,
            is_approved: model.is_approved,
            is_active: model.is_active,
            image_url: model.image_url,
            counselor_name,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewLikeResponse {
    pub review_id: i64,
    pub is_liked: bool,
    pub total_likes: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_name_should_keep_first_character() {
        assert_eq!(mask_name("홍길동"), "홍**");
        assert_eq!(mask_name("김철"), "김**");
        assert_eq!(mask_name("Alice"), "A**");
    }

    #[test]
    fn mask_name_should_mask_single_character_name() {
        assert_eq!(mask_name("A"), "A**");
    }

    #[test]
    fn blank_name_should_fall_back_to_anonymous() {
        assert_eq!(mask_name("   "), ANONYMOUS_NAME);
    }

    #[test]
    fn anonymous_review_should_hide_author() {
        assert_eq!(display_author(true, Some("홍길동")), ANONYMOUS_NAME);
        assert_eq!(display_author(false, Some("홍길동")), "홍**");
        assert_eq!(display_author(false, None), ANONYMOUS_NAME);
    }

    #[test]
    fn rating_out_of_range_should_fail_validation() {
        let base = serde_json::json!({
            "counselor_id": 1,
            "title": "좋았어요",
            "content": "감사합니다"
        });

        for rating in [0, 6, -1] {
            let mut body = base.clone();
            body["rating"] = rating.into();
            let req: CreateReviewRequest = serde_json::from_value(body).unwrap();
            assert!(req.validate().is_err(), "rating {rating} should be rejected");
        }

        for rating in 1..=5 {
            let mut body = base.clone();
            body["rating"] = rating.into();
            let req: CreateReviewRequest = serde_json::from_value(body).unwrap();
            assert!(req.validate().is_ok(), "rating {rating} should be accepted");
        }
    }
}
