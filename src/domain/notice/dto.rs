use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::entity::notice::{self, NoticeStatus, NoticeType};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateNoticeRequest {
    #[validate(length(min = 1, max = 200, message = "제목은 1~200자여야 합니다"))]
    pub title: String,

    #[validate(length(min = 1, message = "내용을 입력해주세요"))]
    pub content: String,

    #[serde(default = "default_notice_type")]
    pub notice_type: NoticeType,

    #[serde(default = "default_notice_status")]
    pub status: NoticeStatus,

    #[serde(default)]
    pub is_pinned: bool,

    #[validate(length(max = 500, message = "첨부파일 URL은 500자를 초과할 수 없습니다"))]
    pub attachment_url: Option<String>,
}

fn default_notice_type() -> NoticeType {
    NoticeType::General
}

fn default_notice_status() -> NoticeStatus {
    NoticeStatus::Draft
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateNoticeRequest {
    #[validate(length(min = 1, max = 200, message = "제목은 1~200자여야 합니다"))]
    pub title: Option<String>,

    #[validate(length(min = 1, message = "내용을 입력해주세요"))]
    pub content: Option<String>,

    pub notice_type: Option<NoticeType>,
    pub status: Option<NoticeStatus>,
    pub is_pinned: Option<bool>,
    pub is_active: Option<bool>,

    #[validate(length(max = 500, message = "첨부파일 URL은 500자를 초과할 수 없습니다"))]
    pub attachment_url: Option<String>,
}

/// 공지사항 목록 필터
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NoticeFilter {
    pub notice_type: Option<NoticeType>,
    pub status: Option<NoticeStatus>,
    pub is_pinned: Option<bool>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PublishedNoticeFilter {
    pub notice_type: Option<NoticeType>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NoticeResponse {
    pub id: i64,
    pub author_id: Option<i64>,
    pub title: String,
    pub content: String,
    pub notice_type: NoticeType,
    pub status: NoticeStatus,
    pub is_pinned: bool,
    pub is_active: bool,
    pub attachment_url: Option<String>,
    pub view_count: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<notice::Model> for NoticeResponse {
    fn from(model: notice::Model) -> Self {
        Self {
            id: model.id,
            author_id: model.author_id,
            title: model.title,
            content: model.content,
            notice_type: model.notice_type,
            status: model.status,
            is_pinned: model.is_pinned,
            is_active: model.is_active,
            attachment_url: model.attachment_url,
            view_count: model.view_count,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl NoticeResponse {
    /// 일반 방문자에게 노출 가능한 공지인지
    pub fn is_visible(model: &notice::Model) -> bool {
        model.is_active && model.status == NoticeStatus::Published
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_should_default_to_general_draft() {
        let req: CreateNoticeRequest = serde_json::from_value(serde_json::json!({
            "title": "휴무 안내",
            "content": "추석 연휴 휴무입니다."
        }))
        .unwrap();

        assert_eq!(req.notice_type, NoticeType::General);
        assert_eq!(req.status, NoticeStatus::Draft);
        assert!(!req.is_pinned);
    }

    #[test]
    fn empty_title_should_fail_validation() {
        let req: CreateNoticeRequest = serde_json::from_value(serde_json::json!({
            "title": "",
            "content": "내용"
        }))
        .unwrap();
        assert!(req.validate().is_err());
    }
}
