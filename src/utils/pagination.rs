use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::error::AppError;

pub const DEFAULT_LIMIT: u64 = 10;
pub const MAX_LIMIT: u64 = 100;

fn default_limit() -> u64 {
    DEFAULT_LIMIT
}

/// 오프셋 기반 페이지 파라미터
#[derive(Debug, Clone, Copy, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// 건너뛸 항목 수
    #[serde(default)]
    pub skip: u64,
    /// 페이지 크기 (1~100)
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100, message = "limit은 1~100 사이여야 합니다"))]
    pub limit: u64,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageQuery {
    /// 검증된 페이지 파라미터 반환
    pub fn checked(self) -> Result<Self, AppError> {
        self.validate()?;
        Ok(self)
    }

    /// 표시용 페이지 번호 (1부터 시작)
    ///
    /// skip이 limit의 배수가 아니면 근사값이므로 정합성 판단에 쓰지 않습니다.
    pub fn page(&self) -> u64 {
        self.skip / self.limit.max(1) + 1
    }
}

/// 페이지 응답
#[derive(Debug, Serialize, ToSchema)]
#[aliases(
    UserPage = PageResponse<crate::domain::user::dto::UserResponse>,
    CounselorPage = PageResponse<crate::domain::counselor::dto::CounselorResponse>,
    ConsultationPage = PageResponse<crate::domain::consultation::dto::ConsultationResponse>,
    PublicConsultationPage = PageResponse<crate::domain::consultation::dto::PublicConsultationItem>,
    ReviewPage = PageResponse<crate::domain::review::dto::ReviewResponse>,
    NoticePage = PageResponse<crate::domain::notice::dto::NoticeResponse>,
    BoardPage = PageResponse<crate::domain::board::dto::BoardListItem>,
    ChecklistMasterPage = PageResponse<crate::domain::checklist::dto::ChecklistMasterResponse>
)]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub size: u64,
}

impl<T> PageResponse<T> {
    pub fn new(items: Vec<T>, total: u64, query: &PageQuery) -> Self {
        Self {
            items,
            total,
            page: query.page(),
            size: query.limit,
        }
    }

    /// 항목 타입 변환
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageResponse<U> {
        PageResponse {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            size: self.size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_should_start_at_one() {
        let query = PageQuery { skip: 0, limit: 10 };
        assert_eq!(query.page(), 1);
    }

    #[test]
    fn page_should_follow_skip_over_limit() {
        assert_eq!(PageQuery { skip: 10, limit: 10 }.page(), 2);
        assert_eq!(PageQuery { skip: 25, limit: 10 }.page(), 3);
    }

    #[test]
    fn limit_zero_should_fail_validation() {
        let result = PageQuery { skip: 0, limit: 0 }.checked();
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[test]
    fn limit_over_max_should_fail_validation() {
        let result = PageQuery {
            skip: 0,
            limit: MAX_LIMIT + 1,
        }
        .checked();
        assert!(result.is_err());
    }

    #[test]
    fn default_should_be_first_page_of_ten() {
        let query: PageQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.skip, 0);
        assert_eq!(query.limit, DEFAULT_LIMIT);
    }

    #[test]
    fn map_should_keep_page_metadata() {
        let query = PageQuery { skip: 10, limit: 5 };
        let page = PageResponse::new(vec![1, 2, 3], 13, &query).map(|n| n * 2);

        assert_eq!(page.items, vec![2, 4, 6]);
        assert_eq!(page.total, 13);
        assert_eq!(page.page, 3);
        assert_eq!(page.size, 5);
    }
}
