use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::entity::checklist_item::{self, ItemType};
use super::entity::{checklist_master, user_checklist_response};
use crate::utils::error::AppError;

fn default_version() -> String {
    "1.0".to_string()
}

fn default_true() -> bool {
    true
}

// ============== 체크리스트 ==============

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateChecklistMasterRequest {
    #[validate(length(min = 1, max = 200, message = "이름은 1~200자여야 합니다"))]
    pub name: String,

    pub description: Option<String>,

    #[validate(length(max = 50, message = "카테고리는 50자를 초과할 수 없습니다"))]
    pub category: Option<String>,

    #[serde(default = "default_version")]
    #[validate(length(min = 1, max = 20, message = "버전은 1~20자여야 합니다"))]
    pub version: String,

    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateChecklistMasterRequest {
    #[validate(length(min = 1, max = 200, message = "이름은 1~200자여야 합니다"))]
    pub name: Option<String>,

    pub description: Option<String>,

    #[validate(length(max = 50, message = "카테고리는 50자를 초과할 수 없습니다"))]
    pub category: Option<String>,

    #[validate(length(min = 1, max = 20, message = "버전은 1~20자여야 합니다"))]
    pub version: Option<String>,

    pub is_active: Option<bool>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ChecklistMasterFilter {
    pub category: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ChecklistMasterResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub version: String,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<checklist_master::Model> for ChecklistMasterResponse {
    fn from(model: checklist_master::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            category: model.category,
            version: model.version,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// 체크리스트 상세 (문항 포함)
#[derive(Debug, Serialize, ToSchema)]
pub struct ChecklistDetailResponse {
    pub master: ChecklistMasterResponse,
    pub items: Vec<ChecklistItemResponse>,
}

// ============== 문항 ==============

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateChecklistItemRequest {
    #[validate(length(min = 1, max = 1000, message = "문항은 1~1000자여야 합니다"))]
    pub question: String,

    pub item_type: ItemType,

    /// radio 유형은 선택지 배열이 필요합니다.
    #[schema(value_type = Option<Object>)]
    pub options: Option<Value>,

    /// 표시용 필수 여부 (제출 시 강제하지 않음)
    #[serde(default = "default_true")]
    pub required: bool,

    #[serde(default)]
    #[validate(range(min = 0, message = "순서는 0 이상이어야 합니다"))]
    pub order_index: i32,
}

impl CreateChecklistItemRequest {
    pub fn check_options(&self) -> Result<(), AppError> {
        check_item_options(self.item_type, self.options.as_ref())
    }
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateChecklistItemRequest {
    #[validate(length(min = 1, max = 1000, message = "문항은 1~1000자여야 합니다"))]
    pub question: Option<String>,

    pub item_type: Option<ItemType>,

    #[schema(value_type = Option<Object>)]
    pub options: Option<Value>,

    pub required: Option<bool>,

    #[validate(range(min = 0, message = "순서는 0 이상이어야 합니다"))]
    pub order_index: Option<i32>,
}

/// radio 문항은 비어 있지 않은 선택지 배열을 가져야 합니다.
pub fn check_item_options(item_type: ItemType, options: Option<&Value>) -> Result<(), AppError> {
    if item_type != ItemType::Radio {
        return Ok(());
    }
    match options {
        Some(Value::Array(choices)) if !choices.is_empty() => Ok(()),
        _ => Err(AppError::bad_request(
            "radio 문항에는 선택지 배열이 필요합니다.",
        )),
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ChecklistItemResponse {
    pub id: i64,
    pub master_id: i64,
    pub question: String,
    pub item_type: ItemType,
    #[schema(value_type = Option<Object>)]
    pub options: Option<Value>,
    pub required: bool,
    pub order_index: i32,
    pub created_at: NaiveDateTime,
}

impl From<checklist_item::Model> for ChecklistItemResponse {
    fn from(model: checklist_item::Model) -> Self {
        Self {
            id: model.id,
            master_id: model.master_id,
            question: model.question,
            item_type: model.item_type,
            options: model.options,
            required: model.required,
            order_index: model.order_index,
            created_at: model.created_at,
        }
    }
}

// ============== 응답 ==============

#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
pub struct ChecklistAnswer {
    pub item_id: i64,

    #[validate(length(max = 2000, message = "응답은 2000자를 초과할 수 없습니다"))]
    pub response_value: Option<String>,

    #[schema(value_type = Option<Object>)]
    pub response_data: Option<Value>,
}

impl ChecklistAnswer {
    /// 값이나 데이터 중 하나라도 채워졌는지
    pub fn is_answered(&self) -> bool {
        has_answer(self.response_value.as_deref(), self.response_data.as_ref())
    }
}

pub fn has_answer(value: Option<&str>, data: Option<&Value>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty()) || data.is_some_and(|d| !d.is_null())
}

/// 상담 신청 한 건에 대한 체크리스트 응답 제출 (기존 응답을 대체)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SubmitChecklistRequest {
    pub consultation_id: i64,

    #[validate(length(min = 1, max = 200, message = "응답은 1~200개여야 합니다"), nested)]
    pub answers: Vec<ChecklistAnswer>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ChecklistResponseFilter {
    pub consultation_id: Option<i64>,
    pub master_id: Option<i64>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ChecklistSummaryQuery {
    pub consultation_id: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ChecklistResponseItem {
    pub id: i64,
    pub user_id: i64,
    pub consultation_id: i64,
    pub master_id: i64,
    pub item_id: i64,
    pub response_value: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub response_data: Option<Value>,
    pub completed_at: NaiveDateTime,
}

impl From<user_checklist_response::Model> for ChecklistResponseItem {
    fn from(model: user_checklist_response::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            consultation_id: model.consultation_id,
            master_id: model.master_id,
            item_id: model.item_id,
            response_value: model.response_value,
            response_data: model.response_data,
            completed_at: model.completed_at,
        }
    }
}

/// 체크리스트 작성 현황
#[derive(Debug, PartialEq, Serialize, ToSchema)]
pub struct ChecklistSummary {
    pub master_id: i64,
    pub consultation_id: i64,
    pub total_items: u64,
    pub completed_items: u64,
    /// 백분율, 소수 첫째 자리
    #[schema(example = 75.0)]
    pub completion_rate: f64,
}

impl ChecklistSummary {
    pub fn new(master_id: i64, consultation_id: i64, total_items: u64, completed_items: u64) -> Self {
        Self {
            master_id,
            consultation_id,
            total_items,
            completed_items,
            completion_rate: completion_rate(total_items, completed_items),
        }
    }
}

pub fn completion_rate(total_items: u64, completed_items: u64) -> f64 {
    if total_items == 0 {
        return 0.0;
    }
    let completed = completed_items.min(total_items) as f64;
    (completed / total_items as f64 * 1000.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn completion_rate_should_be_zero_without_items() {
        assert_eq!(completion_rate(0, 0), 0.0);
    }

    #[test]
    fn completion_rate_should_round_to_one_decimal() {
        assert_eq!(completion_rate(4, 3), 75.0);
        assert_eq!(completion_rate(3, 1), 33.3);
        assert_eq!(completion_rate(3, 3), 100.0);
    }

    #[test]
    fn completion_rate_should_cap_at_hundred() {
        assert_eq!(completion_rate(2, 5), 100.0);
    }

    #[test]
    fn radio_item_should_require_options() {
        assert!(check_item_options(ItemType::Radio, None).is_err());
        assert!(check_item_options(ItemType::Radio, Some(&json!([]))).is_err());
        assert!(check_item_options(ItemType::Radio, Some(&json!(["예", "아니오"]))).is_ok());
        assert!(check_item_options(ItemType::Text, None).is_ok());
    }

    #[test]
    fn blank_answer_should_not_count_as_answered() {
        let blank = ChecklistAnswer {
            item_id: 1,
            response_value: Some("  ".into()),
            response_data: None,
        };
        assert!(!blank.is_answered());

        let scaled = ChecklistAnswer {
            item_id: 1,
            response_value: None,
            response_data: Some(json!({ "score": 7 })),
        };
        assert!(scaled.is_answered());
    }

    #[test]
    fn empty_submission_should_fail_validation() {
        let req = SubmitChecklistRequest {
            consultation_id: 1,
            answers: vec![],
        };
        assert!(req.validate().is_err());
    }
}
