use std::collections::HashSet;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::info;

use super::dto::{
    check_item_options, has_answer, ChecklistDetailResponse, ChecklistItemResponse,
    ChecklistMasterFilter, ChecklistMasterResponse, ChecklistResponseFilter,
    ChecklistResponseItem, ChecklistSummary, CreateChecklistItemRequest,
    CreateChecklistMasterRequest, SubmitChecklistRequest, UpdateChecklistItemRequest,
    UpdateChecklistMasterRequest,
};
use super::entity::{checklist_item, checklist_master, user_checklist_response};
use crate::domain::consultation::service::ConsultationService;
use crate::domain::user::entity::user;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::pagination::{PageQuery, PageResponse};

pub struct ChecklistService;

impl ChecklistService {
    pub async fn find_master(
        state: &AppState,
        master_id: i64,
    ) -> Result<checklist_master::Model, AppError> {
        checklist_master::Entity::find_by_id(master_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::not_found("체크리스트를 찾을 수 없습니다."))
    }

    pub async fn list_masters(
        state: &AppState,
        filter: ChecklistMasterFilter,
        page: PageQuery,
    ) -> Result<PageResponse<ChecklistMasterResponse>, AppError> {
        let mut query = checklist_master::Entity::find();
        if let Some(category) = filter.category {
            query = query.filter(checklist_master::Column::Category.eq(category));
        }
        if let Some(is_active) = filter.is_active {
            query = query.filter(checklist_master::Column::IsActive.eq(is_active));
        }

        let total = query.clone().count(&state.db).await?;
        let masters = query
            .order_by_asc(checklist_master::Column::Id)
            .offset(page.skip)
            .limit(page.limit)
            .all(&state.db)
            .await?;

        Ok(PageResponse::new(masters, total, &page).map(ChecklistMasterResponse::from))
    }

    /// 체크리스트와 문항 (순서대로)
    pub async fn get_master(
        state: &AppState,
        master_id: i64,
    ) -> Result<ChecklistDetailResponse, AppError> {
        let master = Self::find_master(state, master_id).await?;
        let items = Self::list_items(state, master.id).await?;
        Ok(ChecklistDetailResponse {
            master: master.into(),
            items,
        })
    }

    pub async fn create_master(
        state: &AppState,
        req: CreateChecklistMasterRequest,
    ) -> Result<ChecklistMasterResponse, AppError> {
        let now = Utc::now().naive_utc();
        let created = checklist_master::ActiveModel {
            name: Set(req.name),
            description: Set(req.description),
            category: Set(req.category),
            version: Set(req.version),
            is_active: Set(req.is_active),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&state.db)
        .await?;

        info!(master_id = created.id, "checklist created");
        Ok(created.into())
    }

    pub async fn update_master(
        state: &AppState,
        master_id: i64,
        req: UpdateChecklistMasterRequest,
    ) -> Result<ChecklistMasterResponse, AppError> {
        let existing = Self::find_master(state, master_id).await?;
        let mut active = existing.into_active_model();

        if let Some(name) = req.name {
            active.name = Set(name);
        }
        if let Some(description) = req.description {
            active.description = Set(Some(description));
        }
        if let Some(category) = req.category {
            active.category = Set(Some(category));
        }
        if let Some(version) = req.version {
            active.version = Set(version);
        }
        if let Some(is_active) = req.is_active {
            active.is_active = Set(is_active);
        }
        active.updated_at = Set(Utc::now().naive_utc());

        let updated = active.update(&state.db).await?;
        Ok(updated.into())
    }

    pub async fn delete_master(state: &AppState, master_id: i64) -> Result<(), AppError> {
        let result = checklist_master::Entity::delete_by_id(master_id)
            .exec(&state.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(AppError::not_found("체크리스트를 찾을 수 없습니다."));
        }
        info!(master_id, "checklist deleted");
        Ok(())
    }

    // ============== 문항 ==============

    pub async fn list_items(
        state: &AppState,
        master_id: i64,
    ) -> Result<Vec<ChecklistItemResponse>, AppError> {
        let items = checklist_item::Entity::find()
            .filter(checklist_item::Column::MasterId.eq(master_id))
            .order_by_asc(checklist_item::Column::OrderIndex)
            .order_by_asc(checklist_item::Column::Id)
            .all(&state.db)
            .await?;

        Ok(items.into_iter().map(ChecklistItemResponse::from).collect())
    }

    pub async fn create_item(
        state: &AppState,
        master_id: i64,
        req: CreateChecklistItemRequest,
    ) -> Result<ChecklistItemResponse, AppError> {
        let master = Self::find_master(state, master_id).await?;
        req.check_options()?;

        let created = checklist_item::ActiveModel {
            master_id: Set(master.id),
            question: Set(req.question),
            item_type: Set(req.item_type),
            options: Set(req.options),
            required: Set(req.required),
            order_index: Set(req.order_index),
            created_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        }
        .insert(&state.db)
        .await?;

        Ok(created.into())
    }

    async fn find_item(
        state: &AppState,
        master_id: i64,
        item_id: i64,
    ) -> Result<checklist_item::Model, AppError> {
        checklist_item::Entity::find_by_id(item_id)
            .filter(checklist_item::Column::MasterId.eq(master_id))
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::not_found("체크리스트 문항을 찾을 수 없습니다."))
    }

    pub async fn update_item(
        state: &AppState,
        master_id: i64,
        item_id: i64,
        req: UpdateChecklistItemRequest,
    ) -> Result<ChecklistItemResponse, AppError> {
        let existing = Self::find_item(state, master_id, item_id).await?;

        let item_type = req.item_type.unwrap_or(existing.item_type);
        let options = req.options.clone().or_else(|| existing.options.clone());
        check_item_options(item_type, options.as_ref())?;

        let mut active = existing.into_active_model();
        if let Some(question) = req.question {
            active.question = Set(question);
        }
        active.item_type = Set(item_type);
        active.options = Set(options);
        if let Some(required) = req.required {
            active.required = Set(required);
        }
        if let Some(order_index) = req.order_index {
            active.order_index = Set(order_index);
        }

        let updated = active.update(&state.db).await?;
        Ok(updated.into())
    }

    pub async fn delete_item(
        state: &AppState,
        master_id: i64,
        item_id: i64,
    ) -> Result<(), AppError> {
        let existing = Self::find_item(state, master_id, item_id).await?;
        checklist_item::Entity::delete_by_id(existing.id)
            .exec(&state.db)
            .await?;
        Ok(())
    }

    // ============== 응답 ==============

    /// 응답 제출
    ///
    /// 상담 신청자 본인만 제출할 수 있으며, 같은 상담/체크리스트의 이전 응답은 새 응답으로 대체됩니다.
    pub async fn submit_responses(
        state: &AppState,
        user: &user::Model,
        master_id: i64,
        req: SubmitChecklistRequest,
    ) -> Result<Vec<ChecklistResponseItem>, AppError> {
        let master = Self::find_master(state, master_id).await?;
        if !master.is_active {
            return Err(AppError::bad_request("비활성화된 체크리스트입니다."));
        }

        let consultation =
            ConsultationService::find_consultation(state, req.consultation_id).await?;
        if consultation.user_id != Some(user.id) {
            return Err(AppError::forbidden(
                "본인의 상담 신청에만 체크리스트를 제출할 수 있습니다.",
            ));
        }

        let item_ids: HashSet<i64> = checklist_item::Entity::find()
            .select_only()
            .column(checklist_item::Column::Id)
            .filter(checklist_item::Column::MasterId.eq(master.id))
            .into_tuple::<i64>()
            .all(&state.db)
            .await?
            .into_iter()
            .collect();

        let mut seen = HashSet::new();
        for answer in &req.answers {
            if !item_ids.contains(&answer.item_id) {
                return Err(AppError::bad_request(format!(
                    "체크리스트에 속하지 않은 문항입니다: {}",
                    answer.item_id
                )));
            }
            if !seen.insert(answer.item_id) {
                return Err(AppError::bad_request(format!(
                    "같은 문항에 대한 응답이 중복되었습니다: {}",
                    answer.item_id
                )));
            }
        }

        let txn = state.db.begin().await?;
        user_checklist_response::Entity::delete_many()
            .filter(user_checklist_response::Column::UserId.eq(user.id))
            .filter(user_checklist_response::Column::ConsultationId.eq(consultation.id))
            .filter(user_checklist_response::Column::MasterId.eq(master.id))
            .exec(&txn)
            .await?;

        let now = Utc::now().naive_utc();
        let mut saved = Vec::with_capacity(req.answers.len());
        for answer in req.answers {
            let model = user_checklist_response::ActiveModel {
                user_id: Set(user.id),
                consultation_id: Set(consultation.id),
                master_id: Set(master.id),
                item_id: Set(answer.item_id),
                response_value: Set(answer.response_value),
                response_data: Set(answer.response_data),
                completed_at: Set(now),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
            saved.push(ChecklistResponseItem::from(model));
        }
        txn.commit().await?;

        info!(
            master_id,
            consultation_id = consultation.id,
            user_id = user.id,
            answers = saved.len(),
            "checklist responses submitted"
        );
        Ok(saved)
    }

    /// 내 응답 목록
    pub async fn list_my_responses(
        state: &AppState,
        user: &user::Model,
        filter: ChecklistResponseFilter,
    ) -> Result<Vec<ChecklistResponseItem>, AppError> {
        let mut query = user_checklist_response::Entity::find()
            .filter(user_checklist_response::Column::UserId.eq(user.id));
        if let Some(consultation_id) = filter.consultation_id {
            query = query.filter(user_checklist_response::Column::ConsultationId.eq(consultation_id));
        }
        if let Some(master_id) = filter.master_id {
            query = query.filter(user_checklist_response::Column::MasterId.eq(master_id));
        }

        let responses = query
            .order_by_desc(user_checklist_response::Column::CompletedAt)
            .order_by_asc(user_checklist_response::Column::ItemId)
            .all(&state.db)
            .await?;

        Ok(responses.into_iter().map(ChecklistResponseItem::from).collect())
    }

    /// 작성 현황 (신청자 본인 또는 관리자/상담사)
    pub async fn summary(
        state: &AppState,
        user: &user::Model,
        master_id: i64,
        consultation_id: i64,
    ) -> Result<ChecklistSummary, AppError> {
        let master = Self::find_master(state, master_id).await?;
        let consultation = ConsultationService::find_consultation(state, consultation_id).await?;
        ConsultationService::ensure_can_view(user, &consultation)?;

        let total_items = checklist_item::Entity::find()
            .filter(checklist_item::Column::MasterId.eq(master.id))
            .count(&state.db)
            .await?;

        let responses = user_checklist_response::Entity::find()
            .filter(user_checklist_response::Column::MasterId.eq(master.id))
            .filter(user_checklist_response::Column::ConsultationId.eq(consultation.id))
            .all(&state.db)
            .await?;
        let completed_items = responses
            .iter()
            .filter(|r| has_answer(r.response_value.as_deref(), r.response_data.as_ref()))
            .map(|r| r.item_id)
            .collect::<HashSet<_>>()
            .len() as u64;

        Ok(ChecklistSummary::new(
            master.id,
            consultation.id,
            total_items,
            completed_items,
        ))
    }
}
