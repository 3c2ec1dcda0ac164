//! 短信群发存储操作

use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    sea_query::Expr,
};

use super::{SeaOrmStorage, db_err, fetch_page, now_ts};
use crate::entity::sms_campaigns::{ActiveModel, Column, Entity as SmsCampaigns};
use crate::errors::{ErpError, Result};
use crate::models::{
    PaginatedResponse,
    sms::{
        CampaignListParams, CampaignStatus, CreateCampaignRequest, DeliveryOutcome, SmsCampaign,
        UpdateCampaignRequest, final_status, segment_count, validate_audience, validate_message,
    },
};
use crate::utils::escape_like_pattern;
use crate::utils::validate::normalize_phone;

fn encode_numbers(numbers: &[String]) -> Result<String> {
    let normalized: Vec<String> = numbers.iter().map(|n| normalize_phone(n)).collect();
    serde_json::to_string(&normalized)
        .map_err(|e| ErpError::serialization(format!("Failed to encode numbers: {e}")))
}

impl SeaOrmStorage {
    pub async fn create_campaign_impl(
        &self,
        req: CreateCampaignRequest,
        created_by: Option<i64>,
    ) -> Result<SmsCampaign> {
        validate_audience(req.audience, req.class_id, &req.custom_numbers)
            .map_err(ErpError::validation)?;

        let now = now_ts();
        let model = ActiveModel {
            title: Set(req.title.trim().to_string()),
            segments: Set(segment_count(&req.message)),
            message: Set(req.message),
            audience: Set(req.audience.to_string()),
            class_id: Set(req.class_id),
            custom_numbers: Set(encode_numbers(&req.custom_numbers)?),
            status: Set(CampaignStatus::Draft.to_string()),
            recipient_count: Set(0),
            sent_count: Set(0),
            failed_count: Set(0),
            created_by: Set(created_by),
            sent_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_err("Failed to create campaign"))?;

        Ok(result.into_campaign())
    }

    pub async fn get_campaign_by_id_impl(&self, id: i64) -> Result<Option<SmsCampaign>> {
        let result = SmsCampaigns::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err("Failed to query campaign"))?;

        Ok(result.map(|m| m.into_campaign()))
    }

    pub async fn list_campaigns_impl(
        &self,
        params: CampaignListParams,
    ) -> Result<PaginatedResponse<SmsCampaign>> {
        let mut select = SmsCampaigns::find();

        if let Some(status) = params.status {
            select = select.filter(Column::Status.eq(status.as_str()));
        }
        if let Some(ref search) = params.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(Column::Title.contains(&escaped));
        }

        select = select.order_by_desc(Column::CreatedAt).order_by_desc(Column::Id);

        fetch_page(
            &self.db,
            select,
            params.pagination.bounds(),
            "Failed to list campaigns",
            |m| m.into_campaign(),
        )
        .await
    }

    /// 修改草稿，非草稿返回校验错误
    pub async fn update_campaign_impl(
        &self,
        id: i64,
        update: UpdateCampaignRequest,
        max_message_length: usize,
    ) -> Result<Option<SmsCampaign>> {
        let Some(existing) = self.get_campaign_by_id_impl(id).await? else {
            return Ok(None);
        };
        if !existing.is_editable() {
            return Err(ErpError::validation(format!(
                "Campaign is {} and can no longer be edited",
                existing.status
            )));
        }

        let audience = update.audience.unwrap_or(existing.audience);
        let class_id = update.class_id.or(existing.class_id);
        let numbers = update.custom_numbers.unwrap_or(existing.custom_numbers);
        validate_audience(audience, class_id, &numbers).map_err(ErpError::validation)?;

        let mut model = ActiveModel {
            id: Set(id),
            audience: Set(audience.to_string()),
            class_id: Set(class_id),
            custom_numbers: Set(encode_numbers(&numbers)?),
            updated_at: Set(now_ts()),
            ..Default::default()
        };
        if let Some(title) = update.title {
            model.title = Set(title.trim().to_string());
        }
        if let Some(message) = update.message {
            validate_message(&message, max_message_length).map_err(ErpError::validation)?;
            model.segments = Set(segment_count(&message));
            model.message = Set(message);
        }

        model
            .update(&self.db)
            .await
            .map_err(db_err("Failed to update campaign"))?;

        self.get_campaign_by_id_impl(id).await
    }

    pub async fn delete_campaign_impl(&self, id: i64) -> Result<bool> {
        let Some(existing) = self.get_campaign_by_id_impl(id).await? else {
            return Ok(false);
        };
        if !existing.is_editable() {
            return Err(ErpError::validation(format!(
                "Campaign is {} and cannot be deleted",
                existing.status
            )));
        }

        let result = SmsCampaigns::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err("Failed to delete campaign"))?;

        Ok(result.rows_affected > 0)
    }

    /// 草稿 -> 发送中，条件更新保证同一群发只发送一次
    pub async fn mark_campaign_sending_impl(&self, id: i64) -> Result<bool> {
        let result = SmsCampaigns::update_many()
            .col_expr(Column::Status, Expr::value(CampaignStatus::Sending.as_str()))
            .col_expr(Column::UpdatedAt, Expr::value(now_ts()))
            .filter(Column::Id.eq(id))
            .filter(Column::Status.eq(CampaignStatus::Draft.as_str()))
            .exec(&self.db)
            .await
            .map_err(db_err("Failed to mark campaign as sending"))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn finish_campaign_impl(
        &self,
        id: i64,
        outcome: DeliveryOutcome,
    ) -> Result<Option<SmsCampaign>> {
        if self.get_campaign_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let now = now_ts();
        ActiveModel {
            id: Set(id),
            status: Set(final_status(outcome.sent, outcome.failed).to_string()),
            recipient_count: Set(outcome.recipients),
            sent_count: Set(outcome.sent),
            failed_count: Set(outcome.failed),
            sent_at: Set(Some(now)),
            updated_at: Set(now),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(db_err("Failed to finish campaign"))?;

        self.get_campaign_by_id_impl(id).await
    }
}
