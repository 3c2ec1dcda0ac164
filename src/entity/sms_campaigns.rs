//! 短信群发实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "sms_campaigns")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub message: String,
    pub audience: String,
    pub class_id: Option<i64>,
    /// JSON 字符串数组
    #[sea_orm(column_type = "Text")]
    pub custom_numbers: String,
    pub status: String,
    pub segments: i32,
    pub recipient_count: i32,
    pub sent_count: i32,
    pub failed_count: i32,
    pub created_by: Option<i64>,
    pub sent_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_campaign(self) -> crate::models::sms::SmsCampaign {
        use crate::models::sms::{Audience, CampaignStatus, SmsCampaign};
        use crate::utils::dates::from_timestamp;

        SmsCampaign {
            id: self.id,
            title: self.title,
            message: self.message,
            audience: self
                .audience
                .parse::<Audience>()
                .unwrap_or(Audience::Custom),
            class_id: self.class_id,
            custom_numbers: serde_json::from_str(&self.custom_numbers).unwrap_or_default(),
            status: self
                .status
                .parse::<CampaignStatus>()
                .unwrap_or(CampaignStatus::Draft),
            segments: self.segments,
            recipient_count: self.recipient_count,
            sent_count: self.sent_count,
            failed_count: self.failed_count,
            created_by: self.created_by,
            sent_at: self.sent_at.map(from_timestamp),
            created_at: from_timestamp(self.created_at),
            updated_at: from_timestamp(self.updated_at),
        }
    }
}
