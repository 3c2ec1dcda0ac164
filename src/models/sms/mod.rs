//! 短信群发

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::common::PaginationQuery;
use crate::utils::validate::require_text;

/// 单条短信（GSM-7）最大字符数
pub const SINGLE_SEGMENT_CHARS: usize = 160;
/// 长短信每段字符数（扣除 UDH 头）
pub const MULTI_SEGMENT_CHARS: usize = 153;

crate::define_string_enum! {
    #[ts(export, export_to = "../frontend/src/types/generated/sms.ts")]
    pub enum Audience {
        AllStudents => "all_students",
        Class => "class",
        Custom => "custom",
    }
}

crate::define_string_enum! {
    #[ts(export, export_to = "../frontend/src/types/generated/sms.ts")]
    pub enum CampaignStatus {
        Draft => "draft",
        Sending => "sending",
        Completed => "completed",
        PartiallyFailed => "partially_failed",
        Failed => "failed",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/sms.ts")]
pub struct SmsCampaign {
    pub id: i64,
    pub title: String,
    pub message: String,
    pub audience: Audience,
    pub class_id: Option<i64>,
    pub custom_numbers: Vec<String>,
    pub status: CampaignStatus,
    pub segments: i32,
    pub recipient_count: i32,
    pub sent_count: i32,
    pub failed_count: i32,
    pub created_by: Option<i64>,
    pub sent_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl SmsCampaign {
    pub fn is_editable(&self) -> bool {
        self.status == CampaignStatus::Draft
    }
}

/// 短信分段数
pub fn segment_count(message: &str) -> i32 {
    let len = message.chars().count();
    if len == 0 {
        0
    } else if len <= SINGLE_SEGMENT_CHARS {
        1
    } else {
        len.div_ceil(MULTI_SEGMENT_CHARS) as i32
    }
}

/// 发送完成后的状态
pub fn final_status(sent: i32, failed: i32) -> CampaignStatus {
    match (sent, failed) {
        (0, _) => CampaignStatus::Failed,
        (_, 0) => CampaignStatus::Completed,
        _ => CampaignStatus::PartiallyFailed,
    }
}

/// 校验受众配置
pub fn validate_audience(
    audience: Audience,
    class_id: Option<i64>,
    custom_numbers: &[String],
) -> Result<(), String> {
    match audience {
        Audience::Class if class_id.is_none() => {
            Err("class_id is required for class audience".to_string())
        }
        Audience::Custom if custom_numbers.is_empty() => {
            Err("custom_numbers is required for custom audience".to_string())
        }
        _ => Ok(()),
    }
}

pub fn validate_message(message: &str, max_length: usize) -> Result<(), String> {
    require_text(message, "message", max_length)
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/sms.ts")]
pub struct CreateCampaignRequest {
    pub title: String,
    pub message: String,
    pub audience: Audience,
    pub class_id: Option<i64>,
    #[serde(default)]
    pub custom_numbers: Vec<String>,
}

impl CreateCampaignRequest {
    pub fn validate(&self, max_message_length: usize) -> Result<(), String> {
        require_text(&self.title, "title", 200)?;
        validate_message(&self.message, max_message_length)?;
        validate_audience(self.audience, self.class_id, &self.custom_numbers)
    }
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/sms.ts")]
pub struct UpdateCampaignRequest {
    pub title: Option<String>,
    pub message: Option<String>,
    pub audience: Option<Audience>,
    pub class_id: Option<i64>,
    pub custom_numbers: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/sms.ts")]
pub struct CampaignListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub status: Option<CampaignStatus>,
    pub search: Option<String>,
}

/// 发送结果，写回群发记录
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryOutcome {
    pub recipients: i32,
    pub sent: i32,
    pub failed: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_count() {
        assert_eq!(segment_count(""), 0);
        assert_eq!(segment_count(&"a".repeat(160)), 1);
        assert_eq!(segment_count(&"a".repeat(161)), 2);
        assert_eq!(segment_count(&"a".repeat(306)), 2);
        assert_eq!(segment_count(&"a".repeat(307)), 3);
    }

    #[test]
    fn test_final_status() {
        assert_eq!(final_status(10, 0), CampaignStatus::Completed);
        assert_eq!(final_status(8, 2), CampaignStatus::PartiallyFailed);
        assert_eq!(final_status(0, 5), CampaignStatus::Failed);
        assert_eq!(final_status(0, 0), CampaignStatus::Failed);
    }

    #[test]
    fn test_audience_requirements() {
        assert!(validate_audience(Audience::AllStudents, None, &[]).is_ok());
        assert!(validate_audience(Audience::Class, None, &[]).is_err());
        assert!(validate_audience(Audience::Class, Some(3), &[]).is_ok());
        assert!(validate_audience(Audience::Custom, None, &[]).is_err());
        assert!(validate_audience(Audience::Custom, None, &["9845012345".to_string()]).is_ok());
    }

    #[test]
    fn test_message_length_limit() {
        assert!(validate_message("Holiday tomorrow", 918).is_ok());
        assert!(validate_message(&"a".repeat(919), 918).is_err());
        assert!(validate_message("", 918).is_err());
    }
}
