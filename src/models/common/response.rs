//! 统一响应外壳
//!
//! 所有接口都返回 `{code, message, data?, timestamp}`，`code` 为 [`ErrorCode`]，
//! 成功时为 0。前端根据 `code` 而不是 HTTP 状态码决定提示内容。

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::ErrorCode;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/api.ts")]
pub struct ApiResponse<T: TS> {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl<T: TS> ApiResponse<T> {
    fn build(code: ErrorCode, data: Option<T>, message: String) -> Self {
        Self {
            code: code as i32,
            message,
            data,
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self::build(ErrorCode::Success, Some(data), message.into())
    }
}

impl ApiResponse<()> {
    /// 删除、登出等没有返回体的操作
    pub fn success_empty(message: impl Into<String>) -> Self {
        Self::build(ErrorCode::Success, None, message.into())
    }

    pub fn error_empty(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::build(code, None, message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_response_omits_data() {
        let json = serde_json::to_value(ApiResponse::success_empty("Fee deleted successfully"))
            .unwrap();
        assert_eq!(json["code"], 0);
        assert_eq!(json["message"], "Fee deleted successfully");
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_error_carries_code() {
        let json = serde_json::to_value(ApiResponse::error_empty(
            ErrorCode::CampaignNotEditable,
            "Only draft campaigns can be changed",
        ))
        .unwrap();
        assert_eq!(json["code"], ErrorCode::CampaignNotEditable as i32);
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_success_wraps_data() {
        let json = serde_json::to_value(ApiResponse::success(vec![1, 2], "ok")).unwrap();
        assert_eq!(json["data"], serde_json::json!([1, 2]));
    }
}
