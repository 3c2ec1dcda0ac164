use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashSet;
use tracing::{info, warn};

use super::SmsService;
use super::gateway::SmsGateway;
use crate::config::AppConfig;
use crate::errors::Result;
use crate::models::sms::{Audience, DeliveryOutcome, SmsCampaign};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{error_response, not_found_response};
use crate::storage::Storage;
use crate::utils::validate::{normalize_phone, validate_phone};

/// 规范化并去重，返回可发送号码和无效号码数
pub fn resolve_recipients(numbers: Vec<String>) -> (Vec<String>, i32) {
    let mut seen = HashSet::new();
    let mut valid = Vec::new();
    let mut invalid = 0;

    for raw in numbers {
        let phone = normalize_phone(&raw);
        if phone.is_empty() || !seen.insert(phone.clone()) {
            continue;
        }
        if validate_phone(&phone).is_ok() {
            valid.push(phone);
        } else {
            invalid += 1;
        }
    }

    (valid, invalid)
}

async fn audience_numbers(storage: &dyn Storage, campaign: &SmsCampaign) -> Result<Vec<String>> {
    match campaign.audience {
        Audience::AllStudents => storage.list_guardian_phones(None).await,
        Audience::Class => storage.list_guardian_phones(campaign.class_id).await,
        Audience::Custom => Ok(campaign.custom_numbers.clone()),
    }
}

/// 逐条投递，网关返回错误的号码计为失败
pub async fn deliver(
    gateway: &dyn SmsGateway,
    sender_id: &str,
    message: &str,
    numbers: Vec<String>,
) -> DeliveryOutcome {
    let (recipients, invalid) = resolve_recipients(numbers);
    let mut outcome = DeliveryOutcome {
        recipients: recipients.len() as i32 + invalid,
        sent: 0,
        failed: invalid,
    };

    for phone in &recipients {
        match gateway.send(sender_id, phone, message).await {
            Ok(()) => outcome.sent += 1,
            Err(e) => {
                warn!("SMS delivery to {} failed: {}", phone, e);
                outcome.failed += 1;
            }
        }
    }

    outcome
}

pub async fn send_campaign(
    service: &SmsService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let campaign = match storage.get_campaign_by_id(id).await {
        Ok(Some(campaign)) => campaign,
        Ok(None) => return Ok(not_found_response(ErrorCode::CampaignNotFound, "Campaign not found")),
        Err(e) => return Ok(error_response(&e)),
    };

    // 条件更新，并发发送时只有一个请求能拿到草稿
    match storage.mark_campaign_sending(id).await {
        Ok(true) => {}
        Ok(false) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::CampaignNotEditable,
                "Only draft campaigns can be sent",
            )));
        }
        Err(e) => return Ok(error_response(&e)),
    }

    let numbers = match audience_numbers(storage.as_ref(), &campaign).await {
        Ok(numbers) => numbers,
        Err(e) => {
            // 号码都没取到，按全部失败收尾，避免卡在 sending
            if let Err(finish_err) = storage.finish_campaign(id, DeliveryOutcome::default()).await {
                warn!("Failed to close campaign {}: {}", id, finish_err);
            }
            return Ok(error_response(&e));
        }
    };

    let sender_id = &AppConfig::get().sms.sender_id;
    let outcome = deliver(service.gateway.as_ref(), sender_id, &campaign.message, numbers).await;
    info!(
        "Campaign {} delivered via {}: {} recipients, {} sent, {} failed",
        id,
        service.gateway.name(),
        outcome.recipients,
        outcome.sent,
        outcome.failed
    );

    match storage.finish_campaign(id, outcome).await {
        Ok(Some(campaign)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            campaign,
            "Campaign sent",
        ))),
        Ok(None) => Ok(not_found_response(ErrorCode::CampaignNotFound, "Campaign not found")),
        Err(e) => Ok(error_response(&e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErpError;
    use async_trait::async_trait;

    struct RejectPrefix(&'static str);

    #[async_trait]
    impl SmsGateway for RejectPrefix {
        async fn send(&self, _sender_id: &str, phone: &str, _message: &str) -> Result<()> {
            if phone.starts_with(self.0) {
                return Err(ErpError::gateway("rejected"));
            }
            Ok(())
        }

        fn name(&self) -> &'static str {
            "reject"
        }
    }

    fn numbers(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_resolve_recipients_dedupes_after_normalizing() {
        let (valid, invalid) = resolve_recipients(numbers(&[
            "98450 12345",
            "9845012345",
            "984-501-2345",
            "12",
            "",
            "9900112233",
        ]));
        assert_eq!(valid, vec!["9845012345".to_string(), "9900112233".to_string()]);
        assert_eq!(invalid, 1);
    }

    #[tokio::test]
    async fn test_deliver_counts_invalid_and_rejected() {
        let outcome = deliver(
            &RejectPrefix("99"),
            "SCHOOL",
            "Fee reminder",
            numbers(&["9845012345", "9900112233", "abc"]),
        )
        .await;
        assert_eq!(
            outcome,
            DeliveryOutcome {
                recipients: 3,
                sent: 1,
                failed: 2,
            }
        );
    }

    #[tokio::test]
    async fn test_deliver_with_no_numbers() {
        let outcome = deliver(&RejectPrefix("0"), "SCHOOL", "hi", Vec::new()).await;
        assert_eq!(outcome, DeliveryOutcome::default());
    }
}
