use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::SmsService;
use crate::config::AppConfig;
use crate::middlewares::RequireJWT;
use crate::models::sms::{CampaignListParams, CreateCampaignRequest, UpdateCampaignRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{error_response, not_found_response, validation_response};
use crate::storage::Storage;

const NOT_FOUND: &str = "Campaign not found";

fn not_editable_response() -> HttpResponse {
    HttpResponse::Conflict().json(ApiResponse::error_empty(
        ErrorCode::CampaignNotEditable,
        "Only draft campaigns can be changed",
    ))
}

/// 修改和删除前检查草稿状态，None 表示可以继续
async fn check_editable(storage: &Arc<dyn Storage>, id: i64) -> Option<HttpResponse> {
    match storage.get_campaign_by_id(id).await {
        Ok(Some(campaign)) if campaign.is_editable() => None,
        Ok(Some(_)) => Some(not_editable_response()),
        Ok(None) => Some(not_found_response(ErrorCode::CampaignNotFound, NOT_FOUND)),
        Err(e) => Some(error_response(&e)),
    }
}

pub async fn list_campaigns(
    service: &SmsService,
    params: CampaignListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    match storage.list_campaigns(params).await {
        Ok(page) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            page,
            "Campaign list retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn create_campaign(
    service: &SmsService,
    req: CreateCampaignRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = req.validate(AppConfig::get().sms.max_message_length) {
        return Ok(validation_response(msg));
    }

    let storage = service.get_storage(request)?;
    let created_by = RequireJWT::extract_user_id(request);

    match storage.create_campaign(req, created_by).await {
        Ok(campaign) => Ok(HttpResponse::Created().json(ApiResponse::success(
            campaign,
            "Campaign created successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn get_campaign(
    service: &SmsService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    match storage.get_campaign_by_id(id).await {
        Ok(Some(campaign)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            campaign,
            "Campaign retrieved successfully",
        ))),
        Ok(None) => Ok(not_found_response(ErrorCode::CampaignNotFound, NOT_FOUND)),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn update_campaign(
    service: &SmsService,
    id: i64,
    update: UpdateCampaignRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    if let Some(response) = check_editable(&storage, id).await {
        return Ok(response);
    }

    let max_length = AppConfig::get().sms.max_message_length;
    match storage.update_campaign(id, update, max_length).await {
        Ok(Some(campaign)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            campaign,
            "Campaign updated successfully",
        ))),
        Ok(None) => Ok(not_found_response(ErrorCode::CampaignNotFound, NOT_FOUND)),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn delete_campaign(
    service: &SmsService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    if let Some(response) = check_editable(&storage, id).await {
        return Ok(response);
    }

    match storage.delete_campaign(id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Campaign deleted successfully"))),
        Ok(false) => Ok(not_found_response(ErrorCode::CampaignNotFound, NOT_FOUND)),
        Err(e) => Ok(error_response(&e)),
    }
}
