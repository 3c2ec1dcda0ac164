pub mod campaigns;
pub mod gateway;
pub mod send;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::models::sms::{CampaignListParams, CreateCampaignRequest, UpdateCampaignRequest};
use crate::storage::Storage;

pub use gateway::{LogSmsGateway, SmsGateway};

pub struct SmsService {
    storage: Option<Arc<dyn Storage>>,
    gateway: Arc<dyn SmsGateway>,
}

impl SmsService {
    pub fn new_lazy() -> Self {
        Self {
            storage: None,
            gateway: gateway::gateway_for(&AppConfig::get().sms.gateway),
        }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_campaigns(
        &self,
        params: CampaignListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        campaigns::list_campaigns(self, params, request).await
    }

    pub async fn create_campaign(
        &self,
        req: CreateCampaignRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        campaigns::create_campaign(self, req, request).await
    }

    pub async fn get_campaign(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        campaigns::get_campaign(self, id, request).await
    }

    pub async fn update_campaign(
        &self,
        id: i64,
        update: UpdateCampaignRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        campaigns::update_campaign(self, id, update, request).await
    }

    pub async fn delete_campaign(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        campaigns::delete_campaign(self, id, request).await
    }

    pub async fn send_campaign(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        send::send_campaign(self, id, request).await
    }
}
