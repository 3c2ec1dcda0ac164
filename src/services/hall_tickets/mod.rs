pub mod generate;
pub mod manage;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::hall_tickets::{
    BulkGenerateRequest, GenerateHallTicketRequest, HallTicketListParams, UpdateHallTicketRequest,
};
use crate::storage::Storage;

pub struct HallTicketService {
    storage: Option<Arc<dyn Storage>>,
}

impl HallTicketService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub async fn generate(
        &self,
        req: GenerateHallTicketRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        generate::generate_ticket(self, req, request).await
    }

    // 为班级内所有在读学生生成，已有准考证的跳过
    pub async fn bulk_generate(
        &self,
        req: BulkGenerateRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        generate::bulk_generate(self, req, request).await
    }

    pub async fn list_tickets(
        &self,
        params: HallTicketListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        manage::list_tickets(self, params, request).await
    }

    pub async fn get_ticket(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        manage::get_ticket(self, id, request).await
    }

    pub async fn update_ticket(
        &self,
        id: i64,
        update: UpdateHallTicketRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        manage::update_ticket(self, id, update, request).await
    }

    pub async fn delete_ticket(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        manage::delete_ticket(self, id, request).await
    }
}
