//! 体检记录

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::middlewares::RequireJWT;
use crate::models::health::{
    CreateHealthRecordRequest, HealthRecordListParams, HealthRecordListQuery,
    UpdateHealthRecordRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{error_response, in_scope, not_found_response, student_scope};
use crate::storage::Storage;
use crate::utils::today;

const NOT_FOUND: &str = "Health record not found";

pub struct HealthService {
    storage: Option<Arc<dyn Storage>>,
}

impl HealthService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_records(
        &self,
        params: HealthRecordListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let student_ids = match student_scope(&storage, request).await {
            Ok(scope) => scope,
            Err(e) => return Ok(error_response(&e)),
        };

        let query = HealthRecordListQuery {
            page: Some(params.pagination.page),
            size: Some(params.pagination.size),
            student_id: params.student_id,
            student_ids,
        };

        match storage.list_health_records(query).await {
            Ok(page) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                page,
                "Health record list retrieved successfully",
            ))),
            Err(e) => Ok(error_response(&e)),
        }
    }

    pub async fn create_record(
        &self,
        req: CreateHealthRecordRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let recorded_by = RequireJWT::extract_user_id(request);

        match storage.create_health_record(req, recorded_by, today()).await {
            Ok(record) => Ok(HttpResponse::Created().json(ApiResponse::success(
                record,
                "Health record created successfully",
            ))),
            Err(e) => Ok(error_response(&e)),
        }
    }

    pub async fn get_record(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let scope = match student_scope(&storage, request).await {
            Ok(scope) => scope,
            Err(e) => return Ok(error_response(&e)),
        };

        match storage.get_health_record_by_id(id).await {
            Ok(Some(record)) if in_scope(&scope, record.student_id) => Ok(HttpResponse::Ok()
                .json(ApiResponse::success(record, "Health record retrieved successfully"))),
            Ok(_) => Ok(not_found_response(ErrorCode::HealthRecordNotFound, NOT_FOUND)),
            Err(e) => Ok(error_response(&e)),
        }
    }

    pub async fn update_record(
        &self,
        id: i64,
        update: UpdateHealthRecordRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        match storage.update_health_record(id, update, today()).await {
            Ok(Some(record)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                record,
                "Health record updated successfully",
            ))),
            Ok(None) => Ok(not_found_response(ErrorCode::HealthRecordNotFound, NOT_FOUND)),
            Err(e) => Ok(error_response(&e)),
        }
    }

    pub async fn delete_record(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        match storage.delete_health_record(id).await {
            Ok(true) => Ok(HttpResponse::Ok()
                .json(ApiResponse::success_empty("Health record deleted successfully"))),
            Ok(false) => Ok(not_found_response(ErrorCode::HealthRecordNotFound, NOT_FOUND)),
            Err(e) => Ok(error_response(&e)),
        }
    }
}
