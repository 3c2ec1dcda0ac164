use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::FeeService;
use crate::models::fees::entities::FeeSummary;
use crate::models::fees::requests::{
    CreateFeeRequest, FeeListParams, FeeListQuery, FeeSummaryParams, UpdateFeeRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{error_response, in_scope, not_found_response, student_scope};
use crate::utils::today;

const NOT_FOUND: &str = "Fee not found";

pub async fn list_fees(
    service: &FeeService,
    params: FeeListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let student_ids = match student_scope(&storage, request).await {
        Ok(scope) => scope,
        Err(e) => return Ok(error_response(&e)),
    };

    let query = FeeListQuery {
        page: Some(params.pagination.page),
        size: Some(params.pagination.size),
        student_id: params.student_id,
        status: params.status,
        student_ids,
    };

    match storage.list_fees(query, today()).await {
        Ok(page) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            page,
            "Fee list retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn create_fee(
    service: &FeeService,
    req: CreateFeeRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    match storage.create_fee(req, today()).await {
        Ok(fee) => Ok(HttpResponse::Created().json(ApiResponse::success(fee, "Fee created successfully"))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn get_fee(
    service: &FeeService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let scope = match student_scope(&storage, request).await {
        Ok(scope) => scope,
        Err(e) => return Ok(error_response(&e)),
    };

    match storage.get_fee_by_id(id, today()).await {
        Ok(Some(fee)) if in_scope(&scope, fee.student_id) => Ok(HttpResponse::Ok()
            .json(ApiResponse::success(fee, "Fee retrieved successfully"))),
        Ok(_) => Ok(not_found_response(ErrorCode::FeeNotFound, NOT_FOUND)),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn update_fee(
    service: &FeeService,
    id: i64,
    update: UpdateFeeRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    match storage.update_fee(id, update, today()).await {
        Ok(Some(fee)) => Ok(HttpResponse::Ok().json(ApiResponse::success(fee, "Fee updated successfully"))),
        Ok(None) => Ok(not_found_response(ErrorCode::FeeNotFound, NOT_FOUND)),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn delete_fee(
    service: &FeeService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    match storage.delete_fee(id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Fee deleted successfully"))),
        Ok(false) => Ok(not_found_response(ErrorCode::FeeNotFound, NOT_FOUND)),
        Err(e) => Ok(error_response(&e)),
    }
}

/// 金额合计与各状态数量，学生和家长只统计关联学生
pub async fn fee_summary(
    service: &FeeService,
    params: FeeSummaryParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let student_ids = match student_scope(&storage, request).await {
        Ok(scope) => scope,
        Err(e) => return Ok(error_response(&e)),
    };

    let query = FeeListQuery {
        student_id: params.student_id,
        student_ids,
        ..Default::default()
    };

    match storage.list_all_fees(query, today()).await {
        Ok(fees) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            FeeSummary::from_fees(&fees),
            "Fee summary retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}
