use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TransportService;
use crate::models::transport::{
    CreateTransportFeeRequest, TransportFeeListParams, TransportFeeListQuery,
    UpdateTransportFeeRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{error_response, in_scope, not_found_response, student_scope};
use crate::utils::today;

const NOT_FOUND: &str = "Transport fee not found";

pub async fn list_fees(
    service: &TransportService,
    params: TransportFeeListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let student_ids = match student_scope(&storage, request).await {
        Ok(scope) => scope,
        Err(e) => return Ok(error_response(&e)),
    };

    let query = TransportFeeListQuery {
        page: Some(params.pagination.page),
        size: Some(params.pagination.size),
        student_id: params.student_id,
        vehicle_id: params.vehicle_id,
        status: params.status,
        student_ids,
    };

    match storage.list_transport_fees(query, today()).await {
        Ok(page) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            page,
            "Transport fee list retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn create_fee(
    service: &TransportService,
    req: CreateTransportFeeRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    match storage.create_transport_fee(req, today()).await {
        Ok(fee) => Ok(HttpResponse::Created()
            .json(ApiResponse::success(fee, "Transport fee created successfully"))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn get_fee(
    service: &TransportService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let scope = match student_scope(&storage, request).await {
        Ok(scope) => scope,
        Err(e) => return Ok(error_response(&e)),
    };

    match storage.get_transport_fee_by_id(id, today()).await {
        Ok(Some(fee)) if in_scope(&scope, fee.student_id) => Ok(HttpResponse::Ok().json(
            ApiResponse::success(fee, "Transport fee retrieved successfully"),
        )),
        Ok(_) => Ok(not_found_response(ErrorCode::FeeNotFound, NOT_FOUND)),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn update_fee(
    service: &TransportService,
    id: i64,
    update: UpdateTransportFeeRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    match storage.update_transport_fee(id, update, today()).await {
        Ok(Some(fee)) => Ok(HttpResponse::Ok()
            .json(ApiResponse::success(fee, "Transport fee updated successfully"))),
        Ok(None) => Ok(not_found_response(ErrorCode::FeeNotFound, NOT_FOUND)),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn delete_fee(
    service: &TransportService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    match storage.delete_transport_fee(id).await {
        Ok(true) => Ok(HttpResponse::Ok()
            .json(ApiResponse::success_empty("Transport fee deleted successfully"))),
        Ok(false) => Ok(not_found_response(ErrorCode::FeeNotFound, NOT_FOUND)),
        Err(e) => Ok(error_response(&e)),
    }
}
