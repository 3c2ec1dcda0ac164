use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::FeeService;
use crate::models::fees::requests::{CreateFeeStructureRequest, UpdateFeeStructureRequest};
use crate::models::school::SchoolListParams;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{error_response, not_found_response, validation_response};

const NOT_FOUND: &str = "Fee structure not found";

pub async fn list_structures(
    service: &FeeService,
    params: SchoolListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    match storage.list_fee_structures(params).await {
        Ok(page) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            page,
            "Fee structure list retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn create_structure(
    service: &FeeService,
    req: CreateFeeStructureRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = req.validate() {
        return Ok(validation_response(msg));
    }

    let storage = service.get_storage(request)?;
    match storage.create_fee_structure(req).await {
        Ok(structure) => Ok(HttpResponse::Created().json(ApiResponse::success(
            structure,
            "Fee structure created successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn get_structure(
    service: &FeeService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    match storage.get_fee_structure_by_id(id).await {
        Ok(Some(structure)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            structure,
            "Fee structure retrieved successfully",
        ))),
        Ok(None) => Ok(not_found_response(ErrorCode::FeeStructureNotFound, NOT_FOUND)),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn update_structure(
    service: &FeeService,
    id: i64,
    update: UpdateFeeStructureRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    match storage.update_fee_structure(id, update).await {
        Ok(Some(structure)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            structure,
            "Fee structure updated successfully",
        ))),
        Ok(None) => Ok(not_found_response(ErrorCode::FeeStructureNotFound, NOT_FOUND)),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn delete_structure(
    service: &FeeService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    match storage.delete_fee_structure(id).await {
        Ok(true) => Ok(HttpResponse::Ok()
            .json(ApiResponse::success_empty("Fee structure deleted successfully"))),
        Ok(false) => Ok(not_found_response(ErrorCode::FeeStructureNotFound, NOT_FOUND)),
        Err(e) => Ok(error_response(&e)),
    }
}
