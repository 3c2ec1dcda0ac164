use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SchoolService;
use crate::models::school::{CreateClassRequest, SchoolListParams, UpdateClassRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{error_response, not_found_response, validation_response};
use crate::utils::validate::require_text;

pub async fn list_classes(
    service: &SchoolService,
    params: SchoolListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    match storage.list_classes(params).await {
        Ok(page) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            page,
            "Class list retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn create_class(
    service: &SchoolService,
    req: CreateClassRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = req.validate() {
        return Ok(validation_response(msg));
    }

    let storage = service.get_storage(request)?;
    match storage.create_class(req).await {
        Ok(class) => Ok(HttpResponse::Created()
            .json(ApiResponse::success(class, "Class created successfully"))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn get_class(
    service: &SchoolService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    match storage.get_class_by_id(id).await {
        Ok(Some(class)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            class,
            "Class retrieved successfully",
        ))),
        Ok(None) => Ok(not_found_response(ErrorCode::ClassNotFound, "Class not found")),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn update_class(
    service: &SchoolService,
    id: i64,
    update: UpdateClassRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let checks = [
        update.name.as_deref().map(|v| require_text(v, "name", 50)),
        update.section.as_deref().map(|v| require_text(v, "section", 10)),
    ];
    if let Some(Err(msg)) = checks.into_iter().flatten().find(Result::is_err) {
        return Ok(validation_response(msg));
    }

    let storage = service.get_storage(request)?;
    match storage.update_class(id, update).await {
        Ok(Some(class)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            class,
            "Class updated successfully",
        ))),
        Ok(None) => Ok(not_found_response(ErrorCode::ClassNotFound, "Class not found")),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn delete_class(
    service: &SchoolService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    match storage.delete_class(id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Class deleted successfully"))),
        Ok(false) => Ok(not_found_response(ErrorCode::ClassNotFound, "Class not found")),
        Err(e) => Ok(error_response(&e)),
    }
}
