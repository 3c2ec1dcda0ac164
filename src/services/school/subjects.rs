use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SchoolService;
use crate::models::school::{CreateSubjectRequest, SchoolListParams, UpdateSubjectRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{error_response, not_found_response, validation_response};
use crate::utils::validate::require_text;

pub async fn list_subjects(
    service: &SchoolService,
    params: SchoolListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    match storage.list_subjects(params).await {
        Ok(page) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            page,
            "Subject list retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn create_subject(
    service: &SchoolService,
    req: CreateSubjectRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = req.validate() {
        return Ok(validation_response(msg));
    }

    let storage = service.get_storage(request)?;
    match storage.create_subject(req).await {
        Ok(subject) => Ok(HttpResponse::Created()
            .json(ApiResponse::success(subject, "Subject created successfully"))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn get_subject(
    service: &SchoolService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    match storage.get_subject_by_id(id).await {
        Ok(Some(subject)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            subject,
            "Subject retrieved successfully",
        ))),
        Ok(None) => Ok(not_found_response(ErrorCode::SubjectNotFound, "Subject not found")),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn update_subject(
    service: &SchoolService,
    id: i64,
    update: UpdateSubjectRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let checks = [
        update.name.as_deref().map(|v| require_text(v, "name", 100)),
        update.code.as_deref().map(|v| require_text(v, "code", 20)),
    ];
    if let Some(Err(msg)) = checks.into_iter().flatten().find(Result::is_err) {
        return Ok(validation_response(msg));
    }

    let storage = service.get_storage(request)?;
    match storage.update_subject(id, update).await {
        Ok(Some(subject)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            subject,
            "Subject updated successfully",
        ))),
        Ok(None) => Ok(not_found_response(ErrorCode::SubjectNotFound, "Subject not found")),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn delete_subject(
    service: &SchoolService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    match storage.delete_subject(id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Subject deleted successfully"))),
        Ok(false) => Ok(not_found_response(ErrorCode::SubjectNotFound, "Subject not found")),
        Err(e) => Ok(error_response(&e)),
    }
}
