use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ExamService;
use crate::models::exams::requests::{CreateExamRequest, ExamListParams, UpdateExamRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{error_response, not_found_response, validation_response};

const NOT_FOUND: &str = "Exam not found";

pub async fn list_exams(
    service: &ExamService,
    params: ExamListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    match storage.list_exams(params).await {
        Ok(page) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            page,
            "Exam list retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn create_exam(
    service: &ExamService,
    req: CreateExamRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = req.validate() {
        return Ok(validation_response(msg));
    }

    let storage = service.get_storage(request)?;
    match storage.create_exam(req).await {
        Ok(exam) => Ok(HttpResponse::Created().json(ApiResponse::success(exam, "Exam created successfully"))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn get_exam(
    service: &ExamService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    match storage.get_exam_by_id(id).await {
        Ok(Some(exam)) => Ok(HttpResponse::Ok().json(ApiResponse::success(exam, "Exam retrieved successfully"))),
        Ok(None) => Ok(not_found_response(ErrorCode::ExamNotFound, NOT_FOUND)),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn update_exam(
    service: &ExamService,
    id: i64,
    update: UpdateExamRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    match storage.update_exam(id, update).await {
        Ok(Some(exam)) => Ok(HttpResponse::Ok().json(ApiResponse::success(exam, "Exam updated successfully"))),
        Ok(None) => Ok(not_found_response(ErrorCode::ExamNotFound, NOT_FOUND)),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn delete_exam(
    service: &ExamService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    match storage.delete_exam(id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Exam deleted successfully"))),
        Ok(false) => Ok(not_found_response(ErrorCode::ExamNotFound, NOT_FOUND)),
        Err(e) => Ok(error_response(&e)),
    }
}
