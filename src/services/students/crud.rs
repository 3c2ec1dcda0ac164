use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::StudentService;
use crate::models::students::requests::{
    CreateStudentRequest, StudentListParams, StudentListQuery, UpdateStudentRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{
    error_response, in_scope, not_found_response, student_scope, validation_response,
};
use crate::utils::today;

const NOT_FOUND: &str = "Student not found";

pub async fn list_students(
    service: &StudentService,
    params: StudentListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let scope = match student_scope(&storage, request).await {
        Ok(scope) => scope,
        Err(e) => return Ok(error_response(&e)),
    };

    match storage
        .list_students(StudentListQuery::from_params(params, scope))
        .await
    {
        Ok(page) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            page,
            "Student list retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn create_student(
    service: &StudentService,
    req: CreateStudentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = req.validate(today()) {
        return Ok(validation_response(msg));
    }

    let storage = service.get_storage(request)?;
    match storage.create_student(req).await {
        Ok(student) => {
            info!("Student {} admitted", student.admission_number);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(student, "Student created successfully")))
        }
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn get_student(
    service: &StudentService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let scope = match student_scope(&storage, request).await {
        Ok(scope) => scope,
        Err(e) => return Ok(error_response(&e)),
    };
    if !in_scope(&scope, id) {
        return Ok(not_found_response(ErrorCode::StudentNotFound, NOT_FOUND));
    }

    match storage.get_student_by_id(id).await {
        Ok(Some(student)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            student,
            "Student retrieved successfully",
        ))),
        Ok(None) => Ok(not_found_response(ErrorCode::StudentNotFound, NOT_FOUND)),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn update_student(
    service: &StudentService,
    id: i64,
    update: UpdateStudentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = update.validate(today()) {
        return Ok(validation_response(msg));
    }

    let storage = service.get_storage(request)?;
    match storage.update_student(id, update).await {
        Ok(Some(student)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            student,
            "Student updated successfully",
        ))),
        Ok(None) => Ok(not_found_response(ErrorCode::StudentNotFound, NOT_FOUND)),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn delete_student(
    service: &StudentService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    match storage.delete_student(id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Student deleted successfully"))),
        Ok(false) => Ok(not_found_response(ErrorCode::StudentNotFound, NOT_FOUND)),
        Err(e) => Ok(error_response(&e)),
    }
}
