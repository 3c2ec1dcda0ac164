use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ExamService;
use crate::models::exams::grading::summarize;
use crate::models::exams::requests::{
    ExamSummaryParams, RecordResultRequest, ResultListParams, ResultListQuery, UpdateResultRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{error_response, in_scope, not_found_response, student_scope};

const NOT_FOUND: &str = "Result not found";

pub async fn list_results(
    service: &ExamService,
    exam_id: i64,
    params: ResultListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let student_ids = match student_scope(&storage, request).await {
        Ok(scope) => scope,
        Err(e) => return Ok(error_response(&e)),
    };

    let query = ResultListQuery {
        page: Some(params.pagination.page),
        size: Some(params.pagination.size),
        exam_id: Some(exam_id),
        student_id: params.student_id,
        subject_id: params.subject_id,
        student_ids,
    };

    match storage.list_results(query).await {
        Ok(page) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            page,
            "Result list retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn record_result(
    service: &ExamService,
    exam_id: i64,
    req: RecordResultRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    match storage.record_result(exam_id, req).await {
        Ok(result) => Ok(HttpResponse::Created()
            .json(ApiResponse::success(result, "Result recorded successfully"))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn get_result(
    service: &ExamService,
    exam_id: i64,
    result_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let scope = match student_scope(&storage, request).await {
        Ok(scope) => scope,
        Err(e) => return Ok(error_response(&e)),
    };

    match storage.get_result_by_id(result_id).await {
        Ok(Some(result)) if result.exam_id == exam_id && in_scope(&scope, result.student_id) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                result,
                "Result retrieved successfully",
            )))
        }
        Ok(_) => Ok(not_found_response(ErrorCode::ResultNotFound, NOT_FOUND)),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn update_result(
    service: &ExamService,
    exam_id: i64,
    result_id: i64,
    update: UpdateResultRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    match storage.get_result_by_id(result_id).await {
        Ok(Some(result)) if result.exam_id == exam_id => {}
        Ok(_) => return Ok(not_found_response(ErrorCode::ResultNotFound, NOT_FOUND)),
        Err(e) => return Ok(error_response(&e)),
    }

    match storage.update_result(result_id, update).await {
        Ok(Some(result)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            result,
            "Result updated successfully",
        ))),
        Ok(None) => Ok(not_found_response(ErrorCode::ResultNotFound, NOT_FOUND)),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn delete_result(
    service: &ExamService,
    exam_id: i64,
    result_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    match storage.get_result_by_id(result_id).await {
        Ok(Some(result)) if result.exam_id == exam_id => {}
        Ok(_) => return Ok(not_found_response(ErrorCode::ResultNotFound, NOT_FOUND)),
        Err(e) => return Ok(error_response(&e)),
    }

    match storage.delete_result(result_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Result deleted successfully"))),
        Ok(false) => Ok(not_found_response(ErrorCode::ResultNotFound, NOT_FOUND)),
        Err(e) => Ok(error_response(&e)),
    }
}

/// 学生一场考试的总评
pub async fn student_summary(
    service: &ExamService,
    exam_id: i64,
    params: ExamSummaryParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let scope = match student_scope(&storage, request).await {
        Ok(scope) => scope,
        Err(e) => return Ok(error_response(&e)),
    };
    if !in_scope(&scope, params.student_id) {
        return Ok(not_found_response(ErrorCode::StudentNotFound, "Student not found"));
    }

    match storage.get_exam_by_id(exam_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(not_found_response(ErrorCode::ExamNotFound, "Exam not found")),
        Err(e) => return Ok(error_response(&e)),
    }

    match storage
        .list_student_exam_results(exam_id, params.student_id)
        .await
    {
        Ok(results) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            summarize(params.student_id, exam_id, results),
            "Result summary retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}
