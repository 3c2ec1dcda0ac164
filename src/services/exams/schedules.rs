//! 考试日程与成绩构成

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ExamService;
use crate::config::AppConfig;
use crate::models::exams::requests::{CreateScheduleRequest, UpsertMarkDistributionRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{error_response, not_found_response};

pub async fn list_schedules(
    service: &ExamService,
    exam_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    match storage.list_schedules(exam_id).await {
        Ok(schedules) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            schedules,
            "Exam schedule retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn create_schedule(
    service: &ExamService,
    exam_id: i64,
    req: CreateScheduleRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    match storage.create_schedule(exam_id, req).await {
        Ok(schedule) => Ok(HttpResponse::Created().json(ApiResponse::success(
            schedule,
            "Exam schedule created successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn delete_schedule(
    service: &ExamService,
    exam_id: i64,
    schedule_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    match storage.delete_schedule(exam_id, schedule_id).await {
        Ok(true) => Ok(HttpResponse::Ok()
            .json(ApiResponse::success_empty("Exam schedule deleted successfully"))),
        Ok(false) => Ok(not_found_response(ErrorCode::NotFound, "Exam schedule not found")),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn list_distributions(
    service: &ExamService,
    exam_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    match storage.list_mark_distributions(exam_id).await {
        Ok(distributions) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            distributions,
            "Mark distributions retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

/// 未指定及格线时使用配置中的默认值
pub async fn upsert_distribution(
    service: &ExamService,
    exam_id: i64,
    req: UpsertMarkDistributionRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let default_pass = AppConfig::get().school.pass_percentage;
    match storage
        .upsert_mark_distribution(exam_id, req, default_pass)
        .await
    {
        Ok(distribution) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            distribution,
            "Mark distribution saved successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}
