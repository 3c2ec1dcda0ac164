use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::HallTicketService;
use crate::models::hall_tickets::{
    HallTicketDetail, HallTicketListParams, HallTicketListQuery, UpdateHallTicketRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{error_response, in_scope, not_found_response, student_scope};

const NOT_FOUND: &str = "Hall ticket not found";

pub async fn list_tickets(
    service: &HallTicketService,
    params: HallTicketListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let student_ids = match student_scope(&storage, request).await {
        Ok(scope) => scope,
        Err(e) => return Ok(error_response(&e)),
    };

    let query = HallTicketListQuery {
        page: Some(params.pagination.page),
        size: Some(params.pagination.size),
        exam_id: params.exam_id,
        student_id: params.student_id,
        status: params.status,
        student_ids,
    };

    match storage.list_hall_tickets(query).await {
        Ok(page) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            page,
            "Hall ticket list retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

/// 准考证附带考试日程
pub async fn get_ticket(
    service: &HallTicketService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let scope = match student_scope(&storage, request).await {
        Ok(scope) => scope,
        Err(e) => return Ok(error_response(&e)),
    };

    let ticket = match storage.get_hall_ticket_by_id(id).await {
        Ok(Some(ticket)) if in_scope(&scope, ticket.student_id) => ticket,
        Ok(_) => return Ok(not_found_response(ErrorCode::HallTicketNotFound, NOT_FOUND)),
        Err(e) => return Ok(error_response(&e)),
    };

    match storage.list_schedules(ticket.exam_id).await {
        Ok(schedules) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            HallTicketDetail { ticket, schedules },
            "Hall ticket retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn update_ticket(
    service: &HallTicketService,
    id: i64,
    update: UpdateHallTicketRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    match storage.update_hall_ticket(id, update).await {
        Ok(Some(ticket)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ticket,
            "Hall ticket updated successfully",
        ))),
        Ok(None) => Ok(not_found_response(ErrorCode::HallTicketNotFound, NOT_FOUND)),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn delete_ticket(
    service: &HallTicketService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    match storage.delete_hall_ticket(id).await {
        Ok(true) => Ok(HttpResponse::Ok()
            .json(ApiResponse::success_empty("Hall ticket deleted successfully"))),
        Ok(false) => Ok(not_found_response(ErrorCode::HallTicketNotFound, NOT_FOUND)),
        Err(e) => Ok(error_response(&e)),
    }
}
