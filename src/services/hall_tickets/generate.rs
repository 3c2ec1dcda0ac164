use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::HallTicketService;
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::models::hall_tickets::{BulkGenerateRequest, GenerateHallTicketRequest};
use crate::services::error_response;

pub async fn generate_ticket(
    service: &HallTicketService,
    req: GenerateHallTicketRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let issued_by = RequireJWT::extract_user_id(request);

    match storage.generate_hall_ticket(req, issued_by).await {
        Ok(ticket) => {
            info!("Hall ticket {} issued", ticket.ticket_number);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(ticket, "Hall ticket generated successfully")))
        }
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn bulk_generate(
    service: &HallTicketService,
    req: BulkGenerateRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let issued_by = RequireJWT::extract_user_id(request);

    match storage
        .bulk_generate_hall_tickets(req.exam_id, req.class_id, issued_by)
        .await
    {
        Ok(summary) => {
            info!(
                "Bulk hall tickets for exam {} class {}: {} created, {} skipped",
                req.exam_id, req.class_id, summary.created, summary.skipped
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                summary,
                "Hall tickets generated successfully",
            )))
        }
        Err(e) => Ok(error_response(&e)),
    }
}
