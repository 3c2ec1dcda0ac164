use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RequireJWT, RequirePermission};
use crate::models::hall_tickets::{
    BulkGenerateRequest, GenerateHallTicketRequest, HallTicketListParams,
    UpdateHallTicketRequest,
};
use crate::permissions::{Action, Module};
use crate::services::HallTicketService;
use crate::utils::SafeIDI64;

static HALL_TICKET_SERVICE: Lazy<HallTicketService> = Lazy::new(HallTicketService::new_lazy);

pub async fn list_tickets(
    req: HttpRequest,
    query: web::Query<HallTicketListParams>,
) -> ActixResult<HttpResponse> {
    HALL_TICKET_SERVICE.list_tickets(query.into_inner(), &req).await
}

pub async fn generate(
    req: HttpRequest,
    body: web::Json<GenerateHallTicketRequest>,
) -> ActixResult<HttpResponse> {
    HALL_TICKET_SERVICE.generate(body.into_inner(), &req).await
}

pub async fn bulk_generate(
    req: HttpRequest,
    body: web::Json<BulkGenerateRequest>,
) -> ActixResult<HttpResponse> {
    HALL_TICKET_SERVICE.bulk_generate(body.into_inner(), &req).await
}

pub async fn get_ticket(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    HALL_TICKET_SERVICE.get_ticket(id.0, &req).await
}

pub async fn update_ticket(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateHallTicketRequest>,
) -> ActixResult<HttpResponse> {
    HALL_TICKET_SERVICE
        .update_ticket(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_ticket(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    HALL_TICKET_SERVICE.delete_ticket(id.0, &req).await
}

pub fn configure_hall_ticket_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/hall-tickets")
            .wrap(RequireJWT)
            .service(
                web::resource("")
                    .route(
                        web::get()
                            .to(list_tickets)
                            .wrap(RequirePermission::view(Module::HallTickets)),
                    )
                    .route(
                        web::post()
                            .to(generate)
                            .wrap(RequirePermission::new(Module::HallTickets, Action::Create)),
                    ),
            )
            .service(
                web::resource("/bulk").route(
                    web::post()
                        .to(bulk_generate)
                        .wrap(RequirePermission::new(Module::HallTickets, Action::Create)),
                ),
            )
            .service(
                web::resource("/{id}")
                    .route(
                        web::get()
                            .to(get_ticket)
                            .wrap(RequirePermission::view(Module::HallTickets)),
                    )
                    .route(
                        web::put()
                            .to(update_ticket)
                            .wrap(RequirePermission::new(Module::HallTickets, Action::Update)),
                    )
                    .route(
                        web::delete()
                            .to(delete_ticket)
                            .wrap(RequirePermission::new(Module::HallTickets, Action::Delete)),
                    ),
            ),
    );
}
