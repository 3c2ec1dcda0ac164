use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RequireJWT, RequirePermission};
use crate::models::transport::{
    CreateTransportFeeRequest, CreateVehicleRequest, TransportFeeListParams,
    UpdateTransportFeeRequest, UpdateVehicleRequest, VehicleListParams,
};
use crate::permissions::{Action, Module};
use crate::services::TransportService;
use crate::utils::SafeIDI64;

static TRANSPORT_SERVICE: Lazy<TransportService> = Lazy::new(TransportService::new_lazy);

pub async fn list_vehicles(
    req: HttpRequest,
    query: web::Query<VehicleListParams>,
) -> ActixResult<HttpResponse> {
    TRANSPORT_SERVICE.list_vehicles(query.into_inner(), &req).await
}

pub async fn create_vehicle(
    req: HttpRequest,
    body: web::Json<CreateVehicleRequest>,
) -> ActixResult<HttpResponse> {
    TRANSPORT_SERVICE.create_vehicle(body.into_inner(), &req).await
}

pub async fn get_vehicle(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    TRANSPORT_SERVICE.get_vehicle(id.0, &req).await
}

pub async fn update_vehicle(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateVehicleRequest>,
) -> ActixResult<HttpResponse> {
    TRANSPORT_SERVICE
        .update_vehicle(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_vehicle(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    TRANSPORT_SERVICE.delete_vehicle(id.0, &req).await
}

pub async fn list_fees(
    req: HttpRequest,
    query: web::Query<TransportFeeListParams>,
) -> ActixResult<HttpResponse> {
    TRANSPORT_SERVICE.list_fees(query.into_inner(), &req).await
}

pub async fn create_fee(
    req: HttpRequest,
    body: web::Json<CreateTransportFeeRequest>,
) -> ActixResult<HttpResponse> {
    TRANSPORT_SERVICE.create_fee(body.into_inner(), &req).await
}

pub async fn get_fee(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    TRANSPORT_SERVICE.get_fee(id.0, &req).await
}

pub async fn update_fee(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateTransportFeeRequest>,
) -> ActixResult<HttpResponse> {
    TRANSPORT_SERVICE.update_fee(id.0, body.into_inner(), &req).await
}

pub async fn delete_fee(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    TRANSPORT_SERVICE.delete_fee(id.0, &req).await
}

pub fn configure_transport_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/transport")
            .wrap(RequireJWT)
            .service(
                web::resource("/vehicles")
                    .route(
                        web::get()
                            .to(list_vehicles)
                            .wrap(RequirePermission::view(Module::Transport)),
                    )
                    .route(
                        web::post()
                            .to(create_vehicle)
                            .wrap(RequirePermission::new(Module::Transport, Action::Create)),
                    ),
            )
            .service(
                web::resource("/vehicles/{id}")
                    .route(
                        web::get()
                            .to(get_vehicle)
                            .wrap(RequirePermission::view(Module::Transport)),
                    )
                    .route(
                        web::put()
                            .to(update_vehicle)
                            .wrap(RequirePermission::new(Module::Transport, Action::Update)),
                    )
                    .route(
                        web::delete()
                            .to(delete_vehicle)
                            .wrap(RequirePermission::new(Module::Transport, Action::Delete)),
                    ),
            )
            .service(
                web::resource("/fees")
                    .route(
                        web::get()
                            .to(list_fees)
                            .wrap(RequirePermission::view(Module::Transport)),
                    )
                    .route(
                        web::post()
                            .to(create_fee)
                            .wrap(RequirePermission::new(Module::Transport, Action::Create)),
                    ),
            )
            .service(
                web::resource("/fees/{id}")
                    .route(
                        web::get()
                            .to(get_fee)
                            .wrap(RequirePermission::view(Module::Transport)),
                    )
                    .route(
                        web::put()
                            .to(update_fee)
                            .wrap(RequirePermission::new(Module::Transport, Action::Update)),
                    )
                    .route(
                        web::delete()
                            .to(delete_fee)
                            .wrap(RequirePermission::new(Module::Transport, Action::Delete)),
                    ),
            ),
    );
}
