use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RequireJWT, RequirePermission};
use crate::models::health::{
    CreateHealthRecordRequest, HealthRecordListParams, UpdateHealthRecordRequest,
};
use crate::permissions::{Action, Module};
use crate::services::HealthService;
use crate::utils::SafeIDI64;

static HEALTH_SERVICE: Lazy<HealthService> = Lazy::new(HealthService::new_lazy);

pub async fn list_records(
    req: HttpRequest,
    query: web::Query<HealthRecordListParams>,
) -> ActixResult<HttpResponse> {
    HEALTH_SERVICE.list_records(query.into_inner(), &req).await
}

pub async fn create_record(
    req: HttpRequest,
    body: web::Json<CreateHealthRecordRequest>,
) -> ActixResult<HttpResponse> {
    HEALTH_SERVICE.create_record(body.into_inner(), &req).await
}

pub async fn get_record(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    HEALTH_SERVICE.get_record(id.0, &req).await
}

pub async fn update_record(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateHealthRecordRequest>,
) -> ActixResult<HttpResponse> {
    HEALTH_SERVICE.update_record(id.0, body.into_inner(), &req).await
}

pub async fn delete_record(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    HEALTH_SERVICE.delete_record(id.0, &req).await
}

pub fn configure_health_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/health-records")
            .wrap(RequireJWT)
            .service(
                web::resource("")
                    .route(
                        web::get()
                            .to(list_records)
                            .wrap(RequirePermission::view(Module::HealthRecords)),
                    )
                    .route(
                        web::post()
                            .to(create_record)
                            .wrap(RequirePermission::new(Module::HealthRecords, Action::Create)),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(
                        web::get()
                            .to(get_record)
                            .wrap(RequirePermission::view(Module::HealthRecords)),
                    )
                    .route(
                        web::put()
                            .to(update_record)
                            .wrap(RequirePermission::new(Module::HealthRecords, Action::Update)),
                    )
                    .route(
                        web::delete()
                            .to(delete_record)
                            .wrap(RequirePermission::new(Module::HealthRecords, Action::Delete)),
                    ),
            ),
    );
}
