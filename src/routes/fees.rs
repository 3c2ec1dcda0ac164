use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RequireJWT, RequirePermission};
use crate::models::fees::requests::{
    CreateFeeRequest, CreateFeeStructureRequest, CreatePaymentRequest, FeeListParams,
    FeeSummaryParams, UpdateFeeRequest, UpdateFeeStructureRequest,
};
use crate::models::school::SchoolListParams;
use crate::permissions::{Action, Module};
use crate::services::FeeService;
use crate::utils::SafeIDI64;

static FEE_SERVICE: Lazy<FeeService> = Lazy::new(FeeService::new_lazy);

pub async fn list_structures(
    req: HttpRequest,
    query: web::Query<SchoolListParams>,
) -> ActixResult<HttpResponse> {
    FEE_SERVICE.list_structures(query.into_inner(), &req).await
}

pub async fn create_structure(
    req: HttpRequest,
    body: web::Json<CreateFeeStructureRequest>,
) -> ActixResult<HttpResponse> {
    FEE_SERVICE.create_structure(body.into_inner(), &req).await
}

pub async fn get_structure(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    FEE_SERVICE.get_structure(id.0, &req).await
}

pub async fn update_structure(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateFeeStructureRequest>,
) -> ActixResult<HttpResponse> {
    FEE_SERVICE
        .update_structure(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_structure(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    FEE_SERVICE.delete_structure(id.0, &req).await
}

pub async fn list_fees(
    req: HttpRequest,
    query: web::Query<FeeListParams>,
) -> ActixResult<HttpResponse> {
    FEE_SERVICE.list_fees(query.into_inner(), &req).await
}

pub async fn create_fee(
    req: HttpRequest,
    body: web::Json<CreateFeeRequest>,
) -> ActixResult<HttpResponse> {
    FEE_SERVICE.create_fee(body.into_inner(), &req).await
}

pub async fn fee_summary(
    req: HttpRequest,
    query: web::Query<FeeSummaryParams>,
) -> ActixResult<HttpResponse> {
    FEE_SERVICE.fee_summary(query.into_inner(), &req).await
}

pub async fn get_fee(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    FEE_SERVICE.get_fee(id.0, &req).await
}

pub async fn update_fee(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateFeeRequest>,
) -> ActixResult<HttpResponse> {
    FEE_SERVICE.update_fee(id.0, body.into_inner(), &req).await
}

pub async fn delete_fee(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    FEE_SERVICE.delete_fee(id.0, &req).await
}

pub async fn list_payments(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    FEE_SERVICE.list_payments(id.0, &req).await
}

pub async fn record_payment(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<CreatePaymentRequest>,
) -> ActixResult<HttpResponse> {
    FEE_SERVICE.record_payment(id.0, body.into_inner(), &req).await
}

pub fn configure_fee_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/fees")
            .wrap(RequireJWT)
            // 收费标准
            .service(
                web::resource("/structures")
                    .route(
                        web::get()
                            .to(list_structures)
                            .wrap(RequirePermission::view(Module::FeeStructures)),
                    )
                    .route(
                        web::post()
                            .to(create_structure)
                            .wrap(RequirePermission::new(Module::FeeStructures, Action::Create)),
                    ),
            )
            .service(
                web::resource("/structures/{id}")
                    .route(
                        web::get()
                            .to(get_structure)
                            .wrap(RequirePermission::view(Module::FeeStructures)),
                    )
                    .route(
                        web::put()
                            .to(update_structure)
                            .wrap(RequirePermission::new(Module::FeeStructures, Action::Update)),
                    )
                    .route(
                        web::delete()
                            .to(delete_structure)
                            .wrap(RequirePermission::new(Module::FeeStructures, Action::Delete)),
                    ),
            )
            .service(
                web::resource("/summary").route(
                    web::get()
                        .to(fee_summary)
                        .wrap(RequirePermission::view(Module::Fees)),
                ),
            )
            .service(
                web::resource("")
                    .route(
                        web::get()
                            .to(list_fees)
                            .wrap(RequirePermission::view(Module::Fees)),
                    )
                    .route(
                        web::post()
                            .to(create_fee)
                            .wrap(RequirePermission::new(Module::Fees, Action::Create)),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(
                        web::get()
                            .to(get_fee)
                            .wrap(RequirePermission::view(Module::Fees)),
                    )
                    .route(
                        web::put()
                            .to(update_fee)
                            .wrap(RequirePermission::new(Module::Fees, Action::Update)),
                    )
                    .route(
                        web::delete()
                            .to(delete_fee)
                            .wrap(RequirePermission::new(Module::Fees, Action::Delete)),
                    ),
            )
            .service(
                web::resource("/{id}/payments")
                    .route(
                        web::get()
                            .to(list_payments)
                            .wrap(RequirePermission::view(Module::Fees)),
                    )
                    .route(
                        web::post()
                            .to(record_payment)
                            .wrap(RequirePermission::new(Module::Fees, Action::Create)),
                    ),
            ),
    );
}
