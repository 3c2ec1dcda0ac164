use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RateLimit, RequireJWT, RequirePermission};
use crate::models::sms::{CampaignListParams, CreateCampaignRequest, UpdateCampaignRequest};
use crate::permissions::{Action, Module};
use crate::services::SmsService;
use crate::utils::SafeIDI64;

static SMS_SERVICE: Lazy<SmsService> = Lazy::new(SmsService::new_lazy);

pub async fn list_campaigns(
    req: HttpRequest,
    query: web::Query<CampaignListParams>,
) -> ActixResult<HttpResponse> {
    SMS_SERVICE.list_campaigns(query.into_inner(), &req).await
}

pub async fn create_campaign(
    req: HttpRequest,
    body: web::Json<CreateCampaignRequest>,
) -> ActixResult<HttpResponse> {
    SMS_SERVICE.create_campaign(body.into_inner(), &req).await
}

pub async fn get_campaign(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    SMS_SERVICE.get_campaign(id.0, &req).await
}

pub async fn update_campaign(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateCampaignRequest>,
) -> ActixResult<HttpResponse> {
    SMS_SERVICE
        .update_campaign(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_campaign(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    SMS_SERVICE.delete_campaign(id.0, &req).await
}

pub async fn send_campaign(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    SMS_SERVICE.send_campaign(id.0, &req).await
}

pub fn configure_sms_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/sms/campaigns")
            .wrap(RequireJWT)
            .service(
                web::resource("")
                    .route(
                        web::get()
                            .to(list_campaigns)
                            .wrap(RequirePermission::view(Module::Communication)),
                    )
                    .route(
                        web::post()
                            .to(create_campaign)
                            .wrap(RequirePermission::new(Module::Communication, Action::Create)),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(
                        web::get()
                            .to(get_campaign)
                            .wrap(RequirePermission::view(Module::Communication)),
                    )
                    .route(
                        web::put()
                            .to(update_campaign)
                            .wrap(RequirePermission::new(Module::Communication, Action::Create)),
                    )
                    .route(
                        web::delete()
                            .to(delete_campaign)
                            .wrap(RequirePermission::new(Module::Communication, Action::Create)),
                    ),
            )
            .service(
                web::resource("/{id}/send").route(
                    web::post()
                        .to(send_campaign)
                        .wrap(RateLimit::sms_send())
                        .wrap(RequirePermission::new(Module::Communication, Action::Create)),
                ),
            ),
    );
}
