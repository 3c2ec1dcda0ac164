use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RequireJWT, RequirePermission};
use crate::models::certificates::{
    CertificateListParams, IssueCertificateRequest, RevokeCertificateRequest,
    UpdateCertificateRequest,
};
use crate::permissions::{Action, Module};
use crate::services::CertificateService;
use crate::utils::SafeIDI64;

static CERTIFICATE_SERVICE: Lazy<CertificateService> = Lazy::new(CertificateService::new_lazy);

pub async fn list_certificates(
    req: HttpRequest,
    query: web::Query<CertificateListParams>,
) -> ActixResult<HttpResponse> {
    CERTIFICATE_SERVICE
        .list_certificates(query.into_inner(), &req)
        .await
}

pub async fn issue_certificate(
    req: HttpRequest,
    body: web::Json<IssueCertificateRequest>,
) -> ActixResult<HttpResponse> {
    CERTIFICATE_SERVICE
        .issue_certificate(body.into_inner(), &req)
        .await
}

pub async fn get_certificate(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    CERTIFICATE_SERVICE.get_certificate(id.0, &req).await
}

pub async fn update_certificate(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateCertificateRequest>,
) -> ActixResult<HttpResponse> {
    CERTIFICATE_SERVICE
        .update_certificate(id.0, body.into_inner(), &req)
        .await
}

pub async fn revoke_certificate(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<RevokeCertificateRequest>,
) -> ActixResult<HttpResponse> {
    CERTIFICATE_SERVICE
        .revoke_certificate(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_certificate(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    CERTIFICATE_SERVICE.delete_certificate(id.0, &req).await
}

pub fn configure_certificate_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/certificates")
            .wrap(RequireJWT)
            .service(
                web::resource("")
                    .route(
                        web::get()
                            .to(list_certificates)
                            .wrap(RequirePermission::view(Module::Certificates)),
                    )
                    .route(
                        web::post()
                            .to(issue_certificate)
                            .wrap(RequirePermission::new(Module::Certificates, Action::Create)),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(
                        web::get()
                            .to(get_certificate)
                            .wrap(RequirePermission::view(Module::Certificates)),
                    )
                    .route(
                        web::put()
                            .to(update_certificate)
                            .wrap(RequirePermission::new(Module::Certificates, Action::Update)),
                    )
                    .route(
                        web::delete()
                            .to(delete_certificate)
                            .wrap(RequirePermission::new(Module::Certificates, Action::Delete)),
                    ),
            )
            .service(
                web::resource("/{id}/revoke").route(
                    web::post()
                        .to(revoke_certificate)
                        .wrap(RequirePermission::new(Module::Certificates, Action::Update)),
                ),
            ),
    );
}
