use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RequireJWT, RequirePermission};
use crate::models::school::{
    CreateClassRequest, CreateSubjectRequest, SchoolListParams, UpdateClassRequest,
    UpdateSubjectRequest,
};
use crate::permissions::{Action, Module};
use crate::services::SchoolService;
use crate::utils::SafeIDI64;

static SCHOOL_SERVICE: Lazy<SchoolService> = Lazy::new(SchoolService::new_lazy);

pub async fn list_classes(
    req: HttpRequest,
    query: web::Query<SchoolListParams>,
) -> ActixResult<HttpResponse> {
    SCHOOL_SERVICE.list_classes(query.into_inner(), &req).await
}

pub async fn create_class(
    req: HttpRequest,
    body: web::Json<CreateClassRequest>,
) -> ActixResult<HttpResponse> {
    SCHOOL_SERVICE.create_class(body.into_inner(), &req).await
}

pub async fn get_class(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    SCHOOL_SERVICE.get_class(id.0, &req).await
}

pub async fn update_class(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateClassRequest>,
) -> ActixResult<HttpResponse> {
    SCHOOL_SERVICE.update_class(id.0, body.into_inner(), &req).await
}

pub async fn delete_class(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    SCHOOL_SERVICE.delete_class(id.0, &req).await
}

pub async fn list_subjects(
    req: HttpRequest,
    query: web::Query<SchoolListParams>,
) -> ActixResult<HttpResponse> {
    SCHOOL_SERVICE.list_subjects(query.into_inner(), &req).await
}

pub async fn create_subject(
    req: HttpRequest,
    body: web::Json<CreateSubjectRequest>,
) -> ActixResult<HttpResponse> {
    SCHOOL_SERVICE.create_subject(body.into_inner(), &req).await
}

pub async fn get_subject(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    SCHOOL_SERVICE.get_subject(id.0, &req).await
}

pub async fn update_subject(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateSubjectRequest>,
) -> ActixResult<HttpResponse> {
    SCHOOL_SERVICE.update_subject(id.0, body.into_inner(), &req).await
}

pub async fn delete_subject(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    SCHOOL_SERVICE.delete_subject(id.0, &req).await
}

pub fn configure_school_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/classes")
            .wrap(RequireJWT)
            .service(
                web::resource("")
                    .route(
                        web::get()
                            .to(list_classes)
                            .wrap(RequirePermission::view(Module::Classes)),
                    )
                    .route(
                        web::post()
                            .to(create_class)
                            .wrap(RequirePermission::new(Module::Classes, Action::Create)),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(
                        web::get()
                            .to(get_class)
                            .wrap(RequirePermission::view(Module::Classes)),
                    )
                    .route(
                        web::put()
                            .to(update_class)
                            .wrap(RequirePermission::new(Module::Classes, Action::Update)),
                    )
                    .route(
                        web::delete()
                            .to(delete_class)
                            .wrap(RequirePermission::new(Module::Classes, Action::Delete)),
                    ),
            ),
    );

    cfg.service(
        web::scope("/api/v1/subjects")
            .wrap(RequireJWT)
            .service(
                web::resource("")
                    .route(
                        web::get()
                            .to(list_subjects)
                            .wrap(RequirePermission::view(Module::Subjects)),
                    )
                    .route(
                        web::post()
                            .to(create_subject)
                            .wrap(RequirePermission::new(Module::Subjects, Action::Create)),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(
                        web::get()
                            .to(get_subject)
                            .wrap(RequirePermission::view(Module::Subjects)),
                    )
                    .route(
                        web::put()
                            .to(update_subject)
                            .wrap(RequirePermission::new(Module::Subjects, Action::Update)),
                    )
                    .route(
                        web::delete()
                            .to(delete_subject)
                            .wrap(RequirePermission::new(Module::Subjects, Action::Delete)),
                    ),
            ),
    );
}
