use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::users::entities::UserRole;
use crate::services::PermissionService;

static PERMISSION_SERVICE: Lazy<PermissionService> = Lazy::new(PermissionService::new_lazy);

pub async fn my_permissions(req: HttpRequest) -> ActixResult<HttpResponse> {
    PERMISSION_SERVICE.my_permissions(&req).await
}

pub async fn navigation(req: HttpRequest) -> ActixResult<HttpResponse> {
    PERMISSION_SERVICE.navigation(&req).await
}

pub async fn role_permissions(role: web::Path<String>) -> ActixResult<HttpResponse> {
    PERMISSION_SERVICE.role_permissions(&role).await
}

pub fn configure_permission_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/permissions")
            .wrap(middlewares::RequireJWT)
            .route("/me", web::get().to(my_permissions))
            .route("/navigation", web::get().to(navigation))
            .service(
                web::resource("/roles/{role}").route(
                    web::get()
                        .to(role_permissions)
                        .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                ),
            ),
    );
}
