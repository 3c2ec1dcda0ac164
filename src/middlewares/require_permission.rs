/*!
 * 模块权限中间件
 *
 * 按当前用户角色查权限表，要求对指定模块拥有指定操作权限，否则返回 403。
 * 必须挂在 RequireJWT 之内使用。
 *
 * ```rust,ignore
 * web::resource("/{id}/payments").route(
 *     web::post()
 *         .to(record_payment)
 *         .wrap(RequirePermission::new(Module::Fees, Action::Create)),
 * )
 * ```
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::info;

use crate::middlewares::RequireJWT;
use crate::models::ErrorCode;
use crate::models::users::entities::UserRole;
use crate::permissions::{Action, Module, can, permissions_for_user_role};

use super::create_error_response;

#[derive(Clone, Copy)]
pub struct RequirePermission {
    module: Module,
    action: Action,
}

impl RequirePermission {
    pub fn new(module: Module, action: Action) -> Self {
        Self { module, action }
    }

    pub fn view(module: Module) -> Self {
        Self::new(module, Action::View)
    }

    fn granted(&self, role: &UserRole) -> bool {
        can(&permissions_for_user_role(role), self.module, self.action)
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequirePermission
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequirePermissionMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequirePermissionMiddleware {
            service: Rc::new(service),
            rule: *self,
        }))
    }
}

pub struct RequirePermissionMiddleware<S> {
    service: Rc<S>,
    rule: RequirePermission,
}

impl<S, B> Service<ServiceRequest> for RequirePermissionMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let rule = self.rule;

        Box::pin(async move {
            let Some(user) = RequireJWT::extract_user_claims(req.request()) else {
                return Ok(req.into_response(
                    create_error_response(
                        StatusCode::UNAUTHORIZED,
                        ErrorCode::Unauthorized,
                        "Authentication required",
                    )
                    .map_into_right_body(),
                ));
            };

            if rule.granted(&user.role) {
                return Ok(srv.call(req).await?.map_into_left_body());
            }

            info!(
                "Permission denied for user {} (role: {}): {} on {}",
                user.id,
                user.role,
                rule.action,
                rule.module.as_str()
            );
            Ok(req.into_response(
                create_error_response(
                    StatusCode::FORBIDDEN,
                    ErrorCode::Forbidden,
                    &format!(
                        "Permission denied: {} on {}",
                        rule.action,
                        rule.module.as_str()
                    ),
                )
                .map_into_right_body(),
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_rule_follows_role_table() {
        let record_payment = RequirePermission::new(Module::Fees, Action::Create);
        assert!(record_payment.granted(&UserRole::Clerk));
        assert!(record_payment.granted(&UserRole::Admin));
        assert!(!record_payment.granted(&UserRole::Parent));
        assert!(!record_payment.granted(&UserRole::Teacher));

        let view_fees = RequirePermission::view(Module::Fees);
        assert!(view_fees.granted(&UserRole::Parent));
        assert!(!view_fees.granted(&UserRole::Staff));
    }

    #[test]
    fn test_export_needs_explicit_grant() {
        let export_students = RequirePermission::new(Module::Students, Action::Export);
        assert!(export_students.granted(&UserRole::Teacher));
        assert!(export_students.granted(&UserRole::Clerk));
        assert!(!export_students.granted(&UserRole::Parent));
    }
}
