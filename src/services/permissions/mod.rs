//! 权限表查询：当前用户的权限映射、过滤后的导航菜单，以及管理员查看任意角色的权限

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireJWT;
use crate::models::permissions::{NavigationResponse, PermissionsResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::permissions::{navigation_for, permissions_for_role, permissions_for_user_role};

pub struct PermissionService;

fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiResponse::error_empty(
        ErrorCode::Unauthorized,
        "Unauthorized access, please login",
    ))
}

impl PermissionService {
    pub fn new_lazy() -> Self {
        Self
    }

    pub async fn my_permissions(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let Some(role) = RequireJWT::extract_user_role(request) else {
            return Ok(unauthorized());
        };
        Ok(HttpResponse::Ok().json(ApiResponse::success(
            PermissionsResponse {
                role: role.to_string(),
                permissions: permissions_for_user_role(&role),
            },
            "Permissions retrieved successfully",
        )))
    }

    pub async fn navigation(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let Some(role) = RequireJWT::extract_user_role(request) else {
            return Ok(unauthorized());
        };
        let items = navigation_for(&permissions_for_user_role(&role));
        Ok(HttpResponse::Ok().json(ApiResponse::success(
            NavigationResponse { items },
            "Navigation retrieved successfully",
        )))
    }

    /// 未知角色返回空映射
    pub async fn role_permissions(&self, role: &str) -> ActixResult<HttpResponse> {
        Ok(HttpResponse::Ok().json(ApiResponse::success(
            PermissionsResponse {
                role: role.to_string(),
                permissions: permissions_for_role(role),
            },
            "Permissions retrieved successfully",
        )))
    }
}
