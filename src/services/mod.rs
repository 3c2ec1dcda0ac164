//! 业务逻辑层
//!
//! 每个业务域一个 `XxxService`，路由层通过静态实例调用。
//! 存储实例在请求时从 app data 中取得。

pub mod auth;
pub mod certificates;
pub mod exams;
pub mod fees;
pub mod hall_tickets;
pub mod health;
pub mod library;
pub mod permissions;
pub mod school;
pub mod sms;
pub mod students;
pub mod transport;
pub mod users;

pub use auth::AuthService;
pub use certificates::CertificateService;
pub use exams::ExamService;
pub use fees::FeeService;
pub use hall_tickets::HallTicketService;
pub use health::HealthService;
pub use library::LibraryService;
pub use permissions::PermissionService;
pub use school::SchoolService;
pub use sms::SmsService;
pub use students::StudentService;
pub use transport::TransportService;
pub use users::UserService;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use std::sync::Arc;
use tracing::error;

use crate::errors::{ErpError, Result};
use crate::middlewares::RequireJWT;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub(crate) fn storage_from_request(request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
    request
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| actix_web::error::ErrorInternalServerError("Storage not found in app data"))
}

/// 存储层错误到 HTTP 响应的映射
pub(crate) fn error_response(err: &ErpError) -> HttpResponse {
    match err {
        ErpError::Validation(msg) | ErpError::DateParse(msg) => HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg.as_str())),
        ErpError::NotFound(msg) => {
            HttpResponse::NotFound().json(ApiResponse::error_empty(ErrorCode::NotFound, msg.as_str()))
        }
        ErpError::Conflict(msg) => {
            HttpResponse::Conflict().json(ApiResponse::error_empty(ErrorCode::Conflict, msg.as_str()))
        }
        ErpError::Authentication(msg) => HttpResponse::Unauthorized()
            .json(ApiResponse::error_empty(ErrorCode::Unauthorized, msg.as_str())),
        ErpError::Authorization(msg) => HttpResponse::Forbidden()
            .json(ApiResponse::error_empty(ErrorCode::Forbidden, msg.as_str())),
        other => {
            error!("{}", other);
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                "Internal server error",
            ))
        }
    }
}

pub(crate) fn validation_response(msg: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg))
}

pub(crate) fn not_found_response(code: ErrorCode, msg: &str) -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(code, msg))
}

/// 学生和家长只能访问与自己关联的学生，其余角色返回 None 表示不限制
pub(crate) async fn student_scope(
    storage: &Arc<dyn Storage>,
    request: &HttpRequest,
) -> Result<Option<Vec<i64>>> {
    let (Some(user_id), Some(role)) = (
        RequireJWT::extract_user_id(request),
        RequireJWT::extract_user_role(request),
    ) else {
        return Err(ErpError::authentication("Authentication required"));
    };

    if !role.is_student_scoped() {
        return Ok(None);
    }
    let as_parent = role == UserRole::Parent;
    Ok(Some(storage.list_student_ids_for_user(user_id, as_parent).await?))
}

/// 单条记录是否在可见范围内
pub(crate) fn in_scope(scope: &Option<Vec<i64>>, student_id: i64) -> bool {
    scope.as_ref().is_none_or(|ids| ids.contains(&student_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_error_status_mapping() {
        let cases = [
            (ErpError::validation("bad"), StatusCode::BAD_REQUEST),
            (ErpError::not_found("missing"), StatusCode::NOT_FOUND),
            (ErpError::conflict("dup"), StatusCode::CONFLICT),
            (ErpError::authentication("who"), StatusCode::UNAUTHORIZED),
            (ErpError::authorization("no"), StatusCode::FORBIDDEN),
            (ErpError::database_operation("boom"), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(error_response(&err).status(), status);
        }
    }

    #[test]
    fn test_scope_check() {
        assert!(in_scope(&None, 7));
        assert!(in_scope(&Some(vec![3, 7]), 7));
        assert!(!in_scope(&Some(vec![3]), 7));
        assert!(!in_scope(&Some(vec![]), 7));
    }
}
