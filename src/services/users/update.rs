use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::UserService;
use crate::errors::ErpError;
use crate::models::{
    ApiResponse, ErrorCode,
    users::{entities::UserRole, requests::UpdateUserRequest, responses::UserResponse},
};
use crate::services::{error_response, not_found_response};
use crate::utils::password::hash_password;
use crate::utils::validate::{normalize_phone, validate_email, validate_password_simple, validate_phone};

/// 学生或家长账号改角色时需要检查的关联方向；返回 `Some(as_parent)`
fn linked_role_check(current: UserRole, requested: UserRole) -> Option<bool> {
    (current != requested && current.is_student_scoped()).then_some(current == UserRole::Parent)
}

fn bad_request(code: ErrorCode, msg: &str) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(code, msg))
}

pub async fn update_user(
    service: &UserService,
    user_id: i64,
    mut update_data: UpdateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Some(email) = &update_data.email
        && let Err(msg) = validate_email(email)
    {
        return Ok(bad_request(ErrorCode::UserEmailInvalid, msg));
    }

    if let Some(phone) = update_data.phone.as_deref().filter(|p| !p.trim().is_empty()) {
        if let Err(msg) = validate_phone(phone) {
            return Ok(bad_request(ErrorCode::ValidationFailed, msg));
        }
        update_data.phone = Some(normalize_phone(phone));
    }

    if let Some(password) = update_data.password.take() {
        if let Err(msg) = validate_password_simple(&password) {
            return Ok(bad_request(ErrorCode::UserPasswordInvalid, &msg));
        }
        match hash_password(&password) {
            Ok(hash) => update_data.password = Some(hash),
            Err(e) => return Ok(error_response(&e)),
        }
    }

    let storage = service.get_storage(request)?;

    // 已关联学籍的学生/家长账号不能直接改角色，否则数据可见范围会失效
    if let Some(role) = update_data.role {
        let current = match storage.get_user_by_id(user_id).await {
            Ok(Some(user)) => user,
            Ok(None) => return Ok(not_found_response(ErrorCode::UserNotFound, "User not found")),
            Err(e) => return Ok(error_response(&e)),
        };
        if let Some(as_parent) = linked_role_check(current.role, role) {
            match storage.list_student_ids_for_user(user_id, as_parent).await {
                Ok(ids) if !ids.is_empty() => {
                    return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                        ErrorCode::UserRoleLocked,
                        format!(
                            "User is linked to {} student record(s) as {}; unlink them before changing the role",
                            ids.len(),
                            current.role
                        ),
                    )));
                }
                Ok(_) => {}
                Err(e) => return Ok(error_response(&e)),
            }
        }
    }

    let access_changed = update_data.role.is_some() || update_data.status.is_some();

    match storage.update_user(user_id, update_data).await {
        Ok(Some(user)) => {
            if access_changed {
                info!("Access of user {} changed to {} ({})", user.id, user.role, user.status);
                service.evict_cached_users(request).await;
            }
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                UserResponse { user },
                "User information updated successfully",
            )))
        }
        Ok(None) => Ok(not_found_response(ErrorCode::UserNotFound, "User not found")),
        Err(ErpError::Conflict(_)) => Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::UserAlreadyExists,
            "Email already in use",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linked_role_check() {
        assert_eq!(linked_role_check(UserRole::Parent, UserRole::Staff), Some(true));
        assert_eq!(linked_role_check(UserRole::Student, UserRole::Parent), Some(false));
        assert_eq!(linked_role_check(UserRole::Parent, UserRole::Parent), None);
        assert_eq!(linked_role_check(UserRole::Teacher, UserRole::Admin), None);
        assert_eq!(linked_role_check(UserRole::Clerk, UserRole::Parent), None);
    }
}
