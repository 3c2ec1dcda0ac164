use super::entities::User;
use serde::Serialize;
use ts_rs::TS;

/// 用户管理接口（创建、查询、更新）返回的单个用户，列表使用 `PaginatedResponse<User>`
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct UserResponse {
    pub user: User,
}
