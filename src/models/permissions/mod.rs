use serde::Serialize;
use ts_rs::TS;

use crate::permissions::{NavItem, PermissionMap};

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/permissions.ts")]
pub struct PermissionsResponse {
    pub role: String,
    #[ts(type = "Record<string, ModulePermission>")]
    pub permissions: PermissionMap,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/permissions.ts")]
pub struct NavigationResponse {
    pub items: Vec<NavItem>,
}
