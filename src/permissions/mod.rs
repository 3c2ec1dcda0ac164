//! 角色权限表
//!
//! 每个角色对应一份固定的 `模块 -> {view, create, update, delete, export}` 映射。
//! 前端登录后获取这份映射用于隐藏菜单和按钮，服务端通过
//! [`RequirePermission`](crate::middlewares::RequirePermission) 中间件做同样的校验。

pub mod navigation;
pub mod table;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ts_rs::TS;

pub use navigation::{NavItem, navigation_for};
pub use table::{permissions_for_role, permissions_for_user_role};

/// 业务模块
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/permissions.ts")]
pub enum Module {
    Dashboard,
    Users,
    Students,
    Teachers,
    Classes,
    Subjects,
    Attendance,
    Exams,
    HallTickets,
    Results,
    Fees,
    FeeStructures,
    Transport,
    Library,
    Certificates,
    Communication,
    Lms,
    HealthRecords,
    Inquiries,
    Reports,
    Settings,
}

impl Module {
    pub const ALL: [Module; 21] = [
        Module::Dashboard,
        Module::Users,
        Module::Students,
        Module::Teachers,
        Module::Classes,
        Module::Subjects,
        Module::Attendance,
        Module::Exams,
        Module::HallTickets,
        Module::Results,
        Module::Fees,
        Module::FeeStructures,
        Module::Transport,
        Module::Library,
        Module::Certificates,
        Module::Communication,
        Module::Lms,
        Module::HealthRecords,
        Module::Inquiries,
        Module::Reports,
        Module::Settings,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Module::Dashboard => "dashboard",
            Module::Users => "users",
            Module::Students => "students",
            Module::Teachers => "teachers",
            Module::Classes => "classes",
            Module::Subjects => "subjects",
            Module::Attendance => "attendance",
            Module::Exams => "exams",
            Module::HallTickets => "hall_tickets",
            Module::Results => "results",
            Module::Fees => "fees",
            Module::FeeStructures => "fee_structures",
            Module::Transport => "transport",
            Module::Library => "library",
            Module::Certificates => "certificates",
            Module::Communication => "communication",
            Module::Lms => "lms",
            Module::HealthRecords => "health_records",
            Module::Inquiries => "inquiries",
            Module::Reports => "reports",
            Module::Settings => "settings",
        }
    }
}

impl std::fmt::Display for Module {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 操作类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/permissions.ts")]
pub enum Action {
    View,
    Create,
    Update,
    Delete,
    Export,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Action::View => "view",
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::Export => "export",
        };
        f.write_str(s)
    }
}

/// 单个模块的权限开关
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/permissions.ts")]
pub struct ModulePermission {
    pub view: bool,
    pub create: bool,
    pub update: bool,
    pub delete: bool,
    pub export: bool,
}

impl ModulePermission {
    pub const NONE: ModulePermission = ModulePermission {
        view: false,
        create: false,
        update: false,
        delete: false,
        export: false,
    };

    pub const FULL: ModulePermission = ModulePermission {
        view: true,
        create: true,
        update: true,
        delete: true,
        export: true,
    };

    /// 由 "VCUDE" 形式的简写构造，例如 `"VCUE"`
    pub const fn from_flags(flags: &str) -> Self {
        let bytes = flags.as_bytes();
        let mut perm = Self::NONE;
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'V' => perm.view = true,
                b'C' => perm.create = true,
                b'U' => perm.update = true,
                b'D' => perm.delete = true,
                b'E' => perm.export = true,
                _ => {}
            }
            i += 1;
        }
        perm
    }

    pub fn allows(&self, action: Action) -> bool {
        match action {
            Action::View => self.view,
            Action::Create => self.create,
            Action::Update => self.update,
            Action::Delete => self.delete,
            Action::Export => self.export,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::NONE
    }
}

/// 角色的完整权限映射，未列出的模块视为无权限
pub type PermissionMap = BTreeMap<Module, ModulePermission>;

/// 检查权限映射是否允许某模块的某操作
pub fn can(map: &PermissionMap, module: Module, action: Action) -> bool {
    map.get(&module).is_some_and(|perm| perm.allows(action))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_flags() {
        let perm = ModulePermission::from_flags("VCE");
        assert!(perm.view);
        assert!(perm.create);
        assert!(!perm.update);
        assert!(!perm.delete);
        assert!(perm.export);
        assert_eq!(ModulePermission::from_flags("VCUDE"), ModulePermission::FULL);
        assert!(ModulePermission::from_flags("").is_empty());
    }

    #[test]
    fn test_can_missing_module_is_denied() {
        let mut map = PermissionMap::new();
        map.insert(Module::Fees, ModulePermission::from_flags("V"));
        assert!(can(&map, Module::Fees, Action::View));
        assert!(!can(&map, Module::Fees, Action::Delete));
        assert!(!can(&map, Module::Library, Action::View));
    }

    #[test]
    fn test_module_serializes_snake_case() {
        let json = serde_json::to_string(&Module::HallTickets).unwrap();
        assert_eq!(json, "\"hall_tickets\"");
        assert_eq!(Module::FeeStructures.to_string(), "fee_structures");
    }
}
