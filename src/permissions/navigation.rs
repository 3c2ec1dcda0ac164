use serde::Serialize;
use ts_rs::TS;

use super::{Action, Module, PermissionMap, can};

/// 侧边栏菜单项
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/permissions.ts")]
pub struct NavItem {
    pub label: String,
    pub path: String,
    pub module: Module,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavItem>,
}

struct NavEntry {
    label: &'static str,
    path: &'static str,
    module: Module,
    children: &'static [NavEntry],
}

const fn leaf(label: &'static str, path: &'static str, module: Module) -> NavEntry {
    NavEntry {
        label,
        path,
        module,
        children: &[],
    }
}

const NAVIGATION: &[NavEntry] = &[
    leaf("Dashboard", "/dashboard", Module::Dashboard),
    NavEntry {
        label: "Academics",
        path: "/academics",
        module: Module::Dashboard,
        children: &[
            leaf("Students", "/students", Module::Students),
            leaf("Teachers", "/teachers", Module::Teachers),
            leaf("Classes", "/classes", Module::Classes),
            leaf("Subjects", "/subjects", Module::Subjects),
            leaf("Attendance", "/attendance", Module::Attendance),
        ],
    },
    NavEntry {
        label: "Examinations",
        path: "/examinations",
        module: Module::Dashboard,
        children: &[
            leaf("Exams", "/exams", Module::Exams),
            leaf("Hall Tickets", "/hall-tickets", Module::HallTickets),
            leaf("Results", "/results", Module::Results),
        ],
    },
    NavEntry {
        label: "Finance",
        path: "/finance",
        module: Module::Dashboard,
        children: &[
            leaf("Fees", "/fees", Module::Fees),
            leaf("Fee Structures", "/fee-structures", Module::FeeStructures),
        ],
    },
    leaf("Transport", "/transport", Module::Transport),
    leaf("Library", "/library", Module::Library),
    leaf("Certificates", "/certificates", Module::Certificates),
    leaf("Communication", "/communication", Module::Communication),
    leaf("Learning", "/lms", Module::Lms),
    leaf("Health Records", "/health-records", Module::HealthRecords),
    leaf("Inquiries", "/inquiries", Module::Inquiries),
    leaf("Reports", "/reports", Module::Reports),
    leaf("Users", "/users", Module::Users),
    leaf("Settings", "/settings", Module::Settings),
];

fn filter_entries(entries: &[NavEntry], map: &PermissionMap) -> Vec<NavItem> {
    entries
        .iter()
        .filter_map(|entry| {
            if entry.children.is_empty() {
                can(map, entry.module, Action::View).then(|| NavItem {
                    label: entry.label.to_string(),
                    path: entry.path.to_string(),
                    module: entry.module,
                    children: Vec::new(),
                })
            } else {
                // 分组本身不单独鉴权，没有可见子项时整体隐藏
                let children = filter_entries(entry.children, map);
                (!children.is_empty()).then(|| NavItem {
                    label: entry.label.to_string(),
                    path: entry.path.to_string(),
                    module: entry.module,
                    children,
                })
            }
        })
        .collect()
}

/// 按权限过滤导航菜单，只保留有查看权限的项
pub fn navigation_for(map: &PermissionMap) -> Vec<NavItem> {
    filter_entries(NAVIGATION, map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permissions::permissions_for_role;

    fn labels(items: &[NavItem]) -> Vec<&str> {
        items.iter().map(|i| i.label.as_str()).collect()
    }

    #[test]
    fn test_unknown_role_sees_nothing() {
        let items = navigation_for(&permissions_for_role("guest"));
        assert!(items.is_empty());
    }

    #[test]
    fn test_admin_sees_full_tree() {
        let items = navigation_for(&permissions_for_role("admin"));
        assert_eq!(items.len(), NAVIGATION.len());
        let academics = items.iter().find(|i| i.label == "Academics").unwrap();
        assert_eq!(academics.children.len(), 5);
    }

    #[test]
    fn test_staff_groups_without_children_are_dropped() {
        let items = navigation_for(&permissions_for_role("staff"));
        let top = labels(&items);
        assert!(top.contains(&"Library"));
        assert!(top.contains(&"Transport"));
        assert!(!top.contains(&"Academics"));
        assert!(!top.contains(&"Finance"));
        assert!(!top.contains(&"Users"));
    }

    #[test]
    fn test_student_finance_group_only_has_fees() {
        let items = navigation_for(&permissions_for_role("student"));
        let finance = items.iter().find(|i| i.label == "Finance").unwrap();
        assert_eq!(labels(&finance.children), vec!["Fees"]);
    }
}
