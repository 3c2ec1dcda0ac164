use super::{Module, ModulePermission, PermissionMap};
use crate::models::users::entities::UserRole;

type RoleGrant = (Module, &'static str);

const TEACHER_GRANTS: &[RoleGrant] = &[
    (Module::Dashboard, "V"),
    (Module::Students, "VE"),
    (Module::Teachers, "V"),
    (Module::Classes, "V"),
    (Module::Subjects, "V"),
    (Module::Attendance, "VCUE"),
    (Module::Exams, "V"),
    (Module::HallTickets, "V"),
    (Module::Results, "VCUE"),
    (Module::Library, "V"),
    (Module::Communication, "VC"),
    (Module::Lms, "VCUD"),
    (Module::HealthRecords, "V"),
    (Module::Reports, "V"),
];

const STUDENT_GRANTS: &[RoleGrant] = &[
    (Module::Dashboard, "V"),
    (Module::Exams, "V"),
    (Module::HallTickets, "V"),
    (Module::Results, "V"),
    (Module::Fees, "V"),
    (Module::Transport, "V"),
    (Module::Library, "V"),
    (Module::Certificates, "V"),
    (Module::Communication, "V"),
    (Module::Lms, "VC"),
];

const PARENT_GRANTS: &[RoleGrant] = &[
    (Module::Dashboard, "V"),
    (Module::Students, "V"),
    (Module::Attendance, "V"),
    (Module::Exams, "V"),
    (Module::HallTickets, "V"),
    (Module::Results, "V"),
    (Module::Fees, "V"),
    (Module::Transport, "V"),
    (Module::Certificates, "V"),
    (Module::Communication, "V"),
    (Module::HealthRecords, "V"),
];

const CLERK_GRANTS: &[RoleGrant] = &[
    (Module::Dashboard, "V"),
    (Module::Students, "VCUE"),
    (Module::Classes, "V"),
    (Module::Fees, "VCUE"),
    (Module::FeeStructures, "VCUE"),
    (Module::Transport, "VCUE"),
    (Module::HallTickets, "VCUE"),
    (Module::Certificates, "VCUE"),
    (Module::Inquiries, "VCUDE"),
    (Module::Communication, "VC"),
    (Module::Library, "V"),
    (Module::Reports, "VE"),
];

const STAFF_GRANTS: &[RoleGrant] = &[
    (Module::Dashboard, "V"),
    (Module::Library, "VCUE"),
    (Module::Transport, "VCU"),
    (Module::HealthRecords, "VCU"),
    (Module::Communication, "V"),
    (Module::Inquiries, "VCU"),
];

fn build(grants: &[RoleGrant]) -> PermissionMap {
    grants
        .iter()
        .map(|(module, flags)| (*module, ModulePermission::from_flags(flags)))
        .collect()
}

/// 根据角色枚举获取权限映射
pub fn permissions_for_user_role(role: &UserRole) -> PermissionMap {
    match role {
        UserRole::Admin => Module::ALL
            .iter()
            .map(|module| (*module, ModulePermission::FULL))
            .collect(),
        UserRole::Teacher => build(TEACHER_GRANTS),
        UserRole::Student => build(STUDENT_GRANTS),
        UserRole::Parent => build(PARENT_GRANTS),
        UserRole::Clerk => build(CLERK_GRANTS),
        UserRole::Staff => build(STAFF_GRANTS),
    }
}

/// 根据角色字符串获取权限映射，未知角色返回空映射
pub fn permissions_for_role(role: &str) -> PermissionMap {
    match role.parse::<UserRole>() {
        Ok(role) => permissions_for_user_role(&role),
        Err(_) => PermissionMap::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permissions::{Action, can};

    #[test]
    fn test_admin_has_everything() {
        let map = permissions_for_role("admin");
        assert_eq!(map.len(), Module::ALL.len());
        for module in Module::ALL {
            for action in [
                Action::View,
                Action::Create,
                Action::Update,
                Action::Delete,
                Action::Export,
            ] {
                assert!(can(&map, module, action), "admin denied {module}.{action}");
            }
        }
    }

    #[test]
    fn test_unknown_role_is_empty() {
        assert!(permissions_for_role("principal").is_empty());
        assert!(permissions_for_role("").is_empty());
        assert!(permissions_for_role("Admin").is_empty());
    }

    #[test]
    fn test_clerk_manages_fees_but_cannot_delete() {
        let map = permissions_for_role("clerk");
        assert!(can(&map, Module::Fees, Action::Create));
        assert!(can(&map, Module::Fees, Action::Export));
        assert!(!can(&map, Module::Fees, Action::Delete));
        assert!(!can(&map, Module::Results, Action::View));
        assert!(!can(&map, Module::Users, Action::View));
    }

    #[test]
    fn test_student_and_parent_are_read_only_for_fees() {
        for role in ["student", "parent"] {
            let map = permissions_for_role(role);
            assert!(can(&map, Module::Fees, Action::View));
            assert!(!can(&map, Module::Fees, Action::Create));
            assert!(!can(&map, Module::Fees, Action::Update));
        }
    }

    #[test]
    fn test_teacher_enters_results() {
        let map = permissions_for_role("teacher");
        assert!(can(&map, Module::Results, Action::Create));
        assert!(can(&map, Module::Results, Action::Update));
        assert!(!can(&map, Module::Results, Action::Delete));
        assert!(!can(&map, Module::Fees, Action::View));
    }

    #[test]
    fn test_staff_runs_library() {
        let map = permissions_for_role("staff");
        assert!(can(&map, Module::Library, Action::Create));
        assert!(!can(&map, Module::Library, Action::Delete));
        assert!(!can(&map, Module::Students, Action::View));
    }

    #[test]
    fn test_every_role_sees_dashboard() {
        for role in UserRole::all_roles() {
            let map = permissions_for_user_role(role);
            assert!(can(&map, Module::Dashboard, Action::View), "{role}");
        }
    }
}
