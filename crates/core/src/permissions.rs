//! Role names and the per-operation permission matrix.

use std::fmt;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_MEMBER: &str = "member";
pub const ROLE_VIEWER: &str = "viewer";

/// Resource families guarded by the HTTP layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Category,
    Task,
    TaskCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Resource::Category => "category",
            Resource::Task => "task",
            Resource::TaskCategory => "task-category",
        })
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Action::Create => "create",
            Action::Read => "read",
            Action::Update => "update",
            Action::Delete => "delete",
        })
    }
}

/// Whether `role` may perform `action` on `resource`.
///
/// Admins and members have full access within their account; viewers are
/// read-only. Unknown roles are denied everything.
pub fn is_allowed(role: &str, _resource: Resource, action: Action) -> bool {
    match role {
        ROLE_ADMIN | ROLE_MEMBER => true,
        ROLE_VIEWER => action == Action::Read,
        _ => false,
    }
}
