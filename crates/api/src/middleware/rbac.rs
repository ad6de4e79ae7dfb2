//! Per-operation permission checks.
//!
//! Every handler states the resource and action it performs; the check runs
//! before any store call.

use taskhub_core::error::CoreError;
use taskhub_core::permissions::{is_allowed, Action, Resource};

use super::auth::AuthUser;
use crate::error::{AppError, AppResult};

/// Reject with 403 Forbidden unless `user` may perform `action` on `resource`.
///
/// ```ignore
/// require_permission(&auth, Resource::Category, Action::Delete)?;
/// ```
pub fn require_permission(user: &AuthUser, resource: Resource, action: Action) -> AppResult<()> {
    if is_allowed(&user.role, resource, action) {
        return Ok(());
    }

    tracing::warn!(
        user_id = user.user_id,
        account_id = user.account_id,
        role = %user.role,
        %resource,
        %action,
        "Permission denied",
    );

    Err(AppError::Core(CoreError::Forbidden(format!(
        "Permission '{resource}:{action}' required"
    ))))
}
