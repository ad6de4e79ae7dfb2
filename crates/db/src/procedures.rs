//! Names of the stored procedures that own all business rules.
//!
//! Every procedure takes `account_id` and `user_id` as its first two
//! arguments. A procedure that rejects a request raises SQLSTATE
//! [`BUSINESS_RULE_SQLSTATE`](crate::error::BUSINESS_RULE_SQLSTATE) with a
//! user-facing message.

pub const CATEGORY_CREATE: &str = "spCategoryCreate";
pub const CATEGORY_LIST: &str = "spCategoryList";
pub const CATEGORY_GET: &str = "spCategoryGet";
pub const CATEGORY_UPDATE: &str = "spCategoryUpdate";
pub const CATEGORY_DELETE: &str = "spCategoryDelete";

pub const TASK_CREATE: &str = "spTaskCreate";
pub const TASK_LIST: &str = "spTaskList";
pub const TASK_GET: &str = "spTaskGet";
pub const TASK_UPDATE: &str = "spTaskUpdate";
pub const TASK_DELETE: &str = "spTaskDelete";

pub const TASK_CATEGORY_LIST: &str = "spTaskCategoryList";
pub const TASK_CATEGORY_CREATE: &str = "spTaskCategoryCreate";
pub const TASK_CATEGORY_DELETE: &str = "spTaskCategoryDelete";

/// Build `SELECT {columns} FROM "{procedure}"($1, .., $n)`.
pub(crate) fn call(procedure: &str, columns: &str, arity: usize) -> String {
    let params = (1..=arity)
        .map(|i| format!("${i}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("SELECT {columns} FROM \"{procedure}\"({params})")
}
