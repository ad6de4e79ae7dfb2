//! Task/category association rows and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use taskhub_core::types::{DbId, Timestamp};
use validator::Validate;

/// A row from the task/category junction.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCategory {
    pub account_id: DbId,
    pub task_id: DbId,
    pub category_id: DbId,
    pub created_at: Timestamp,
}

/// Association joined with the category's display fields, as returned by
/// `spTaskCategoryList`.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCategoryDetail {
    pub task_id: DbId,
    pub category_id: DbId,
    pub name: String,
    pub color: String,
    pub icon: Option<String>,
    pub level: i16,
    pub created_at: Timestamp,
}

/// Body of `POST /task-category`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskCategory {
    #[serde(alias = "idTask")]
    #[validate(range(min = 1, message = "Task id must be positive"))]
    pub task_id: DbId,
    #[serde(alias = "idCategory")]
    #[validate(range(min = 1, message = "Category id must be positive"))]
    pub category_id: DbId,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn accepts_both_id_spellings() {
        let a: CreateTaskCategory =
            serde_json::from_value(json!({ "taskId": 1, "categoryId": 2 })).unwrap();
        let b: CreateTaskCategory =
            serde_json::from_value(json!({ "idTask": 1, "idCategory": 2 })).unwrap();
        assert_eq!((a.task_id, a.category_id), (b.task_id, b.category_id));
    }
}
