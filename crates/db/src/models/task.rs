//! Task rows and request DTOs.

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use taskhub_core::task::{
    validate_due_date, validate_recurrence, validate_title, Priority, RecurrenceConfig,
    TaskStatus,
};
use taskhub_core::types::{DbId, Timestamp};
use taskhub_core::validation::validate_positive_ids;
use validator::Validate;

// ---------------------------------------------------------------------------
// Entity structs (procedure result rows)
// ---------------------------------------------------------------------------

/// A task row as returned by the `spTask*` procedures.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: DbId,
    pub account_id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<Timestamp>,
    #[sqlx(try_from = "i16")]
    pub priority: Priority,
    pub estimated_minutes: Option<i32>,
    pub recurrence: Option<Json<RecurrenceConfig>>,
    #[sqlx(try_from = "i16")]
    pub status: TaskStatus,
    pub deleted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// Body of `POST /task`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTask {
    #[validate(custom(function = "validate_title"))]
    pub title: String,
    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,
    #[validate(custom(function = "validate_due_date"))]
    pub due_date: Option<Timestamp>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(alias = "estimatedTime")]
    #[validate(range(
        min = 5,
        max = 1440,
        message = "Estimated time must be between 5 and 1440 minutes"
    ))]
    pub estimated_minutes: Option<i32>,
    #[serde(alias = "recurrenceConfig")]
    #[validate(custom(function = "validate_recurrence"))]
    pub recurrence: Option<RecurrenceConfig>,
    /// Categories to associate with the new task.
    #[serde(default)]
    #[validate(custom(function = "validate_positive_ids"))]
    pub category_ids: Vec<DbId>,
}

/// Body of `PUT /task/{id}`. Replaces every editable field.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTask {
    #[validate(custom(function = "validate_title"))]
    pub title: String,
    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,
    pub due_date: Option<Timestamp>,
    pub priority: Priority,
    #[serde(alias = "estimatedTime")]
    #[validate(range(
        min = 5,
        max = 1440,
        message = "Estimated time must be between 5 and 1440 minutes"
    ))]
    pub estimated_minutes: Option<i32>,
    #[serde(alias = "recurrenceConfig")]
    #[validate(custom(function = "validate_recurrence"))]
    pub recurrence: Option<RecurrenceConfig>,
    pub status: TaskStatus,
}

/// Query parameters for `GET /task`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskListParams {
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
    pub category_id: Option<DbId>,
}
