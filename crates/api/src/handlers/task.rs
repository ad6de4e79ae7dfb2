//! Handlers for tasks.
//!
//! `POST /task` also links the task to any `categoryIds` in the payload,
//! one `spTaskCategoryCreate` call per distinct id. Every listed category
//! must exist before the task is created.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use taskhub_core::error::CoreError;
use taskhub_core::permissions::{Action, Resource};
use taskhub_core::types::DbId;
use taskhub_db::models::task::{CreateTask, Task, TaskListParams, UpdateTask};
use taskhub_db::error::StoreError;
use taskhub_db::models::task_category::CreateTaskCategory;

use crate::error::{AppError, AppResult};
use crate::extract::{ApiPath, ApiQuery, PathId, ValidatedJson};
use crate::handlers::category::Deleted;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::require_permission;
use crate::response::DataResponse;
use crate::state::AppState;

/// A newly created task together with the categories it was linked to.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedTask {
    #[serde(flatten)]
    pub task: Task,
    pub category_ids: Vec<DbId>,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Task", id })
}

/// GET /api/v1/task
///
/// Optional filters: `status`, `priority`, `categoryId`.
pub async fn list_tasks(
    auth: AuthUser,
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<TaskListParams>,
) -> AppResult<impl IntoResponse> {
    require_permission(&auth, Resource::Task, Action::Read)?;

    let tasks = state.stores.tasks.list(auth.scope(), &params).await?;

    Ok(Json(DataResponse::new(tasks)))
}

/// POST /api/v1/task
pub async fn create_task(
    auth: AuthUser,
    State(state): State<AppState>,
    body: Result<ValidatedJson<CreateTask>, AppError>,
) -> AppResult<impl IntoResponse> {
    require_permission(&auth, Resource::Task, Action::Create)?;
    let ValidatedJson(input) = body?;

    let scope = auth.scope();

    let mut category_ids: Vec<DbId> = Vec::with_capacity(input.category_ids.len());
    for &category_id in &input.category_ids {
        if category_ids.contains(&category_id) {
            continue;
        }
        // Checked up front so an unknown category does not leave an orphan task.
        if state.stores.categories.get(scope, category_id).await?.is_none() {
            return Err(AppError::Store(StoreError::rule(format!(
                "Category {category_id} not found"
            ))));
        }
        category_ids.push(category_id);
    }

    let task = state.stores.tasks.create(scope, &input).await?;

    for &category_id in &category_ids {
        state
            .stores
            .task_categories
            .create(
                scope,
                &CreateTaskCategory {
                    task_id: task.id,
                    category_id,
                },
            )
            .await?;
    }

    tracing::info!(
        task_id = task.id,
        categories = category_ids.len(),
        account_id = auth.account_id,
        user_id = auth.user_id,
        "Task created",
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new(CreatedTask { task, category_ids })),
    ))
}

/// GET /api/v1/task/{id}
pub async fn get_task(
    auth: AuthUser,
    State(state): State<AppState>,
    ApiPath(PathId(id)): ApiPath<PathId>,
) -> AppResult<impl IntoResponse> {
    require_permission(&auth, Resource::Task, Action::Read)?;

    let task = state
        .stores
        .tasks
        .get(auth.scope(), id)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(DataResponse::new(task)))
}

/// PUT /api/v1/task/{id}
pub async fn update_task(
    auth: AuthUser,
    State(state): State<AppState>,
    ApiPath(PathId(id)): ApiPath<PathId>,
    body: Result<ValidatedJson<UpdateTask>, AppError>,
) -> AppResult<impl IntoResponse> {
    require_permission(&auth, Resource::Task, Action::Update)?;
    let ValidatedJson(input) = body?;

    let task = state
        .stores
        .tasks
        .update(auth.scope(), id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(task_id = id, status = ?task.status, user_id = auth.user_id, "Task updated");

    Ok(Json(DataResponse::new(task)))
}

/// DELETE /api/v1/task/{id}
pub async fn delete_task(
    auth: AuthUser,
    State(state): State<AppState>,
    ApiPath(PathId(id)): ApiPath<PathId>,
) -> AppResult<impl IntoResponse> {
    require_permission(&auth, Resource::Task, Action::Delete)?;

    if !state.stores.tasks.delete(auth.scope(), id).await? {
        return Err(not_found(id));
    }

    tracing::info!(task_id = id, user_id = auth.user_id, "Task deleted");

    Ok(Json(DataResponse::new(Deleted { id })))
}
