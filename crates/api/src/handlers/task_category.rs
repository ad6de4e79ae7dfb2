//! Handlers for task/category associations.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use taskhub_core::error::CoreError;
use taskhub_core::permissions::{Action, Resource};
use taskhub_core::types::DbId;
use taskhub_db::models::task_category::CreateTaskCategory;

use crate::error::{AppError, AppResult};
use crate::extract::{ApiPath, PathId, ValidatedJson};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::require_permission;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Unlinked {
    pub task_id: DbId,
    pub category_id: DbId,
}

/// GET /api/v1/task-category/{idTask}
///
/// Categories linked to a task, with their display fields.
pub async fn list_task_categories(
    auth: AuthUser,
    State(state): State<AppState>,
    ApiPath(PathId(task_id)): ApiPath<PathId>,
) -> AppResult<impl IntoResponse> {
    require_permission(&auth, Resource::TaskCategory, Action::Read)?;

    let rows = state
        .stores
        .task_categories
        .list(auth.scope(), task_id)
        .await?;

    Ok(Json(DataResponse::new(rows)))
}

/// POST /api/v1/task-category
pub async fn create_task_category(
    auth: AuthUser,
    State(state): State<AppState>,
    body: Result<ValidatedJson<CreateTaskCategory>, AppError>,
) -> AppResult<impl IntoResponse> {
    require_permission(&auth, Resource::TaskCategory, Action::Create)?;
    let ValidatedJson(input) = body?;

    let link = state
        .stores
        .task_categories
        .create(auth.scope(), &input)
        .await?;

    tracing::info!(
        task_id = link.task_id,
        category_id = link.category_id,
        user_id = auth.user_id,
        "Task linked to category",
    );

    Ok((StatusCode::CREATED, Json(DataResponse::new(link))))
}

/// DELETE /api/v1/task-category/{idTask}/{idCategory}
pub async fn delete_task_category(
    auth: AuthUser,
    State(state): State<AppState>,
    ApiPath((PathId(task_id), PathId(category_id))): ApiPath<(PathId, PathId)>,
) -> AppResult<impl IntoResponse> {
    require_permission(&auth, Resource::TaskCategory, Action::Delete)?;

    let removed = state
        .stores
        .task_categories
        .delete(auth.scope(), task_id, category_id)
        .await?;

    if !removed {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "TaskCategory",
            id: category_id,
        }));
    }

    tracing::info!(task_id, category_id, user_id = auth.user_id, "Task unlinked from category");

    Ok(Json(DataResponse::new(Unlinked {
        task_id,
        category_id,
    })))
}
