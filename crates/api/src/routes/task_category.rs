use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::task_category;
use crate::state::AppState;

/// Task/category association routes.
///
/// ```text
/// POST   /task-category                          -> create_task_category
/// GET    /task-category/{id_task}                -> list_task_categories
/// DELETE /task-category/{id_task}/{id_category}  -> delete_task_category
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/task-category", post(task_category::create_task_category))
        .route(
            "/task-category/{id_task}",
            get(task_category::list_task_categories),
        )
        .route(
            "/task-category/{id_task}/{id_category}",
            delete(task_category::delete_task_category),
        )
}
