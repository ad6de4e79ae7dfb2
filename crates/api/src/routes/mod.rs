pub mod category;
pub mod health;
pub mod task;
pub mod task_category;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /category                                  list, create
/// /category/tree                             nested list
/// /category/{id}                             get, update, delete
///
/// /task                                      list (filters), create
/// /task/{id}                                 get, update, delete
///
/// /task-category                             link (POST)
/// /task-category/{id_task}                   categories of a task
/// /task-category/{id_task}/{id_category}     unlink (DELETE)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(category::router())
        .merge(task::router())
        .merge(task_category::router())
}
