use axum::routing::get;
use axum::Router;

use crate::handlers::task;
use crate::state::AppState;

/// Task routes.
///
/// ```text
/// GET    /task          -> list_tasks
/// POST   /task          -> create_task
/// GET    /task/{id}     -> get_task
/// PUT    /task/{id}     -> update_task
/// DELETE /task/{id}     -> delete_task
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/task", get(task::list_tasks).post(task::create_task))
        .route(
            "/task/{id}",
            get(task::get_task)
                .put(task::update_task)
                .delete(task::delete_task),
        )
}
