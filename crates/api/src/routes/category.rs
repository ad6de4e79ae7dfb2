use axum::routing::get;
use axum::Router;

use crate::handlers::category;
use crate::state::AppState;

/// Category routes, merged at the `/api/v1` root.
///
/// ```text
/// GET    /category          -> list_categories
/// POST   /category          -> create_category
/// GET    /category/tree     -> category_tree
/// GET    /category/{id}     -> get_category
/// PUT    /category/{id}     -> update_category
/// DELETE /category/{id}     -> delete_category
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/category",
            get(category::list_categories).post(category::create_category),
        )
        .route("/category/tree", get(category::category_tree))
        .route(
            "/category/{id}",
            get(category::get_category)
                .put(category::update_category)
                .delete(category::delete_category),
        )
}
