//! Handlers for categories and the category tree.
//!
//! All endpoints require authentication via [`AuthUser`] and a
//! `category:*` permission.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use taskhub_core::category::build_tree;
use taskhub_core::error::CoreError;
use taskhub_core::permissions::{Action, Resource};
use taskhub_core::types::DbId;
use taskhub_db::models::category::{CreateCategory, UpdateCategory};

use crate::error::{AppError, AppResult};
use crate::extract::{ApiPath, PathId, ValidatedJson};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::require_permission;
use crate::response::DataResponse;
use crate::state::AppState;

/// Payload returned by delete endpoints.
#[derive(Debug, Serialize)]
pub struct Deleted {
    pub id: DbId,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Category",
        id,
    })
}

/// GET /api/v1/category
///
/// List every live category in the caller's account, ordered by level and name.
pub async fn list_categories(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    require_permission(&auth, Resource::Category, Action::Read)?;

    let categories = state.stores.categories.list(auth.scope()).await?;

    Ok(Json(DataResponse::new(categories)))
}

/// GET /api/v1/category/tree
///
/// The same rows as [`list_categories`], nested by parent.
pub async fn category_tree(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    require_permission(&auth, Resource::Category, Action::Read)?;

    let categories = state.stores.categories.list(auth.scope()).await?;

    Ok(Json(DataResponse::new(build_tree(categories))))
}

/// POST /api/v1/category
pub async fn create_category(
    auth: AuthUser,
    State(state): State<AppState>,
    body: Result<ValidatedJson<CreateCategory>, AppError>,
) -> AppResult<impl IntoResponse> {
    require_permission(&auth, Resource::Category, Action::Create)?;
    let ValidatedJson(input) = body?;

    let category = state.stores.categories.create(auth.scope(), &input).await?;

    tracing::info!(
        category_id = category.id,
        parent_id = ?category.parent_id,
        level = category.level,
        account_id = auth.account_id,
        user_id = auth.user_id,
        "Category created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse::new(category))))
}

/// GET /api/v1/category/{id}
pub async fn get_category(
    auth: AuthUser,
    State(state): State<AppState>,
    ApiPath(PathId(id)): ApiPath<PathId>,
) -> AppResult<impl IntoResponse> {
    require_permission(&auth, Resource::Category, Action::Read)?;

    let category = state
        .stores
        .categories
        .get(auth.scope(), id)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(DataResponse::new(category)))
}

/// PUT /api/v1/category/{id}
pub async fn update_category(
    auth: AuthUser,
    State(state): State<AppState>,
    ApiPath(PathId(id)): ApiPath<PathId>,
    body: Result<ValidatedJson<UpdateCategory>, AppError>,
) -> AppResult<impl IntoResponse> {
    require_permission(&auth, Resource::Category, Action::Update)?;
    let ValidatedJson(input) = body?;

    let category = state
        .stores
        .categories
        .update(auth.scope(), id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(
        category_id = id,
        account_id = auth.account_id,
        user_id = auth.user_id,
        "Category updated",
    );

    Ok(Json(DataResponse::new(category)))
}

/// DELETE /api/v1/category/{id}
///
/// Soft-deletes the category and removes its task associations. Default
/// categories are refused by the store.
pub async fn delete_category(
    auth: AuthUser,
    State(state): State<AppState>,
    ApiPath(PathId(id)): ApiPath<PathId>,
) -> AppResult<impl IntoResponse> {
    require_permission(&auth, Resource::Category, Action::Delete)?;

    if !state.stores.categories.delete(auth.scope(), id).await? {
        return Err(not_found(id));
    }

    tracing::info!(
        category_id = id,
        account_id = auth.account_id,
        user_id = auth.user_id,
        "Category deleted",
    );

    Ok(Json(DataResponse::new(Deleted { id })))
}
