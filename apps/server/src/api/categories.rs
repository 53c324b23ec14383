use std::sync::Arc;

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use pocketledger_core::categories::{Category, NewCategory};

use crate::{auth::AuthUser, error::ApiResult, main_lib::AppState};

#[utoipa::path(get, path = "/api/categories",
    responses((status = 200, description = "Categories")))]
pub async fn list_categories(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Json<Vec<Category>>> {
    let categories = state.category_service.list_categories(&user.user_id)?;
    Ok(Json(categories))
}

#[utoipa::path(post, path = "/api/categories",
    responses((status = 201, description = "Created category")))]
pub async fn create_category(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(category): Json<NewCategory>,
) -> ApiResult<(StatusCode, Json<Category>)> {
    let created = state
        .category_service
        .create_category(&user.user_id, category)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Categories still referenced by transactions or recurrences answer 409.
#[utoipa::path(delete, path = "/api/categories/{id}",
    params(("id" = String, Path, description = "Category id")),
    responses((status = 204), (status = 409, description = "Category still in use")))]
pub async fn delete_category(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state
        .category_service
        .delete_category(&user.user_id, &id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/categories", get(list_categories).post(create_category))
        .route("/categories/{id}", delete(delete_category))
}
