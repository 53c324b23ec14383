use std::sync::Arc;

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use pocketledger_core::goals::{Goal, GoalUpdate, NewGoal};

use crate::{auth::AuthUser, error::ApiResult, main_lib::AppState};

#[utoipa::path(get, path = "/api/goals",
    responses((status = 200, description = "Goals")))]
pub async fn get_goals(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Json<Vec<Goal>>> {
    let goals = state.goal_service.get_goals(&user.user_id)?;
    Ok(Json(goals))
}

#[utoipa::path(post, path = "/api/goals",
    responses((status = 201, description = "Created goal")))]
pub async fn create_goal(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(goal): Json<NewGoal>,
) -> ApiResult<(StatusCode, Json<Goal>)> {
    let g = state.goal_service.create_goal(&user.user_id, goal).await?;
    Ok((StatusCode::CREATED, Json(g)))
}

#[utoipa::path(put, path = "/api/goals/{id}",
    params(("id" = String, Path, description = "Goal id")),
    responses((status = 200, description = "Updated goal"), (status = 404, description = "Unknown goal")))]
pub async fn update_goal(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(mut goal): Json<GoalUpdate>,
) -> ApiResult<Json<Goal>> {
    goal.id = Some(id);
    let g = state.goal_service.update_goal(&user.user_id, goal).await?;
    Ok(Json(g))
}

#[utoipa::path(delete, path = "/api/goals/{id}",
    params(("id" = String, Path, description = "Goal id")),
    responses((status = 204), (status = 404, description = "Unknown goal")))]
pub async fn delete_goal(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.goal_service.delete_goal(&user.user_id, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/goals", get(get_goals).post(create_goal))
        .route("/goals/{id}", put(update_goal).delete(delete_goal))
}
