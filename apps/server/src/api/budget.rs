use std::sync::Arc;

use axum::{
    extract::{Extension, Path, State},
    routing::{get, post},
    Json, Router,
};
use pocketledger_core::budgets::{Budget, BudgetOverview, NewBudget};

use crate::{auth::AuthUser, error::ApiResult, main_lib::AppState};

/// Answers `null` when neither a specific nor an applicable default budget exists.
#[utoipa::path(get, path = "/api/budget/{month}/{year}",
    params(("month" = u32, Path, description = "Month, 1-12"), ("year" = i32, Path, description = "Year")),
    responses((status = 200, description = "Budget in force, or null")))]
pub async fn resolve_budget(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path((month, year)): Path<(u32, i32)>,
) -> ApiResult<Json<Option<Budget>>> {
    let budget = state
        .budget_service
        .resolve_budget(&user.user_id, month, year)?;
    Ok(Json(budget))
}

#[utoipa::path(get, path = "/api/budget/{month}/{year}/overview",
    params(("month" = u32, Path, description = "Month, 1-12"), ("year" = i32, Path, description = "Year")),
    responses((status = 200, description = "Budget shares with actual spending")))]
pub async fn get_overview(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path((month, year)): Path<(u32, i32)>,
) -> ApiResult<Json<BudgetOverview>> {
    let overview = state
        .budget_service
        .get_budget_overview(&user.user_id, month, year)?;
    Ok(Json(overview))
}

#[utoipa::path(post, path = "/api/budget",
    responses(
        (status = 200, description = "Stored budget"),
        (status = 400, description = "Invalid month or income"),
    ))]
pub async fn upsert_budget(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(budget): Json<NewBudget>,
) -> ApiResult<Json<Budget>> {
    let stored = state
        .budget_service
        .upsert_budget(&user.user_id, budget)
        .await?;
    Ok(Json(stored))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/budget", post(upsert_budget))
        .route("/budget/{month}/{year}", get(resolve_budget))
        .route("/budget/{month}/{year}/overview", get(get_overview))
}
