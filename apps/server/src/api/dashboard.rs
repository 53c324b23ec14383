use std::sync::Arc;

use axum::{
    extract::{Extension, Path, State},
    routing::get,
    Json, Router,
};
use pocketledger_core::dashboard::DashboardSummary;

use crate::{auth::AuthUser, error::ApiResult, main_lib::AppState};

#[utoipa::path(get, path = "/api/dashboard/{month}/{year}",
    params(("month" = u32, Path, description = "Month, 1-12"), ("year" = i32, Path, description = "Year")),
    responses((status = 200, description = "Monthly summary")))]
pub async fn get_summary(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path((month, year)): Path<(u32, i32)>,
) -> ApiResult<Json<DashboardSummary>> {
    let summary = state
        .dashboard_service
        .get_summary(&user.user_id, month, year)?;
    Ok(Json(summary))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/dashboard/{month}/{year}", get(get_summary))
}
