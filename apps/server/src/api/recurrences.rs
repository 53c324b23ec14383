use std::sync::Arc;

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use pocketledger_core::recurrences::{
    NewRecurrence, Recurrence, RecurrenceCreated, RecurrenceDetails, RecurrenceUpdate,
    RecurrenceUpdated,
};
use serde::Serialize;

use crate::{
    auth::AuthUser, error::ApiResult, main_lib::AppState, models::RecurrenceUpdateRequest,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedRecurrence {
    deleted_transactions: usize,
}

#[utoipa::path(get, path = "/api/recurrences",
    responses((status = 200, description = "Active recurrences")))]
pub async fn list_active(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Json<Vec<Recurrence>>> {
    let recurrences = state
        .recurrence_service
        .list_active_recurrences(&user.user_id)?;
    Ok(Json(recurrences))
}

#[utoipa::path(post, path = "/api/recurrences",
    responses(
        (status = 201, description = "Recurrence with its pending transactions"),
        (status = 400, description = "Invalid schedule"),
    ))]
pub async fn create_recurrence(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(recurrence): Json<NewRecurrence>,
) -> ApiResult<(StatusCode, Json<RecurrenceCreated>)> {
    let created = state
        .recurrence_service
        .create_recurrence(&user.user_id, recurrence)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(put, path = "/api/recurrences/{id}",
    params(("id" = String, Path, description = "Recurrence id")),
    responses((status = 200, description = "Recurrence and the pending transactions it rewrote")))]
pub async fn update_recurrence(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(payload): Json<RecurrenceUpdateRequest>,
) -> ApiResult<Json<RecurrenceUpdated>> {
    let update: RecurrenceUpdate = payload.try_into()?;
    let updated = state
        .recurrence_service
        .update_recurrence(&user.user_id, &id, update)
        .await?;
    Ok(Json(updated))
}

#[utoipa::path(delete, path = "/api/recurrences/{id}",
    params(("id" = String, Path, description = "Recurrence id")),
    responses((status = 200, description = "Number of transactions removed with the recurrence")))]
pub async fn delete_recurrence(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeletedRecurrence>> {
    let deleted_transactions = state
        .recurrence_service
        .delete_recurrence(&user.user_id, &id)
        .await?;
    Ok(Json(DeletedRecurrence {
        deleted_transactions,
    }))
}

#[utoipa::path(get, path = "/api/recurrences/{id}/details",
    params(("id" = String, Path, description = "Recurrence id")),
    responses((status = 200, description = "Paid and remaining occurrences")))]
pub async fn get_details(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Json<RecurrenceDetails>> {
    let details = state
        .recurrence_service
        .get_recurrence_details(&user.user_id, &id)?;
    Ok(Json(details))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/recurrences", get(list_active).post(create_recurrence))
        .route(
            "/recurrences/{id}",
            put(update_recurrence).delete(delete_recurrence),
        )
        .route("/recurrences/{id}/details", get(get_details))
}
