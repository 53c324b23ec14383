use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    routing::{delete, get, put},
    Json, Router,
};
use pocketledger_core::transactions::{
    ConfirmedTransaction, NewTransaction, Transaction, TransactionFilter,
};
use serde::Serialize;

use crate::{auth::AuthUser, error::ApiResult, main_lib::AppState, models::ConfirmRequest};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedTransaction {
    /// Replacement occurrence created when a pending forever-series entry is removed.
    next_transaction: Option<Transaction>,
}

#[utoipa::path(get, path = "/api/transactions",
    params(
        ("month" = Option<u32>, Query, description = "Month, 1-12"),
        ("year" = Option<i32>, Query, description = "Year"),
        ("status" = Option<String>, Query, description = "pending or confirmed"),
        ("accountId" = Option<String>, Query, description = "Settled on this account"),
        ("creditCardId" = Option<String>, Query, description = "Settled on this card"),
    ),
    responses((status = 200, description = "Transactions, newest first")))]
pub async fn list_transactions(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(filter): Query<TransactionFilter>,
) -> ApiResult<Json<Vec<Transaction>>> {
    let transactions = state
        .transaction_service
        .list_transactions(&user.user_id, filter)?;
    Ok(Json(transactions))
}

#[utoipa::path(get, path = "/api/transactions/pending",
    responses((status = 200, description = "Pending transactions by date")))]
pub async fn list_pending(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Json<Vec<Transaction>>> {
    let pending = state.transaction_service.list_pending(&user.user_id)?;
    Ok(Json(pending))
}

#[utoipa::path(post, path = "/api/transactions",
    responses(
        (status = 201, description = "Created transaction"),
        (status = 400, description = "Invalid amount, description or kind"),
        (status = 404, description = "Unknown account, card or category"),
    ))]
pub async fn create_transaction(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(transaction): Json<NewTransaction>,
) -> ApiResult<(StatusCode, Json<Transaction>)> {
    let created = state
        .transaction_service
        .create_transaction(&user.user_id, transaction)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(put, path = "/api/transactions/{id}/confirm", request_body = ConfirmRequest,
    params(("id" = String, Path, description = "Transaction id")),
    responses(
        (status = 200, description = "Confirmed transaction and, for forever series, the next pending one"),
        (status = 409, description = "Transaction is not pending"),
    ))]
pub async fn confirm_transaction(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    body: Option<Json<ConfirmRequest>>,
) -> ApiResult<Json<ConfirmedTransaction>> {
    let account_id = body.and_then(|Json(req)| req.account_id);
    let confirmed = state
        .transaction_service
        .confirm_transaction(&user.user_id, &id, account_id)
        .await?;
    Ok(Json(confirmed))
}

#[utoipa::path(delete, path = "/api/transactions/{id}",
    params(("id" = String, Path, description = "Transaction id")),
    responses((status = 200, description = "Deleted; carries the replacement pending occurrence, if any")))]
pub async fn delete_transaction(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeletedTransaction>> {
    let next_transaction = state
        .transaction_service
        .delete_transaction(&user.user_id, &id)
        .await?;
    Ok(Json(DeletedTransaction { next_transaction }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/transactions",
            get(list_transactions).post(create_transaction),
        )
        .route("/transactions/pending", get(list_pending))
        .route("/transactions/{id}/confirm", put(confirm_transaction))
        .route("/transactions/{id}", delete(delete_transaction))
}
