use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use pocketledger_core::accounts as core_accounts;
use pocketledger_core::transfers::{TransferRequest, TransferResult};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    auth::AuthUser,
    error::ApiResult,
    main_lib::AppState,
    models::{Account, AccountUpdate, NewAccount},
};

#[derive(Deserialize, Default, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct AccountListQuery {
    /// Only active or only inactive accounts.
    is_active: Option<bool>,
}

#[utoipa::path(get, path = "/api/accounts",
    params(AccountListQuery),
    responses((status = 200, body = [Account])))]
pub async fn list_accounts(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<AccountListQuery>,
) -> ApiResult<Json<Vec<Account>>> {
    let accounts = state
        .account_service
        .list_accounts(&user.user_id, query.is_active)?;
    Ok(Json(accounts.into_iter().map(Account::from).collect()))
}

#[utoipa::path(post, path = "/api/accounts", request_body = NewAccount,
    responses((status = 201, body = Account)))]
pub async fn create_account(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<NewAccount>,
) -> ApiResult<(StatusCode, Json<Account>)> {
    let new_account: core_accounts::NewAccount = payload.try_into()?;
    let created = state
        .account_service
        .create_account(&user.user_id, new_account)
        .await?;
    Ok((StatusCode::CREATED, Json(Account::from(created))))
}

#[utoipa::path(put, path = "/api/accounts/{id}", request_body = AccountUpdate,
    params(("id" = String, Path, description = "Account id")),
    responses((status = 200, body = Account), (status = 404, description = "Unknown account")))]
pub async fn update_account(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(payload): Json<AccountUpdate>,
) -> ApiResult<Json<Account>> {
    let updated = state
        .account_service
        .update_account(&user.user_id, payload.into_core(id)?)
        .await?;
    Ok(Json(Account::from(updated)))
}

#[utoipa::path(delete, path = "/api/accounts/{id}",
    params(("id" = String, Path, description = "Account id")),
    responses((status = 204), (status = 404, description = "Unknown account")))]
pub async fn delete_account(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state
        .account_service
        .delete_account(&user.user_id, &id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(post, path = "/api/accounts/transfer",
    responses(
        (status = 200, description = "Both updated accounts with the transfer records"),
        (status = 409, description = "Insufficient balance"),
    ))]
pub async fn transfer(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(request): Json<TransferRequest>,
) -> ApiResult<Json<TransferResult>> {
    let result = state
        .transfer_service
        .transfer_between_accounts(&user.user_id, request)
        .await?;
    Ok(Json(result))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/accounts", get(list_accounts).post(create_account))
        .route("/accounts/transfer", post(transfer))
        .route("/accounts/{id}", put(update_account).delete(delete_account))
}
