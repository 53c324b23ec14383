use std::sync::Arc;

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use pocketledger_core::credit_cards::{CreditCard, CreditCardUpdate, NewCreditCard};
use pocketledger_core::transfers::{CardPayment, CardPaymentResult};

use crate::{auth::AuthUser, error::ApiResult, main_lib::AppState};

#[utoipa::path(get, path = "/api/credit-cards",
    responses((status = 200, description = "Credit cards")))]
pub async fn list_cards(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Json<Vec<CreditCard>>> {
    let cards = state.credit_card_service.list_cards(&user.user_id)?;
    Ok(Json(cards))
}

#[utoipa::path(post, path = "/api/credit-cards",
    responses((status = 201, description = "Created card")))]
pub async fn create_card(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(card): Json<NewCreditCard>,
) -> ApiResult<(StatusCode, Json<CreditCard>)> {
    let created = state
        .credit_card_service
        .create_card(&user.user_id, card)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(put, path = "/api/credit-cards/{id}",
    params(("id" = String, Path, description = "Card id")),
    responses((status = 200, description = "Updated card"), (status = 404, description = "Unknown card")))]
pub async fn update_card(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(mut card): Json<CreditCardUpdate>,
) -> ApiResult<Json<CreditCard>> {
    card.id = Some(id);
    let updated = state
        .credit_card_service
        .update_card(&user.user_id, card)
        .await?;
    Ok(Json(updated))
}

#[utoipa::path(delete, path = "/api/credit-cards/{id}",
    params(("id" = String, Path, description = "Card id")),
    responses((status = 204), (status = 404, description = "Unknown card")))]
pub async fn delete_card(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state
        .credit_card_service
        .delete_card(&user.user_id, &id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(post, path = "/api/credit-cards/{id}/payment",
    params(("id" = String, Path, description = "Card id")),
    responses(
        (status = 200, description = "Updated account and card with the payment records"),
        (status = 409, description = "Insufficient balance"),
    ))]
pub async fn pay_invoice(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(card_id): Path<String>,
    Json(payment): Json<CardPayment>,
) -> ApiResult<Json<CardPaymentResult>> {
    let result = state
        .transfer_service
        .pay_credit_card_invoice(&user.user_id, &card_id, payment)
        .await?;
    Ok(Json(result))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/credit-cards", get(list_cards).post(create_card))
        .route("/credit-cards/{id}", put(update_card).delete(delete_card))
        .route("/credit-cards/{id}/payment", post(pay_invoice))
}
