use std::sync::Arc;

use axum::{
    http::HeaderValue,
    middleware,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;

use crate::{
    auth::{self, require_jwt},
    config::Config,
    main_lib::AppState,
    models,
};

mod accounts;
mod budget;
mod categories;
mod credit_cards;
mod dashboard;
mod goals;
mod health;
mod recurrences;
mod transactions;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthz,
        auth::register,
        auth::login,
        auth::me,
        accounts::list_accounts,
        accounts::create_account,
        accounts::update_account,
        accounts::delete_account,
        accounts::transfer,
        credit_cards::list_cards,
        credit_cards::create_card,
        credit_cards::update_card,
        credit_cards::delete_card,
        credit_cards::pay_invoice,
        categories::list_categories,
        categories::create_category,
        categories::delete_category,
        transactions::list_transactions,
        transactions::create_transaction,
        transactions::list_pending,
        transactions::confirm_transaction,
        transactions::delete_transaction,
        recurrences::list_active,
        recurrences::create_recurrence,
        recurrences::update_recurrence,
        recurrences::delete_recurrence,
        recurrences::get_details,
        budget::upsert_budget,
        budget::resolve_budget,
        budget::get_overview,
        dashboard::get_summary,
        goals::get_goals,
        goals::create_goal,
        goals::update_goal,
        goals::delete_goal,
    ),
    components(schemas(
        auth::RegisterRequest,
        auth::LoginRequest,
        auth::LoginResponse,
        auth::UserResponse,
        models::Account,
        models::NewAccount,
        models::AccountUpdate,
        models::ConfirmRequest,
    ))
)]
pub struct ApiDoc;

fn cors_layer(config: &Config) -> CorsLayer {
    if config.cors_allow.iter().any(|o| o == "*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }
    let origins = config
        .cors_allow
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", o);
                None
            }
        })
        .collect::<Vec<_>>();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let cors = cors_layer(config);
    let openapi = ApiDoc::openapi();

    let public = Router::new()
        .route("/healthz", get(health::healthz))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login));

    let protected = Router::new()
        .route("/auth/me", get(auth::me))
        .merge(accounts::router())
        .merge(credit_cards::router())
        .merge(categories::router())
        .merge(transactions::router())
        .merge(recurrences::router())
        .merge(budget::router())
        .merge(dashboard::router())
        .merge(goals::router())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_jwt));

    Router::new()
        .nest("/api", public.merge(protected))
        .route("/openapi.json", get(|| async { Json(openapi) }))
        .with_state(state)
        .layer(cors)
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http())
}
