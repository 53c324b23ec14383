use std::sync::Arc;

use pocketledger_core::{
    accounts::{AccountService, AccountServiceTrait},
    budgets::{BudgetService, BudgetServiceTrait},
    categories::{CategoryService, CategoryServiceTrait},
    credit_cards::{CreditCardService, CreditCardServiceTrait},
    dashboard::{DashboardService, DashboardServiceTrait},
    goals::{GoalService, GoalServiceTrait},
    ledger::LedgerUnitOfWork,
    recurrences::{RecurrenceService, RecurrenceServiceTrait},
    transactions::{TransactionService, TransactionServiceTrait},
    transfers::{TransferService, TransferServiceTrait},
    users::{UserService, UserServiceTrait},
    utils::{Clock, SystemClock},
};
use pocketledger_storage_sqlite::{
    accounts::AccountRepository, budgets::BudgetRepository, categories::CategoryRepository,
    credit_cards::CreditCardRepository, db, goals::GoalRepository, ledger::SqliteLedger,
    recurrences::RecurrenceRepository, transactions::TransactionRepository,
    users::UserRepository,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::auth::{Argon2PasswordHasher, AuthManager};
use crate::config::{Config, LogFormat};

pub struct AppState {
    pub account_service: Arc<dyn AccountServiceTrait>,
    pub credit_card_service: Arc<dyn CreditCardServiceTrait>,
    pub category_service: Arc<dyn CategoryServiceTrait>,
    pub transaction_service: Arc<dyn TransactionServiceTrait>,
    pub recurrence_service: Arc<dyn RecurrenceServiceTrait>,
    pub budget_service: Arc<dyn BudgetServiceTrait>,
    pub transfer_service: Arc<dyn TransferServiceTrait>,
    pub dashboard_service: Arc<dyn DashboardServiceTrait>,
    pub goal_service: Arc<dyn GoalServiceTrait>,
    pub user_service: Arc<dyn UserServiceTrait>,
    pub auth: Arc<AuthManager>,
}

pub fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(false))
            .init(),
        LogFormat::Text => registry.with(fmt::layer()).init(),
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer((*pool).clone());

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let ledger: Arc<dyn LedgerUnitOfWork> = Arc::new(SqliteLedger::new(writer.clone()));

    let account_repo = Arc::new(AccountRepository::new(pool.clone(), writer.clone()));
    let card_repo = Arc::new(CreditCardRepository::new(pool.clone(), writer.clone()));
    let category_repo = Arc::new(CategoryRepository::new(pool.clone(), writer.clone()));
    let transaction_repo = Arc::new(TransactionRepository::new(pool.clone()));
    let recurrence_repo = Arc::new(RecurrenceRepository::new(pool.clone()));
    let budget_repo = Arc::new(BudgetRepository::new(pool.clone(), writer.clone()));
    let goal_repo = Arc::new(GoalRepository::new(pool.clone(), writer.clone()));
    let user_repo = Arc::new(UserRepository::new(pool.clone(), writer));

    let account_service = Arc::new(AccountService::new(account_repo.clone()));
    let credit_card_service = Arc::new(CreditCardService::new(card_repo.clone()));
    let category_service = Arc::new(CategoryService::new(category_repo.clone()));
    let transaction_service = Arc::new(TransactionService::new(
        transaction_repo.clone(),
        ledger.clone(),
        clock.clone(),
    ));
    let recurrence_service = Arc::new(RecurrenceService::new(
        recurrence_repo,
        transaction_repo.clone(),
        ledger.clone(),
        clock.clone(),
    ));
    let budget_service = Arc::new(BudgetService::new(
        budget_repo,
        transaction_repo.clone(),
        category_repo,
        clock.clone(),
    ));
    let transfer_service = Arc::new(TransferService::new(ledger, clock));
    let dashboard_service = Arc::new(DashboardService::new(
        account_repo,
        card_repo,
        transaction_repo,
    ));
    let goal_service = Arc::new(GoalService::new(goal_repo));
    let user_service = Arc::new(UserService::new(
        user_repo,
        Arc::new(Argon2PasswordHasher),
    ));

    let auth = Arc::new(AuthManager::new(&config.jwt_secret, config.token_ttl));

    Ok(Arc::new(AppState {
        account_service,
        credit_card_service,
        category_service,
        transaction_service,
        recurrence_service,
        budget_service,
        transfer_service,
        dashboard_service,
        goal_service,
        user_service,
        auth,
    }))
}
