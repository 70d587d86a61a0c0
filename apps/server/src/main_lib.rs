use std::sync::Arc;

use fintrack_core::{
    accounts::{AccountService, AccountServiceTrait},
    cards::{CardService, CardServiceTrait},
    goals::{GoalService, GoalServiceTrait},
    orders::{OrderService, OrderServiceTrait},
    transfers::{TransferService, TransferServiceTrait},
};
use fintrack_storage_sqlite::{
    accounts::AccountRepository,
    cards::CardRepository,
    db::{self, write_actor},
    goals::GoalRepository,
    orders::OrderRepository,
    transfers::TransferRepository,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::{auth::AuthManager, config::Config};

pub struct AppState {
    pub account_service: Arc<dyn AccountServiceTrait + Send + Sync>,
    pub transfer_service: Arc<dyn TransferServiceTrait + Send + Sync>,
    pub goal_service: Arc<dyn GoalServiceTrait + Send + Sync>,
    pub order_service: Arc<dyn OrderServiceTrait + Send + Sync>,
    pub card_service: Arc<dyn CardServiceTrait + Send + Sync>,
    pub auth: Arc<AuthManager>,
}

pub fn init_tracing() {
    let fmt_layer = fmt::layer().json().with_current_span(false);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = write_actor::spawn_writer(pool.as_ref().clone());

    let account_repo = Arc::new(AccountRepository::new(pool.clone(), writer.clone()));
    let transfer_repo = Arc::new(TransferRepository::new(pool.clone(), writer.clone()));
    let goal_repo = Arc::new(GoalRepository::new(pool.clone(), writer.clone()));
    let order_repo = Arc::new(OrderRepository::new(pool.clone(), writer.clone()));
    let card_repo = Arc::new(CardRepository::new(pool.clone(), writer));

    let account_service = Arc::new(AccountService::new(account_repo));
    let transfer_service = Arc::new(TransferService::new(transfer_repo));
    let goal_service = Arc::new(GoalService::new(goal_repo));
    let order_service = Arc::new(OrderService::new(order_repo));
    let card_service = Arc::new(CardService::new(card_repo));

    let auth = Arc::new(AuthManager::new(&config.jwt_secret, config.token_ttl));

    Ok(Arc::new(AppState {
        account_service,
        transfer_service,
        goal_service,
        order_service,
        card_service,
        auth,
    }))
}
