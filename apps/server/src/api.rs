use std::sync::Arc;

use axum::{http::HeaderValue, middleware, routing::get, Json, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;

use crate::{auth::require_auth, config::Config, error::ErrorBody, main_lib::AppState, models};

pub mod accounts;
pub mod cards;
pub mod goals;
pub mod health;
pub mod orders;
pub mod shared;
pub mod transactions;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthz,
        health::readyz,
        accounts::create_account,
        accounts::get_current_account,
        accounts::delete_current_account,
        accounts::get_balance,
        transactions::send_money,
        transactions::list_transactions,
        transactions::get_transaction,
        goals::get_goals,
        goals::create_goal,
        goals::get_goal,
        goals::update_goal,
        goals::delete_goal,
        goals::contribute,
        goals::get_progress,
        orders::place_order,
        orders::list_orders,
        orders::get_holdings,
        cards::add_card,
        cards::list_cards,
        cards::delete_card,
    ),
    components(schemas(
        ErrorBody,
        models::Account,
        models::NewAccount,
        models::AccountCreated,
        models::BalanceResponse,
        models::Transaction,
        models::SendMoneyRequest,
        models::SendMoneyResponse,
        models::Goal,
        models::NewGoal,
        models::GoalUpdate,
        models::GoalContribution,
        models::GoalContributionResponse,
        models::GoalProgress,
        models::SuccessResponse,
        models::Order,
        models::NewOrder,
        models::Holding,
        models::Card,
        models::NewCard,
    )),
    tags((name = "fintrack"))
)]
pub struct ApiDoc;

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let cors = if config.cors_allow.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_allow
            .iter()
            .filter_map(|o| o.parse::<HeaderValue>().ok())
            .collect::<Vec<_>>();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    let openapi = ApiDoc::openapi();

    let protected = Router::new()
        .merge(accounts::router())
        .merge(transactions::router())
        .merge(goals::router())
        .merge(orders::router())
        .merge(cards::router())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let api = Router::new()
        .merge(health::router())
        .merge(accounts::public_router())
        .merge(protected)
        .route("/openapi.json", get(|| async { Json(openapi) }));

    Router::new()
        .nest("/api/v1", api)
        .with_state(state)
        .layer(cors)
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http())
}
