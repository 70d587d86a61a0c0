use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

use crate::{
    api::shared::ApiJson,
    auth::AuthenticatedAccount,
    error::{ApiResult, ErrorBody},
    main_lib::AppState,
    models::{Holding, NewOrder, Order},
};

#[utoipa::path(
    post,
    path = "/api/v1/orders",
    request_body = NewOrder,
    responses((status = 201, body = Order), (status = 400, body = ErrorBody))
)]
pub async fn place_order(
    State(state): State<Arc<AppState>>,
    account: AuthenticatedAccount,
    ApiJson(order): ApiJson<NewOrder>,
) -> ApiResult<(StatusCode, Json<Order>)> {
    let placed = state
        .order_service
        .place_order(account.id(), order.into())
        .await?;
    Ok((StatusCode::CREATED, Json(Order::from(placed))))
}

#[utoipa::path(get, path = "/api/v1/orders", responses((status = 200, body = [Order])))]
pub async fn list_orders(
    State(state): State<Arc<AppState>>,
    account: AuthenticatedAccount,
) -> ApiResult<Json<Vec<Order>>> {
    let orders = state.order_service.list_orders(account.id())?;
    Ok(Json(orders.into_iter().map(Order::from).collect()))
}

#[utoipa::path(get, path = "/api/v1/portfolio/holdings", responses((status = 200, body = [Holding])))]
pub async fn get_holdings(
    State(state): State<Arc<AppState>>,
    account: AuthenticatedAccount,
) -> ApiResult<Json<Vec<Holding>>> {
    let holdings = state.order_service.get_holdings(account.id())?;
    Ok(Json(holdings.into_iter().map(Holding::from).collect()))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/orders", get(list_orders).post(place_order))
        .route("/portfolio/holdings", get(get_holdings))
}
