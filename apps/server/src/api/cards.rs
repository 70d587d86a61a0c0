use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use chrono::Utc;

use crate::{
    api::shared::ApiJson,
    auth::AuthenticatedAccount,
    error::{ApiResult, ErrorBody},
    main_lib::AppState,
    models::{Card, NewCard, SuccessResponse},
};

#[utoipa::path(
    post,
    path = "/api/v1/cards",
    request_body = NewCard,
    responses((status = 201, body = Card), (status = 400, body = ErrorBody))
)]
pub async fn add_card(
    State(state): State<Arc<AppState>>,
    account: AuthenticatedAccount,
    ApiJson(card): ApiJson<NewCard>,
) -> ApiResult<(StatusCode, Json<Card>)> {
    let added = state
        .card_service
        .add_card(account.id(), card.into(), Utc::now().date_naive())
        .await?;
    Ok((StatusCode::CREATED, Json(Card::from(added))))
}

#[utoipa::path(get, path = "/api/v1/cards", responses((status = 200, body = [Card])))]
pub async fn list_cards(
    State(state): State<Arc<AppState>>,
    account: AuthenticatedAccount,
) -> ApiResult<Json<Vec<Card>>> {
    let cards = state.card_service.list_cards(account.id())?;
    Ok(Json(cards.into_iter().map(Card::from).collect()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/cards/{id}",
    params(("id" = String, Path, description = "Card id")),
    responses((status = 200, body = SuccessResponse), (status = 404, body = ErrorBody))
)]
pub async fn delete_card(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    account: AuthenticatedAccount,
) -> ApiResult<Json<SuccessResponse>> {
    state.card_service.delete_card(account.id(), &id).await?;
    Ok(Json(SuccessResponse { success: true }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/cards", get(list_cards).post(add_card))
        .route("/cards/{id}", delete(delete_card))
}
