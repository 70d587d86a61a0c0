use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    routing::{get, post},
    Json, Router,
};

use crate::{
    api::shared::ApiJson,
    auth::AuthenticatedAccount,
    error::{ApiError, ApiResult, ErrorBody},
    main_lib::AppState,
    models::{SendMoneyRequest, SendMoneyResponse, Transaction},
};

pub const IDEMPOTENCY_KEY_HEADER: &str = "idempotency-key";

/// Merges the `Idempotency-Key` header into the body key.
///
/// Both may be given as long as they agree.
fn resolve_idempotency_key(
    headers: &HeaderMap,
    body_key: Option<String>,
) -> ApiResult<Option<String>> {
    let header_key = match headers.get(IDEMPOTENCY_KEY_HEADER) {
        None => None,
        Some(value) => Some(
            value
                .to_str()
                .map_err(|_| {
                    ApiError::BadRequest("Idempotency-Key header must be visible ASCII".into())
                })?
                .trim()
                .to_string(),
        ),
    };

    match (body_key, header_key) {
        (Some(body), Some(header)) if body.trim() != header => Err(ApiError::BadRequest(
            "Idempotency-Key header does not match idempotencyKey".into(),
        )),
        (Some(body), _) => Ok(Some(body)),
        (None, header) => Ok(header),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/transactions/send",
    request_body = SendMoneyRequest,
    params(("Idempotency-Key" = Option<String>, Header, description = "Replay-safe request key, scoped to the sender")),
    responses(
        (status = 200, body = SendMoneyResponse),
        (status = 400, body = ErrorBody),
        (status = 404, body = ErrorBody),
        (status = 409, body = ErrorBody)
    )
)]
pub async fn send_money(
    State(state): State<Arc<AppState>>,
    account: AuthenticatedAccount,
    headers: HeaderMap,
    ApiJson(mut payload): ApiJson<SendMoneyRequest>,
) -> ApiResult<Json<SendMoneyResponse>> {
    payload.idempotency_key = resolve_idempotency_key(&headers, payload.idempotency_key.take())?;
    let receipt = state
        .transfer_service
        .send_money(account.id(), payload.into())
        .await?;
    Ok(Json(SendMoneyResponse::from(receipt)))
}

#[utoipa::path(get, path = "/api/v1/transactions", responses((status = 200, body = [Transaction])))]
pub async fn list_transactions(
    State(state): State<Arc<AppState>>,
    account: AuthenticatedAccount,
) -> ApiResult<Json<Vec<Transaction>>> {
    let transfers = state.transfer_service.list_transfers(account.id())?;
    Ok(Json(transfers.into_iter().map(Transaction::from).collect()))
}

#[utoipa::path(get, path = "/api/v1/transactions/{id}", params(("id" = String, Path, description = "Transaction id")), responses((status = 200, body = Transaction), (status = 404, body = ErrorBody)))]
pub async fn get_transaction(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    account: AuthenticatedAccount,
) -> ApiResult<Json<Transaction>> {
    let transfer = state.transfer_service.get_transfer(account.id(), &id)?;
    Ok(Json(Transaction::from(transfer)))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/transactions", get(list_transactions))
        .route("/transactions/send", post(send_money))
        .route("/transactions/{id}", get(get_transaction))
}
