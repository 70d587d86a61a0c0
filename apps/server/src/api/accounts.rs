use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use crate::{
    api::shared::ApiJson,
    auth::AuthenticatedAccount,
    error::{ApiResult, ErrorBody},
    main_lib::AppState,
    models::{Account, AccountCreated, BalanceResponse, NewAccount},
};

#[utoipa::path(
    post,
    path = "/api/v1/accounts",
    request_body = NewAccount,
    responses(
        (status = 201, body = AccountCreated),
        (status = 400, body = ErrorBody),
        (status = 409, body = ErrorBody)
    )
)]
pub async fn create_account(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<NewAccount>,
) -> ApiResult<(StatusCode, Json<AccountCreated>)> {
    let created = state.account_service.create_account(payload.into()).await?;
    let access_token = state.auth.issue_token(&created.id)?;
    Ok((
        StatusCode::CREATED,
        Json(AccountCreated {
            account: Account::from(created),
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: state.auth.expires_in().as_secs(),
        }),
    ))
}

#[utoipa::path(get, path = "/api/v1/accounts/me", responses((status = 200, body = Account), (status = 401, body = ErrorBody)))]
pub async fn get_current_account(
    State(state): State<Arc<AppState>>,
    account: AuthenticatedAccount,
) -> ApiResult<Json<Account>> {
    let current = state.account_service.get_account(account.id())?;
    Ok(Json(Account::from(current)))
}

#[utoipa::path(delete, path = "/api/v1/accounts/me", responses((status = 204), (status = 404, body = ErrorBody)))]
pub async fn delete_current_account(
    State(state): State<Arc<AppState>>,
    account: AuthenticatedAccount,
) -> ApiResult<StatusCode> {
    state.account_service.delete_account(account.id()).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Falls back to a fixed display amount when the stored balance is not positive.
#[utoipa::path(get, path = "/api/v1/user/balance", responses((status = 200, body = BalanceResponse)))]
pub async fn get_balance(
    State(state): State<Arc<AppState>>,
    account: AuthenticatedAccount,
) -> ApiResult<Json<BalanceResponse>> {
    let balance = state.account_service.get_display_balance(account.id())?;
    Ok(Json(BalanceResponse { balance }))
}

/// Routes reachable without a token.
pub fn public_router() -> Router<Arc<AppState>> {
    Router::new().route("/accounts", post(create_account))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/accounts/me",
            get(get_current_account).delete(delete_current_account),
        )
        .route("/user/balance", get(get_balance))
}
