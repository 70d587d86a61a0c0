use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;

use crate::{
    api::shared::ApiJson,
    auth::AuthenticatedAccount,
    error::{ApiResult, ErrorBody},
    main_lib::AppState,
    models::{
        Goal, GoalContribution, GoalContributionResponse, GoalProgress, GoalUpdate, NewGoal,
        SuccessResponse,
    },
};

#[utoipa::path(get, path = "/api/v1/goals", responses((status = 200, body = [Goal])))]
pub async fn get_goals(
    State(state): State<Arc<AppState>>,
    account: AuthenticatedAccount,
) -> ApiResult<Json<Vec<Goal>>> {
    let goals = state.goal_service.get_goals(account.id())?;
    Ok(Json(goals.into_iter().map(Goal::from).collect()))
}

#[utoipa::path(
    post,
    path = "/api/v1/goals",
    request_body = NewGoal,
    responses((status = 201, body = Goal), (status = 400, body = ErrorBody))
)]
pub async fn create_goal(
    State(state): State<Arc<AppState>>,
    account: AuthenticatedAccount,
    ApiJson(goal): ApiJson<NewGoal>,
) -> ApiResult<(StatusCode, Json<Goal>)> {
    let g = state
        .goal_service
        .create_goal(account.id(), goal.into())
        .await?;
    Ok((StatusCode::CREATED, Json(Goal::from(g))))
}

#[utoipa::path(get, path = "/api/v1/goals/{id}", params(("id" = String, Path, description = "Goal id")), responses((status = 200, body = Goal), (status = 404, body = ErrorBody)))]
pub async fn get_goal(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    account: AuthenticatedAccount,
) -> ApiResult<Json<Goal>> {
    let g = state.goal_service.get_goal(account.id(), &id)?;
    Ok(Json(Goal::from(g)))
}

#[utoipa::path(
    put,
    path = "/api/v1/goals/{id}",
    params(("id" = String, Path, description = "Goal id")),
    request_body = GoalUpdate,
    responses((status = 200, body = Goal), (status = 400, body = ErrorBody), (status = 404, body = ErrorBody))
)]
pub async fn update_goal(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    account: AuthenticatedAccount,
    ApiJson(update): ApiJson<GoalUpdate>,
) -> ApiResult<Json<Goal>> {
    let g = state
        .goal_service
        .update_goal(account.id(), &id, update.into())
        .await?;
    Ok(Json(Goal::from(g)))
}

#[utoipa::path(delete, path = "/api/v1/goals/{id}", params(("id" = String, Path, description = "Goal id")), responses((status = 200, body = SuccessResponse), (status = 404, body = ErrorBody)))]
pub async fn delete_goal(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    account: AuthenticatedAccount,
) -> ApiResult<Json<SuccessResponse>> {
    state.goal_service.delete_goal(account.id(), &id).await?;
    Ok(Json(SuccessResponse { success: true }))
}

#[utoipa::path(
    post,
    path = "/api/v1/goals/{id}/contribute",
    params(("id" = String, Path, description = "Goal id")),
    request_body = GoalContribution,
    responses((status = 200, body = GoalContributionResponse), (status = 400, body = ErrorBody), (status = 404, body = ErrorBody))
)]
pub async fn contribute(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    account: AuthenticatedAccount,
    ApiJson(contribution): ApiJson<GoalContribution>,
) -> ApiResult<Json<GoalContributionResponse>> {
    let g = state
        .goal_service
        .contribute(account.id(), &id, contribution.amount)
        .await?;
    Ok(Json(GoalContributionResponse {
        success: true,
        goal: Goal::from(g),
    }))
}

#[utoipa::path(get, path = "/api/v1/goals/{id}/progress", params(("id" = String, Path, description = "Goal id")), responses((status = 200, body = GoalProgress), (status = 404, body = ErrorBody)))]
pub async fn get_progress(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    account: AuthenticatedAccount,
) -> ApiResult<Json<GoalProgress>> {
    let progress = state
        .goal_service
        .get_progress(account.id(), &id, Utc::now())?;
    Ok(Json(GoalProgress::from(progress)))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/goals", get(get_goals).post(create_goal))
        .route(
            "/goals/{id}",
            get(get_goal).put(update_goal).delete(delete_goal),
        )
        .route("/goals/{id}/contribute", post(contribute))
        .route("/goals/{id}/progress", get(get_progress))
}
