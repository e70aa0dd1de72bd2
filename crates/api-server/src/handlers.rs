use crate::dto::{CreateUserRequest, UpdateUserRequest};
use crate::error::ApiError;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use domain::UserId;
use tracing::info;

pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<Response, ApiError> {
    let name = payload.name.unwrap_or_default();
    let email = payload.email.unwrap_or_default();

    let user = state.user_app.user_service.create_user(&name, &email).await?;
    info!(user_id = ?user.id, "📥 User created");
    Ok((StatusCode::CREATED, Json(user)).into_response())
}

pub async fn get_all_users(State(state): State<AppState>) -> Result<Response, ApiError> {
    let users = state.user_app.user_service.get_all_users().await?;
    Ok(Json(users).into_response())
}

pub async fn get_user_by_id(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<Response, ApiError> {
    match state.user_app.user_service.find_by_id(id).await? {
        Some(user) => Ok(Json(user).into_response()),
        None => Ok(StatusCode::NOT_FOUND.into_response()),
    }
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Response, ApiError> {
    let updated = state
        .user_app
        .user_service
        .update_user(id, payload.name.as_deref(), payload.email.as_deref())
        .await?;

    match updated {
        Some(user) => Ok(Json(user).into_response()),
        None => Ok(StatusCode::NOT_FOUND.into_response()),
    }
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<StatusCode, ApiError> {
    if state.user_app.user_service.delete_user(id).await? {
        info!(user_id = id, "🗑️ User deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Ok(StatusCode::NOT_FOUND)
    }
}

pub async fn get_user_count(State(state): State<AppState>) -> Result<Response, ApiError> {
    let count = state.user_app.user_service.get_user_count().await?;
    Ok(Json(count).into_response())
}

pub async fn health_check() -> &'static str {
    "OK"
}
