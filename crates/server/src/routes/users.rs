//! Routes only unpack the request and hand it to the controller.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use service::pagination::Pagination;
use service::users::domain::{RegisterInput, User};
use uuid::Uuid;

use super::AppState;
use crate::errors::ApiError;

pub async fn index(
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<User>>, ApiError> {
    state.users.index(page).await
}

pub async fn store(
    State(state): State<AppState>,
    Json(input): Json<RegisterInput>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    state.users.store(input).await
}

pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, ApiError> {
    state.users.show(id).await
}
