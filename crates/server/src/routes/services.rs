//! Generic dispatch to any service bound in the container through `Service::handle`.
//!
//! The binding is validated on every request; bindings added after startup
//! never went through a controller constructor.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::AppState;
use crate::errors::ApiError;

#[derive(Debug, Default, Deserialize)]
pub struct HandleRequest {
    #[serde(default)]
    pub args: Vec<Value>,
}

/// Registered container keys.
pub async fn index(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.container.keys())
}

pub async fn handle(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(req): Json<HandleRequest>,
) -> Result<Json<Value>, ApiError> {
    if !state.container.contains(&key) {
        return Err(ApiError::not_found(format!("no binding registered for `{key}`")));
    }
    let resolved = state.container.resolve(&key);
    let service = state.validator.accept(resolved.candidate())?;

    debug!(%key, args = req.args.len(), "dispatching to service");
    let out = service.handle(req.args).await?;
    Ok(Json(out))
}
