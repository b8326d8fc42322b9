use std::sync::Arc;

use axum::{
    routing::{get, post},
    Json, Router,
};
use conventions::{Container, ServiceValidator};
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;

use common::types::Health;

use crate::controllers::UserController;

pub mod services;
pub mod users;

/// Shared state: controllers built at startup plus the container for dynamic dispatch.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<UserController>,
    pub container: Arc<Container>,
    pub validator: ServiceValidator,
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/users", get(users::index).post(users::store))
        .route("/users/:id", get(users::show))
        .route("/services", get(services::index))
        .route("/services/:key/handle", post(services::handle))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
