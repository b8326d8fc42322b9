use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::ErrorBody;
use conventions::{ContainerError, ValidationError};
use service::users::errors::UserError;
use thiserror::Error;
use tracing::error;

/// Failure to build a controller from the container.
#[derive(Debug, Error)]
pub enum ControllerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Container(#[from] ContainerError),
}

impl ControllerError {
    pub fn code(&self) -> u16 {
        match self {
            ControllerError::Validation(e) => e.code(),
            ControllerError::Container(e) => e.code(),
        }
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("controller `{controller}` rejected its service: {source}")]
    Controller {
        controller: &'static str,
        #[source]
        source: ControllerError,
    },
}

/// JSON error response: `{"error": msg, "code": n}`
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: u16,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: u16, message: impl Into<String>) -> Self {
        Self { status, code, message: message.into() }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, 404, message)
    }
}

impl From<UserError> for ApiError {
    fn from(e: UserError) -> Self {
        let status = match &e {
            UserError::Validation(_) | UserError::UnknownAction(_) => StatusCode::BAD_REQUEST,
            UserError::Conflict => StatusCode::CONFLICT,
            UserError::NotFound => StatusCode::NOT_FOUND,
            UserError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, e.code(), e.to_string())
    }
}

// A rejected dependency is a wiring bug, never the client's fault.
impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, e.code(), e.to_string())
    }
}

impl From<ControllerError> for ApiError {
    fn from(e: ControllerError) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, e.code(), e.to_string())
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        match e.downcast::<UserError>() {
            Ok(user) => user.into(),
            Err(other) => Self::new(StatusCode::INTERNAL_SERVER_ERROR, 1000, other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(code = self.code, error = %self.message, "request failed");
        }
        (self.status, Json(ErrorBody::new(self.message, self.code))).into_response()
    }
}
