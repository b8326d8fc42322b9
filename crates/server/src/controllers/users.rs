use std::sync::Arc;

use axum::http::StatusCode;
use axum::Json;
use conventions::{Candidate, Container, Controller, ServiceValidator, ValidationError};
use service::pagination::Pagination;
use service::users::domain::{RegisterInput, User};
use service::UserService;
use uuid::Uuid;

use crate::errors::{ApiError, ControllerError};

pub struct UserController {
    service: Arc<UserService>,
    validator: ServiceValidator,
}

impl Controller for UserController {
    fn validator(&self) -> ServiceValidator {
        self.validator.clone()
    }
}

impl UserController {
    /// Container key the controller resolves its service from.
    pub const SERVICE_KEY: &'static str = "users";

    pub fn new(service: Arc<UserService>, validator: ServiceValidator) -> Result<Self, ValidationError> {
        let controller = Self { service, validator };
        controller.validate_service(Candidate::of(controller.service.as_ref()))?;
        Ok(controller)
    }

    /// Resolve, validate and downcast the `users` binding.
    ///
    /// Validation runs on whatever the container holds, so a misnamed or
    /// non-service binding is reported as such rather than as a type mismatch.
    pub fn from_container(container: &Container, validator: ServiceValidator) -> Result<Self, ControllerError> {
        let resolved = container.resolve(Self::SERVICE_KEY);
        validator.validate(resolved.candidate())?;
        let service = container.make::<UserService>(Self::SERVICE_KEY)?;
        Ok(Self { service, validator })
    }

    pub async fn index(&self, page: Pagination) -> Result<Json<Vec<User>>, ApiError> {
        Ok(Json(self.service.list(page).await?))
    }

    pub async fn store(&self, input: RegisterInput) -> Result<(StatusCode, Json<User>), ApiError> {
        let user = self.service.register(input).await?;
        Ok((StatusCode::CREATED, Json(user)))
    }

    pub async fn show(&self, id: Uuid) -> Result<Json<User>, ApiError> {
        Ok(Json(self.service.find(id).await?))
    }
}
