use std::sync::Arc;

use async_trait::async_trait;
use conventions::Service;
use serde_json::Value;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::domain::{RegisterInput, User};
use super::errors::UserError;
use super::repository::UserRepository;
use crate::pagination::Pagination;

/// User business service independent of web framework
pub struct UserService {
    repo: Arc<dyn UserRepository>,
}

conventions::injectable!(UserService);

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    /// Register a new user.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::users::{UserService, domain::RegisterInput, repository::memory::InMemoryUserRepository};
    /// let svc = UserService::new(Arc::new(InMemoryUserRepository::default()));
    /// let input = RegisterInput { email: "user@example.com".into(), name: "Test".into() };
    /// let user = tokio_test::block_on(svc.register(input)).unwrap();
    /// assert_eq!(user.email, "user@example.com");
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register(&self, input: RegisterInput) -> Result<User, UserError> {
        let email = input.email.trim().to_lowercase();
        let name = input.name.trim();
        validate_email(&email)?;
        if name.is_empty() || name.chars().count() > 100 {
            return Err(UserError::Validation("name must be 1..=100 characters".into()));
        }
        if let Some(existing) = self.repo.find_by_email(&email).await? {
            debug!("user exists: {}", existing.email);
            return Err(UserError::Conflict);
        }

        let user = self.repo.create(&email, name).await?;
        info!(user_id = %user.id, email = %user.email, "user_registered");
        Ok(user)
    }

    #[instrument(skip(self))]
    pub async fn find(&self, id: Uuid) -> Result<User, UserError> {
        self.repo.find_by_id(id).await?.ok_or(UserError::NotFound)
    }

    pub async fn list(&self, page: Pagination) -> Result<Vec<User>, UserError> {
        let (offset, limit) = page.normalize();
        self.repo.list(offset, limit).await
    }
}

fn validate_email(email: &str) -> Result<(), UserError> {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(UserError::Validation(format!("invalid email: {email}"))),
    }
}

fn arg<T: serde::de::DeserializeOwned>(value: Option<Value>, what: &str) -> Result<T, UserError> {
    let value = value.ok_or_else(|| UserError::Validation(format!("missing argument: {what}")))?;
    serde_json::from_value(value).map_err(|e| UserError::Validation(format!("{what}: {e}")))
}

/// Dispatch on `args[0]`:
/// - `["register", {"email": .., "name": ..}]`
/// - `["find", "<uuid>"]`
/// - `["list"]` or `["list", {"page": 1, "per_page": 20}]`
#[async_trait]
impl Service for UserService {
    async fn handle(&self, args: Vec<Value>) -> anyhow::Result<Value> {
        let mut args = args.into_iter();
        let action: String = arg(args.next(), "action")?;
        debug!(%action, "user service dispatch");
        let out = match action.as_str() {
            "register" => serde_json::to_value(self.register(arg(args.next(), "input")?).await?)?,
            "find" => serde_json::to_value(self.find(arg(args.next(), "id")?).await?)?,
            "list" => {
                let page = match args.next() {
                    Some(v) => arg(Some(v), "page")?,
                    None => Pagination::default(),
                };
                serde_json::to_value(self.list(page).await?)?
            }
            other => return Err(UserError::UnknownAction(other.to_string()).into()),
        };
        Ok(out)
    }
}
