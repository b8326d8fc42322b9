use async_trait::async_trait;
use uuid::Uuid;

use super::domain::User;
use super::errors::UserError;

/// Repository abstraction for user persistence (the model layer).
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, UserError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;
    async fn create(&self, email: &str, name: &str) -> Result<User, UserError>;
    /// Users ordered by creation time, then email.
    async fn list(&self, offset: usize, limit: usize) -> Result<Vec<User>, UserError>;
}

/// In-process repository used by the server and tests.
pub mod memory {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    use chrono::Utc;

    #[derive(Default)]
    pub struct InMemoryUserRepository {
        users: Mutex<HashMap<Uuid, User>>,
    }

    impl InMemoryUserRepository {
        fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<Uuid, User>>, UserError> {
            self.users.lock().map_err(|e| UserError::Repository(e.to_string()))
        }
    }

    #[async_trait]
    impl UserRepository for InMemoryUserRepository {
        async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, UserError> {
            Ok(self.lock()?.get(&id).cloned())
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
            Ok(self.lock()?.values().find(|u| u.email == email).cloned())
        }

        async fn create(&self, email: &str, name: &str) -> Result<User, UserError> {
            let mut users = self.lock()?;
            if users.values().any(|u| u.email == email) {
                return Err(UserError::Conflict);
            }
            let user = User {
                id: Uuid::new_v4(),
                email: email.to_string(),
                name: name.to_string(),
                created_at: Utc::now(),
            };
            users.insert(user.id, user.clone());
            Ok(user)
        }

        async fn list(&self, offset: usize, limit: usize) -> Result<Vec<User>, UserError> {
            let mut all: Vec<User> = self.lock()?.values().cloned().collect();
            all.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.email.cmp(&b.email)));
            Ok(all.into_iter().skip(offset).take(limit).collect())
        }
    }
}
