use thiserror::Error;

/// Business errors for user workflows
#[derive(Debug, Error)]
pub enum UserError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("user already exists")]
    Conflict,
    #[error("user not found")]
    NotFound,
    #[error("unknown action: {0}")]
    UnknownAction(String),
    #[error("repository error: {0}")]
    Repository(String),
}

impl UserError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            UserError::Validation(_) => 1001,
            UserError::Conflict => 1002,
            UserError::NotFound => 1003,
            UserError::UnknownAction(_) => 1004,
            UserError::Repository(_) => 1200,
        }
    }
}
