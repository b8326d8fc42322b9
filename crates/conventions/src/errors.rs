use thiserror::Error;

/// Reasons a controller refuses an injected dependency.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("injected dependency must be an object instance")]
    NotAnObject,
    #[error("`{type_name}` must {expected} in its type name")]
    NamingConventionViolation { type_name: String, expected: String },
    #[error("`{type_name}` does not implement the Service contract")]
    InheritanceViolation { type_name: String },
}

impl ValidationError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ValidationError::NotAnObject => 2001,
            ValidationError::NamingConventionViolation { .. } => 2002,
            ValidationError::InheritanceViolation { .. } => 2003,
        }
    }

    /// Offending type name, when the candidate was an object at all.
    pub fn type_name(&self) -> Option<&str> {
        match self {
            ValidationError::NotAnObject => None,
            ValidationError::NamingConventionViolation { type_name, .. }
            | ValidationError::InheritanceViolation { type_name } => Some(type_name),
        }
    }
}

/// Lookup failures of the dependency container.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContainerError {
    #[error("no binding registered for `{0}`")]
    Missing(String),
    #[error("binding `{key}` is not an instance of `{expected}`")]
    TypeMismatch { key: String, expected: &'static str },
}

impl ContainerError {
    pub fn code(&self) -> u16 {
        match self {
            ContainerError::Missing(_) => 2101,
            ContainerError::TypeMismatch { .. } => 2102,
        }
    }
}
