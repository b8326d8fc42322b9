//! Minimal dependency container.
//!
//! Bindings are keyed by name and are either shared instances or plain JSON
//! values. Controllers resolve from here and validate what they get back.

use std::any::Any;
use std::sync::Arc;

use dashmap::DashMap;
use serde_json::Value;
use tracing::debug;

use crate::errors::ContainerError;
use crate::injectable::{Candidate, Injectable};
use crate::naming::short_type_name;

#[derive(Clone)]
enum Binding {
    Instance {
        object: Arc<dyn Injectable>,
        any: Arc<dyn Any + Send + Sync>,
    },
    Value(Value),
}

/// Outcome of a lookup.
#[derive(Clone)]
pub enum Resolved {
    Missing,
    Value(Value),
    Instance(Arc<dyn Injectable>),
}

impl Resolved {
    /// View for validation; a missing binding is a null reference.
    pub fn candidate(&self) -> Candidate<'_> {
        match self {
            Resolved::Missing => Candidate::Null,
            Resolved::Value(v) => Candidate::Value(v),
            Resolved::Instance(object) => Candidate::Instance(object.as_ref()),
        }
    }
}

#[derive(Default)]
pub struct Container {
    bindings: DashMap<String, Binding>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a shared instance under `key`, replacing any previous binding.
    pub fn bind_instance<T: Injectable>(&self, key: impl Into<String>, instance: Arc<T>) {
        let key = key.into();
        debug!(%key, type_name = short_type_name(std::any::type_name::<T>()), "bind instance");
        let object: Arc<dyn Injectable> = instance.clone();
        let any: Arc<dyn Any + Send + Sync> = instance;
        self.bindings.insert(key, Binding::Instance { object, any });
    }

    /// Register a plain value under `key`, replacing any previous binding.
    pub fn bind_value(&self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        debug!(%key, "bind value");
        self.bindings.insert(key, Binding::Value(value.into()));
    }

    pub fn resolve(&self, key: &str) -> Resolved {
        match self.bindings.get(key).map(|b| b.value().clone()) {
            None => Resolved::Missing,
            Some(Binding::Value(v)) => Resolved::Value(v),
            Some(Binding::Instance { object, .. }) => Resolved::Instance(object),
        }
    }

    /// Resolve `key` as the concrete type `T`.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use conventions::Container;
    ///
    /// struct Clock;
    /// conventions::injectable!(Clock);
    ///
    /// let container = Container::new();
    /// container.bind_instance("clock", Arc::new(Clock));
    /// assert!(container.make::<Clock>("clock").is_ok());
    /// assert!(container.make::<Clock>("missing").is_err());
    /// ```
    pub fn make<T: Injectable>(&self, key: &str) -> Result<Arc<T>, ContainerError> {
        let binding = self
            .bindings
            .get(key)
            .map(|b| b.value().clone())
            .ok_or_else(|| ContainerError::Missing(key.to_string()))?;
        let mismatch = || ContainerError::TypeMismatch {
            key: key.to_string(),
            expected: std::any::type_name::<T>(),
        };
        match binding {
            Binding::Instance { any, .. } => any.downcast::<T>().map_err(|_| mismatch()),
            Binding::Value(_) => Err(mismatch()),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.bindings.contains_key(key)
    }

    /// Registered keys, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.bindings.iter().map(|e| e.key().clone()).collect();
        keys.sort();
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::validate_service;
    use crate::errors::ValidationError;

    #[derive(Debug)]
    struct Mailer;
    crate::injectable!(Mailer);

    #[test]
    fn missing_binding_resolves_to_null() {
        let container = Container::new();
        let resolved = container.resolve("nope");
        assert!(matches!(resolved.candidate(), Candidate::Null));
        assert_eq!(validate_service(resolved.candidate()), Err(ValidationError::NotAnObject));
    }

    #[test]
    fn value_binding_is_not_an_object() {
        let container = Container::new();
        container.bind_value("app.port", 8080);
        assert!(container.contains("app.port"));
        let resolved = container.resolve("app.port");
        assert_eq!(validate_service(resolved.candidate()), Err(ValidationError::NotAnObject));
        assert_eq!(
            container.make::<Mailer>("app.port").unwrap_err().code(),
            2102
        );
    }

    #[test]
    fn make_downcasts_and_rejects_wrong_type() {
        struct Other;
        crate::injectable!(Other);

        let container = Container::new();
        let mailer = Arc::new(Mailer);
        container.bind_instance("mailer", mailer.clone());
        let made = container.make::<Mailer>("mailer").unwrap();
        assert!(Arc::ptr_eq(&made, &mailer));
        assert!(matches!(
            container.make::<Other>("mailer"),
            Err(ContainerError::TypeMismatch { .. })
        ));
        assert_eq!(
            container.make::<Mailer>("absent").unwrap_err(),
            ContainerError::Missing("absent".into())
        );
    }

    #[test]
    fn keys_sorted_and_rebinding_replaces() {
        let container = Container::new();
        container.bind_value("b", "x");
        container.bind_value("a", 1);
        container.bind_instance("b", Arc::new(Mailer));
        assert_eq!(container.keys(), vec!["a".to_string(), "b".to_string()]);
        assert!(matches!(container.resolve("b"), Resolved::Instance(_)));
    }
}
