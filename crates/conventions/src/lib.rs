//! Layering conventions for web applications built on axum.
//!
//! The intended call graph is `Route -> Controller -> Service -> Model`:
//! - routes only map HTTP requests onto controller methods;
//! - controllers own exactly one validated service and translate results to responses;
//! - services hold business logic and are the only callers of repositories (models).
//!
//! Only one rule is enforced at runtime: whatever a controller receives from the
//! dependency [`Container`] must be a concrete [`Service`] whose type name carries
//! the `Service` marker. See [`validate_service`].
//!
//! # Examples
//! ```
//! use conventions::{validate_service, Candidate, Service, ValidationError};
//! use serde_json::Value;
//!
//! struct ReportService;
//!
//! #[async_trait::async_trait]
//! impl Service for ReportService {
//!     async fn handle(&self, _args: Vec<Value>) -> anyhow::Result<Value> {
//!         Ok(Value::Null)
//!     }
//! }
//! conventions::injectable!(ReportService);
//!
//! assert_eq!(validate_service(Candidate::of(&ReportService)), Ok(true));
//! assert_eq!(validate_service(Candidate::Null), Err(ValidationError::NotAnObject));
//! ```

pub mod container;
pub mod controller;
pub mod errors;
pub mod injectable;
pub mod naming;
pub mod service;

pub use container::{Container, Resolved};
pub use controller::{validate_service, Controller, ServiceValidator};
pub use errors::{ContainerError, ValidationError};
pub use injectable::{Candidate, Injectable};
pub use naming::{MatchMode, NamingRule, SERVICE_MARKER};
pub use service::Service;
