use async_trait::async_trait;
use serde_json::Value;

use crate::injectable::sealed::Identity;

/// Business-logic component.
///
/// A service exposes a single polymorphic entry point so that routes, jobs and
/// other services can dispatch to it without knowing the concrete type. Typed
/// business methods live on the concrete type next to `handle`.
#[async_trait]
pub trait Service: Identity + Send + Sync {
    /// Run the service with an untyped argument list.
    async fn handle(&self, args: Vec<Value>) -> anyhow::Result<Value>;
}
