use tracing::{debug, warn};

use crate::errors::ValidationError;
use crate::injectable::sealed::Identity;
use crate::injectable::{Candidate, Injectable};
use crate::naming::NamingRule;
use crate::service::Service;

/// Gatekeeper for the dependencies a controller may hold.
#[derive(Debug, Clone, Default)]
pub struct ServiceValidator {
    rule: NamingRule,
}

impl ServiceValidator {
    pub fn new(rule: NamingRule) -> Self {
        Self { rule }
    }

    pub fn rule(&self) -> &NamingRule {
        &self.rule
    }

    /// Accept `candidate` only if it is an object instance whose type name
    /// satisfies the naming rule and whose type implements `Service`.
    ///
    /// Checks run in that order and stop at the first failure. The candidate is
    /// only inspected, never retained.
    pub fn validate(&self, candidate: Candidate<'_>) -> Result<bool, ValidationError> {
        self.accept(candidate).map(|_| true)
    }

    /// Same checks as [`validate`](Self::validate), returning the accepted service.
    pub fn accept<'a>(&self, candidate: Candidate<'a>) -> Result<&'a dyn Service, ValidationError> {
        let object = match candidate {
            Candidate::Instance(object) => object,
            Candidate::Null | Candidate::Value(_) => {
                warn!(candidate = ?candidate, "rejected dependency: not an object");
                return Err(ValidationError::NotAnObject);
            }
        };

        let type_name = object.type_name();
        if !self.rule.matches(type_name) {
            warn!(type_name, rule = %self.rule, "rejected dependency: naming convention");
            return Err(ValidationError::NamingConventionViolation {
                type_name: type_name.to_string(),
                expected: self.rule.to_string(),
            });
        }

        match object.as_service() {
            Some(service) if is_same_object(service, object) => {
                debug!(type_name, "service dependency accepted");
                Ok(service)
            }
            _ => {
                warn!(type_name, "rejected dependency: Service not implemented");
                Err(ValidationError::InheritanceViolation { type_name: type_name.to_string() })
            }
        }
    }
}

/// The service view must be the candidate itself, not something it owns.
fn is_same_object(service: &dyn Service, object: &dyn Injectable) -> bool {
    std::ptr::addr_eq(service, object)
        && service.concrete_type_id() == object.concrete_type_id()
}

/// Validate with the default rule: type name contains `"Service"`.
pub fn validate_service(candidate: Candidate<'_>) -> Result<bool, ValidationError> {
    ServiceValidator::default().validate(candidate)
}

/// Request-handling component that owns a validated service.
///
/// Implementors call [`Controller::validate_service`] from their constructor and
/// propagate the error; a controller that fails validation must not be built.
pub trait Controller: Send + Sync {
    /// Validator used by this controller. Override to apply a configured rule.
    fn validator(&self) -> ServiceValidator {
        ServiceValidator::default()
    }

    fn validate_service(&self, candidate: Candidate<'_>) -> Result<bool, ValidationError> {
        self.validator().validate(candidate)
    }
}
