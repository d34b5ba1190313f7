//! Base contract system

use cq_core::error::ValidationErrors;

/// Result of contract validation
pub type ValidationResult = Result<(), ValidationErrors>;

/// Base contract trait
pub trait Contract<T>: Send + Sync {
    /// Validate the entity against this contract's rules
    fn validate(&self, entity: &T) -> ValidationResult;
}
