//! Service result type

use cq_core::error::ValidationErrors;
use std::fmt;

/// Represents the outcome of a service call: either the updated entity or
/// the validation errors that stopped it before any mutation.
#[derive(Debug)]
pub struct ServiceResult<T> {
    success: bool,
    result: Option<T>,
    errors: ValidationErrors,
}

impl<T> ServiceResult<T> {
    /// Create a successful service result
    pub fn success(result: T) -> Self {
        Self {
            success: true,
            result: Some(result),
            errors: ValidationErrors::new(),
        }
    }

    /// Create a failed service result
    pub fn failure(errors: ValidationErrors) -> Self {
        Self {
            success: false,
            result: None,
            errors,
        }
    }

    /// Create a failed service result with a single field error
    pub fn failure_with_error(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = ValidationErrors::new();
        errors.add(field, message);
        Self::failure(errors)
    }

    /// Create a failed service result with a base error
    pub fn failure_with_base_error(message: impl Into<String>) -> Self {
        let mut errors = ValidationErrors::new();
        errors.add_base(message);
        Self::failure(errors)
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn is_failure(&self) -> bool {
        !self.success
    }

    /// Get the result (if successful)
    pub fn result(&self) -> Option<&T> {
        self.result.as_ref()
    }

    /// Take the result, consuming the service result
    pub fn take_result(self) -> Option<T> {
        self.result
    }

    /// Unwrap the result, panicking if it was a failure
    pub fn unwrap(self) -> T {
        self.result.expect("called unwrap on a failed ServiceResult")
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn full_messages(&self) -> Vec<String> {
        self.errors.full_messages()
    }

    /// Map the result if successful
    pub fn map<U, F>(self, f: F) -> ServiceResult<U>
    where
        F: FnOnce(T) -> U,
    {
        ServiceResult {
            success: self.success,
            result: self.result.map(f),
            errors: self.errors,
        }
    }

    /// Chain with another service call if successful
    pub fn and_then<U, F>(self, f: F) -> ServiceResult<U>
    where
        F: FnOnce(T) -> ServiceResult<U>,
    {
        match self.result {
            Some(result) if self.success => f(result),
            _ => ServiceResult::failure(self.errors),
        }
    }
}

impl<T> From<Result<T, ValidationErrors>> for ServiceResult<T> {
    fn from(result: Result<T, ValidationErrors>) -> Self {
        match result {
            Ok(value) => ServiceResult::success(value),
            Err(errors) => ServiceResult::failure(errors),
        }
    }
}

impl<T> From<ServiceResult<T>> for Result<T, ValidationErrors> {
    fn from(result: ServiceResult<T>) -> Self {
        match result.result {
            Some(value) if result.success => Ok(value),
            _ => Err(result.errors),
        }
    }
}

impl<T: fmt::Display> fmt::Display for ServiceResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.success {
            match self.result {
                Some(ref result) => write!(f, "Success: {}", result),
                None => write!(f, "Success"),
            }
        } else {
            write!(f, "Failure: {}", self.full_messages().join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_result() {
        let result = ServiceResult::success(42);
        assert!(result.is_success());
        assert_eq!(result.result(), Some(&42));
    }

    #[test]
    fn test_failure_result() {
        let result: ServiceResult<i32> = ServiceResult::failure_with_error("type", "already exists");
        assert!(result.is_failure());
        assert!(result.result().is_none());
        assert!(result.errors().has_error("type"));
    }

    #[test]
    fn test_map_preserves_failure() {
        let result: ServiceResult<i32> = ServiceResult::failure_with_base_error("rejected");
        let mapped = result.map(|n| n * 2);
        assert!(mapped.is_failure());
        assert_eq!(mapped.full_messages(), vec!["rejected".to_string()]);
    }

    #[test]
    fn test_and_then_chains_success() {
        let chained = ServiceResult::success(21).and_then(|n| ServiceResult::success(n * 2));
        assert_eq!(chained.unwrap(), 42);
    }

    #[test]
    fn test_round_trip_through_result() {
        let ok: ServiceResult<i32> = Ok(7).into();
        assert!(ok.is_success());

        let std_result: Result<i32, ValidationErrors> = ok.into();
        assert_eq!(std_result.unwrap(), 7);
    }
}
