//! Core error types for climaqual-rs.
//!
//! Workflow rule violations are local validation failures: they are detected
//! before any mutation is applied and surface to the caller as recoverable,
//! user-facing conditions.

use std::collections::HashMap;
use thiserror::Error;

/// Core error type for all climaqual operations
#[derive(Error, Debug)]
pub enum QualError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Invalid transition: {message}")]
    InvalidTransition { message: String },

    #[error("Invalid duration: {days} days (must be at least 1)")]
    InvalidDuration { days: i64 },

    #[error("Stage type {stage_type} already exists on this object")]
    DuplicateStageType { stage_type: String },

    #[error("Stage \"{name}\" is required and cannot be deleted")]
    ProtectedStage { name: String },

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Standard Result type for climaqual operations
pub type QualResult<T> = Result<T, QualError>;

/// Validation errors collection, keyed by field name.
///
/// Base errors are not tied to a specific field (e.g. a rejected gate check
/// concerns the whole stage, not one attribute).
#[derive(Error, Debug, Default, Clone)]
#[error("Validation errors: {errors:?}")]
pub struct ValidationErrors {
    /// Field-specific errors: field_name -> error messages
    pub errors: HashMap<String, Vec<String>>,
    /// Errors not tied to a specific field
    pub base_errors: Vec<String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    pub fn add_base(&mut self, message: impl Into<String>) {
        self.base_errors.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.base_errors.is_empty()
    }

    pub fn has_error(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&Vec<String>> {
        self.errors.get(field)
    }

    pub fn merge(&mut self, other: ValidationErrors) {
        for (field, messages) in other.errors {
            self.errors.entry(field).or_default().extend(messages);
        }
        self.base_errors.extend(other.base_errors);
    }

    pub fn full_messages(&self) -> Vec<String> {
        let mut messages = self.base_errors.clone();
        for (field, field_messages) in &self.errors {
            for msg in field_messages {
                messages.push(format!("{} {}", field, msg));
            }
        }
        messages
    }
}

impl From<validator::ValidationErrors> for ValidationErrors {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut out = ValidationErrors::new();
        for (field, field_errors) in errors.field_errors() {
            for err in field_errors {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("is invalid ({})", err.code));
                out.add(field.to_string(), message);
            }
        }
        out
    }
}

impl From<QualError> for ValidationErrors {
    fn from(err: QualError) -> Self {
        match err {
            QualError::Validation(errors) => errors,
            other => {
                let mut errors = ValidationErrors::new();
                errors.add_base(other.to_string());
                errors
            }
        }
    }
}
