use std::fmt;
use thiserror::Error;

/// Failures raised by the storage layer and the record store.
///
/// Malformed persisted content is not represented here: the store treats
/// it as an empty slot and logs a warning instead.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid storage key '{0}'")]
    InvalidKey(String),

    #[error("Lock error: {0}")]
    LockError(String),

    #[error("I/O error: {0}")]
    IoError(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

impl<T> From<std::sync::PoisonError<T>> for StoreError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        Self::LockError(err.to_string())
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// A single rejected form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Every field that failed validation for one submitted form, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: &'static str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.push(field, message);
        errors
    }

    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// Message attached to `field`, if that field failed.
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// `Ok(())` when nothing was recorded, otherwise the collected errors.
    pub fn into_result(self) -> std::result::Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.errors.iter().map(|e| e.to_string()).collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// Outcome of a rejected panel operation.
///
/// Not-found is deliberately absent: handlers report a stale key as
/// `Ok(None)` or `Ok(false)`.
#[derive(Error, Debug)]
pub enum PanelError {
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Record limit reached ({limit})")]
    CapacityReached { limit: usize },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl PanelError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation(ValidationErrors::single(field, message))
    }

    /// Field errors carried by a validation failure.
    pub fn field_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }

    pub fn is_capacity(&self) -> bool {
        matches!(self, Self::CapacityReached { .. })
    }
}

impl From<ValidationErrors> for PanelError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

pub type PanelResult<T> = std::result::Result<T, PanelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_collect_in_order() {
        let mut errors = ValidationErrors::new();
        errors.push("email", "Enter a valid email.");
        errors.push("username", "too short");

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.message_for("email"), Some("Enter a valid email."));
        assert_eq!(errors.message_for("role"), None);
        assert_eq!(
            errors.to_string(),
            "email: Enter a valid email.; username: too short"
        );
    }

    #[test]
    fn test_empty_errors_are_ok() {
        assert!(ValidationErrors::new().into_result().is_ok());
        assert!(ValidationErrors::single("role", "Select a role.").into_result().is_err());
    }

    #[test]
    fn test_panel_error_kinds() {
        let err = PanelError::validation("email", "Email already exists.");
        assert!(err.field_errors().is_some());
        assert!(!err.is_capacity());

        let err = PanelError::CapacityReached { limit: 100 };
        assert!(err.is_capacity());
        assert_eq!(err.to_string(), "Record limit reached (100)");
    }
}
