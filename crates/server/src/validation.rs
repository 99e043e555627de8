//! Request-payload validation, run before any controller logic.

use std::fmt;

use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

/// One or more field violations of a payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<FieldViolation>);

impl ValidationErrors {
    pub fn single(field: &str, message: &str) -> Self {
        let mut errs = Self::default();
        errs.push(field, message);
        errs
    }

    pub fn push(&mut self, field: &str, message: &str) {
        self.0.push(FieldViolation { field: field.to_string(), message: message.to_string() });
    }

    /// Record a violation when a required value is missing.
    pub fn require<T>(&mut self, field: &str, value: &Option<T>) {
        if value.is_none() {
            self.push(field, "must not be null");
        }
    }

    /// Record a violation when text is missing or only whitespace.
    pub fn require_not_blank(&mut self, field: &str, value: &Option<String>) {
        match value {
            None => self.push(field, "must not be null"),
            Some(s) if s.trim().is_empty() => self.push(field, "must not be blank"),
            Some(_) => {}
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|v| format!("{}: {}", v.field, v.message)).collect();
        f.write_str(&parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Implemented by inbound payloads.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationErrors>;
}
