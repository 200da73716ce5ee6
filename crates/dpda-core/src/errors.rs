//! Structured error types shared across DPDA crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`DpdaError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (agent ids, sizes, etc.).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.context.insert(key.into(), value.to_string());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for the matching simulator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum DpdaError {
    /// Caller supplied parameters or preference profiles that cannot be run.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(ErrorInfo),
    /// The engine reached a state its invariants rule out. Never recoverable.
    #[error("internal invariant violation: {0}")]
    InternalInvariantViolation(ErrorInfo),
    /// Serialization and report encoding errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl DpdaError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            DpdaError::InvalidConfiguration(info)
            | DpdaError::InternalInvariantViolation(info)
            | DpdaError::Serde(info) => info,
        }
    }

    /// Shorthand for an [`DpdaError::InvalidConfiguration`] with a bare payload.
    pub fn invalid(code: impl Into<String>, message: impl Into<String>) -> Self {
        DpdaError::InvalidConfiguration(ErrorInfo::new(code, message))
    }

    /// Shorthand for an [`DpdaError::InternalInvariantViolation`] with a bare payload.
    pub fn invariant(code: impl Into<String>, message: impl Into<String>) -> Self {
        DpdaError::InternalInvariantViolation(ErrorInfo::new(code, message))
    }

    /// Returns `true` when the error points at a defect in the engine rather
    /// than at the caller's input.
    pub fn is_internal(&self) -> bool {
        matches!(self, DpdaError::InternalInvariantViolation(_))
    }
}
