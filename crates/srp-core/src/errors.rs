//! Structured error types shared across SRP crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`SrpError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (indices, multiplicities, sizes, etc.).
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

/// Canonical error type for the SRP engine.
///
/// Every variant is fatal for the run that produced it; nothing in the
/// workspace retries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum SrpError {
    /// A nucleus with a multiplicity other than 2 was supplied.
    #[error("unsupported spin: {0}")]
    UnsupportedSpin(ErrorInfo),
    /// A caller supplied argument violated a documented requirement.
    #[error("invalid argument: {0}")]
    InvalidArgument(ErrorInfo),
    /// Configuration payloads that are malformed or inconsistent.
    #[error("config error: {0}")]
    Config(ErrorInfo),
    /// Symmetry reduction produced an inconsistent result.
    #[error("reduction error: {0}")]
    Reduction(ErrorInfo),
    /// Integer arithmetic left the supported range.
    #[error("overflow: {0}")]
    Overflow(ErrorInfo),
    /// An external solver reported a failure.
    #[error("solver error: {0}")]
    Solver(ErrorInfo),
    /// Filesystem and serialization failures.
    #[error("io error: {0}")]
    Io(ErrorInfo),
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

impl SrpError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            SrpError::UnsupportedSpin(info)
            | SrpError::InvalidArgument(info)
            | SrpError::Config(info)
            | SrpError::Reduction(info)
            | SrpError::Overflow(info)
            | SrpError::Solver(info)
            | SrpError::Io(info) => info,
        }
    }

    /// Convenience constructor for I/O style failures.
    pub fn io(code: &str, err: impl ToString) -> Self {
        SrpError::Io(ErrorInfo::new(code, err.to_string()))
    }
}
