use std::fmt;

use ldkernel_canonical::ValidationError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::config::PipelineConfig;
use crate::provenance::Provenance;

/// Stable machine-readable code carried by every [`TransformError`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ErrorCode {
    /// Input was null, an array, or a scalar.
    InvalidInput,
    /// Input was an object without `@context`.
    InvalidContext,
    /// Consumer-defined code (upper snake case by convention).
    Domain(String),
}

impl ErrorCode {
    /// Wire form of the code.
    pub fn as_str(&self) -> &str {
        match self {
            ErrorCode::InvalidInput => "INVALID_INPUT",
            ErrorCode::InvalidContext => "INVALID_CONTEXT",
            ErrorCode::Domain(code) => code,
        }
    }
}

impl From<String> for ErrorCode {
    fn from(code: String) -> Self {
        match code.as_str() {
            "INVALID_INPUT" => ErrorCode::InvalidInput,
            "INVALID_CONTEXT" => ErrorCode::InvalidContext,
            _ => ErrorCode::Domain(code),
        }
    }
}

impl From<ErrorCode> for String {
    fn from(code: ErrorCode) -> Self {
        match code {
            ErrorCode::Domain(code) => code,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reason an input value was rejected before any rule ran.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// Input is null, an array, or a scalar.
    #[error("Input must be a non-null, non-array object")]
    NotAnObject,
    /// Input object has no `@context` member.
    #[error("Input must include an @context property")]
    MissingContext,
}

impl InputError {
    /// Error code reported for this rejection.
    pub fn code(&self) -> ErrorCode {
        match self {
            InputError::NotAnObject => ErrorCode::InvalidInput,
            InputError::MissingContext => ErrorCode::InvalidContext,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
enum ErrorType {
    Error,
}

/// Data-valued transform failure.
///
/// Serializes as a minimal JSON-LD document so it travels the same
/// canonicalization path as a success document:
///
/// ```json
/// {"@context":"https://schema.org","@type":"Error","errorCode":"INVALID_INPUT",
///  "error":"...","provenance":{"@type":"Provenance","kernelVersion":"0.1.0","rulesApplied":[]}}
/// ```
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[error("{code}: {message}")]
pub struct TransformError {
    #[serde(rename = "@context")]
    context: String,
    #[serde(rename = "@type")]
    kind: ErrorType,
    #[serde(rename = "errorCode")]
    code: ErrorCode,
    #[serde(rename = "error")]
    message: String,
    provenance: Provenance,
}

impl TransformError {
    /// Builds an error document stamped with the configured version and an
    /// empty rule list.
    pub fn new(config: &PipelineConfig, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            context: config.error_context.clone(),
            kind: ErrorType::Error,
            code,
            message: message.into(),
            provenance: Provenance::new(config.kernel_version.clone(), Vec::new()),
        }
    }

    /// Error document for a rejected input.
    pub fn from_input(config: &PipelineConfig, rejection: &InputError) -> Self {
        Self::new(config, rejection.code(), rejection.to_string())
    }

    /// Machine-readable code.
    pub fn code(&self) -> &ErrorCode {
        &self.code
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Provenance record (always with an empty rule list).
    pub fn provenance(&self) -> &Provenance {
        &self.provenance
    }

    /// The error as a JSON-LD document.
    pub fn to_value(&self) -> Value {
        serde_json::json!({
            "@context": self.context,
            "@type": "Error",
            "errorCode": self.code.as_str(),
            "error": self.message,
            "provenance": self.provenance.to_value(),
        })
    }
}

/// Programming-error kinds raised while assembling a pipeline.
///
/// These never come out of [`Pipeline::transform`](crate::Pipeline::transform);
/// input problems are reported as [`TransformError`] values instead.
#[derive(Error, Debug)]
pub enum KernelError {
    /// A rule name failed validation.
    #[error("invalid rule name: {0}")]
    RuleName(#[from] ValidationError),
    /// Two rules in one pipeline share a name.
    #[error("duplicate rule name: {0}")]
    DuplicateRule(String),
    /// Configuration could not be parsed.
    #[error("configuration error: {0}")]
    Config(#[from] serde_json::Error),
}
