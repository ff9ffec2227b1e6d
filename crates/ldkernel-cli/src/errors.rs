//! CLI error type.

use ldkernel_canonical::{CanonicalizationError, DigestError, ValidationError};
use ldkernel_core::{ErrorCode, KernelError};
use thiserror::Error;

/// Errors surfaced to the user; each one exits with status 1.
#[derive(Error, Debug)]
pub enum CliError {
    /// Input file does not exist.
    #[error("File not found: {0}")]
    NotFound(String),
    /// Input could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        /// File path, or `<stdin>`.
        path: String,
        /// Underlying I/O failure.
        source: std::io::Error,
    },
    /// Input exceeds the configured size limit.
    #[error("Input size {size} exceeds maximum {max} bytes")]
    TooLarge {
        /// Actual size in bytes.
        size: u64,
        /// Configured maximum.
        max: u64,
    },
    /// Input is not JSON.
    #[error("Invalid JSON in input: {0}")]
    InvalidJson(#[source] serde_json::Error),
    /// Pipeline could not be assembled.
    #[error("Invalid pipeline configuration: {0}")]
    Kernel(#[from] KernelError),
    /// `--kernel-version` did not validate.
    #[error("Invalid kernel version: {0}")]
    KernelVersion(#[from] ValidationError),
    /// Output could not be encoded.
    #[error("Encoding failed: {0}")]
    Encode(#[from] CanonicalizationError),
    /// Digest computation failed.
    #[error("Digest failed: {0}")]
    Digest(#[from] DigestError),
    /// `--strict` and the transform produced an error document.
    #[error("Transform rejected input: {0}")]
    Rejected(ErrorCode),
}
