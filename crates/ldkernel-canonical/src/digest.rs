//! Content digests over canonical bytes.
//!
//! A digest is `sha256(canonical_bytes(value))`, where the canonical bytes
//! are the compact [`stable_stringify`](crate::stable_stringify) output. Two
//! values that differ only in key insertion order share a digest.

use std::fmt;

use base64::Engine;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest as Sha2Digest, Sha256};

use crate::canonicalizer::{canonical_bytes, to_json_value, CanonicalizationError};
use crate::validation::ValidationError;

/// Supported digest algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DigestAlg {
    /// SHA-256.
    #[serde(rename = "sha-256")]
    Sha256,
}

impl DigestAlg {
    /// Wire name of the algorithm.
    pub fn as_str(&self) -> &'static str {
        match self {
            DigestAlg::Sha256 => "sha-256",
        }
    }
}

/// Algorithm + bytes digest, encoded as base64url without padding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Digest {
    /// Digest algorithm (currently always `sha-256`).
    pub alg: DigestAlg,
    /// Base64URL (no padding) digest bytes.
    pub b64: String,
}

impl Digest {
    /// Constructs a validated digest.
    pub fn new(alg: DigestAlg, b64: impl Into<String>) -> Result<Self, ValidationError> {
        let b64 = b64.into();
        let re = Regex::new(r"^[A-Za-z0-9_-]{43}$").expect("invalid regex");
        if !re.is_match(&b64) {
            return Err(ValidationError::PatternMismatch {
                field: "digest",
                value: b64,
            });
        }
        Ok(Digest { alg, b64 })
    }

    /// Digest of the canonical form of `value`.
    pub fn of_value(value: &Value) -> Result<Self, DigestError> {
        let bytes = canonical_bytes(value)?;
        let hash = Sha256::digest(&bytes);
        let b64 = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(hash);
        Ok(Digest::new(DigestAlg::Sha256, b64)?)
    }

    /// Digest of the canonical form of any serializable value.
    pub fn of_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self, DigestError> {
        let value = to_json_value(value)?;
        Self::of_value(&value)
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.alg.as_str(), self.b64)
    }
}

/// Error during digest computation.
#[derive(thiserror::Error, Debug)]
pub enum DigestError {
    /// Canonicalization failed.
    #[error("canonicalization failed: {0}")]
    Canonicalization(#[from] CanonicalizationError),
    /// Digest construction failed.
    #[error("digest construction failed: {0}")]
    Digest(#[from] ValidationError),
}
