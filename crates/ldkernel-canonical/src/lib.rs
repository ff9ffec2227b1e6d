//! Canonical serialization for JSON-LD kernel outputs.
//!
//! Two values that differ only in object key insertion order canonicalize to
//! the same tree and serialize to the same bytes. Keys are sorted by codepoint
//! order at every depth; array order is preserved. Nothing here reads a
//! clock, the environment, or the network.
//!
#![deny(missing_docs)]

/// Key-ordering canonicalizer and stable stringification.
pub mod canonicalizer;
/// Content digests over canonical bytes.
pub mod digest;
mod finite;
/// Validation helpers for pattern-checked primitives.
pub mod validation;

pub use canonicalizer::{
    canonical_bytes, canonicalize, stable_stringify, stable_stringify_serialize, to_json_value,
    CanonicalizationError,
};
pub use digest::{Digest, DigestAlg, DigestError};
pub use validation::ValidationError;
