//! Deterministic transform kernel for JSON-LD documents.
//!
//! This crate provides:
//! - Input validation against the minimal JSON-LD shape (an object with `@context`)
//! - An ordered list of pure [`Rule`]s applied to a private copy of the input
//! - Provenance records naming the rules that fired, in order
//! - Uncertainty annotations for values a rule could not determine
//! - Data-valued errors that are themselves JSON-LD documents
//!
//! Core invariants:
//! - Structurally equal inputs give structurally equal outputs
//! - The caller's value is never modified
//! - No clock, randomness, environment or I/O is consulted
//! - Invalid input never panics; it produces a [`TransformError`]
//!
//! Outputs are not canonicalized here; feed them to
//! [`ldkernel_canonical::stable_stringify`] to compare or hash them.
//!
#![deny(missing_docs)]

/// Pipeline configuration.
pub mod config;
/// Validated working documents.
pub mod document;
/// Error codes, error documents and kernel errors.
pub mod errors;
/// Validated identifiers (rule names, kernel versions).
pub mod identifiers;
/// Transform pipeline and its outputs.
pub mod pipeline;
/// Provenance records and the per-call rule trail.
pub mod provenance;
/// Rule trait and stock rules.
pub mod rule;
/// Uncertainty annotations.
pub mod uncertainty;

pub use config::{PipelineConfig, DEFAULT_ERROR_CONTEXT, DEFAULT_KERNEL_VERSION};
pub use document::{Document, CONTEXT_KEY, PROVENANCE_KEY, TYPE_KEY};
pub use errors::{ErrorCode, InputError, KernelError, TransformError};
pub use identifiers::{KernelVersion, RuleName};
pub use pipeline::{OutputKind, Pipeline, PipelineBuilder, TransformOutput};
pub use provenance::{Provenance, RuleTrail};
pub use rule::{FnRule, IdentityRule, Rule, IDENTITY_RULE};
pub use uncertainty::{Uncertainty, UncertaintyStatus, UNCERTAINTY_KEY};

use serde_json::Value;

/// Runs the identity pipeline with the default configuration.
pub fn transform(input: &Value) -> Result<TransformOutput, TransformError> {
    Pipeline::identity(PipelineConfig::default()).transform(input)
}
