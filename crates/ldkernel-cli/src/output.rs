//! Output formatting utilities.

use ldkernel_canonical::{stable_stringify, CanonicalizationError};
use serde_json::Value;

/// Canonical text for a document, pretty unless `compact` is set.
pub fn format_document(value: &Value, compact: bool) -> Result<String, CanonicalizationError> {
    stable_stringify(value, !compact)
}

/// Prints a document followed by a newline.
pub fn print_document(value: &Value, compact: bool) -> Result<(), CanonicalizationError> {
    println!("{}", format_document(value, compact)?);
    Ok(())
}
