//! Subcommand implementations.

pub mod canonicalize;
pub mod digest;
pub mod transform;
