//! Canonicalize command implementation.

use ldkernel_canonical::canonicalize;

use crate::errors::CliError;
use crate::input::read_json;
use crate::output::print_document;

pub fn run(input: Option<String>, pretty: bool, max_size: Option<u64>) -> Result<(), CliError> {
    let value = read_json(input.as_deref(), max_size)?;
    print_document(&canonicalize(&value), !pretty)?;
    Ok(())
}
