//! Digest command implementation.

use ldkernel_canonical::{stable_stringify, Digest};
use serde_json::json;

use crate::errors::CliError;
use crate::input::read_json;

pub fn run(input: Option<String>, json: bool, max_size: Option<u64>) -> Result<(), CliError> {
    let value = read_json(input.as_deref(), max_size)?;
    let digest = Digest::of_value(&value)?;

    if json {
        let output = json!({
            "alg": digest.alg,
            "b64": digest.b64,
        });
        println!("{}", stable_stringify(&output, true)?);
    } else {
        println!("{}", digest);
    }
    Ok(())
}
