//! Reading JSON input from a file or stdin.

use std::io::{self, Read};

use serde_json::Value;
use tracing::debug;

use crate::errors::CliError;

const STDIN: &str = "<stdin>";

/// Reads and parses JSON from `path`, or from stdin when `path` is `None`.
pub fn read_json(path: Option<&str>, max_size: Option<u64>) -> Result<Value, CliError> {
    let text = match path {
        Some(path) => read_file(path, max_size)?,
        None => read_stdin(max_size)?,
    };
    debug!(bytes = text.len(), source = path.unwrap_or(STDIN), "input read");
    serde_json::from_str(&text).map_err(CliError::InvalidJson)
}

fn read_file(path: &str, max_size: Option<u64>) -> Result<String, CliError> {
    let metadata = std::fs::metadata(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => CliError::NotFound(path.to_string()),
        _ => CliError::Read {
            path: path.to_string(),
            source,
        },
    })?;
    check_size(metadata.len(), max_size)?;
    std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_string(),
        source,
    })
}

fn read_stdin(max_size: Option<u64>) -> Result<String, CliError> {
    read_limited(io::stdin().lock(), max_size).map_err(|err| match err {
        LimitedRead::Io(source) => CliError::Read {
            path: STDIN.to_string(),
            source,
        },
        LimitedRead::TooLarge(err) => err,
    })
}

#[derive(Debug)]
enum LimitedRead {
    Io(io::Error),
    TooLarge(CliError),
}

/// Reads at most `max_size + 1` bytes, so oversized input is never fully buffered.
fn read_limited(reader: impl Read, max_size: Option<u64>) -> Result<String, LimitedRead> {
    let mut bytes = Vec::new();
    let limit = max_size.map_or(u64::MAX, |max| max.saturating_add(1));
    reader
        .take(limit)
        .read_to_end(&mut bytes)
        .map_err(LimitedRead::Io)?;
    check_size(bytes.len() as u64, max_size).map_err(LimitedRead::TooLarge)?;
    String::from_utf8(bytes)
        .map_err(|err| LimitedRead::Io(io::Error::new(io::ErrorKind::InvalidData, err)))
}

fn check_size(size: u64, max_size: Option<u64>) -> Result<(), CliError> {
    match max_size {
        Some(max) if size > max => Err(CliError::TooLarge { size, max }),
        _ => Ok(()),
    }
}
