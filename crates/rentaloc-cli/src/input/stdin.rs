use serde::de::DeserializeOwned;
use std::io::{self, Read};

/// Deserialise a JSON record piped on stdin.
///
/// `None` when stdin is a terminal or the pipe carried only whitespace, so
/// callers can fall back to saved projects or profile defaults.
pub fn read_stdin<T: DeserializeOwned>() -> Result<Option<T>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;

    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let record = serde_json::from_str(trimmed)
        .map_err(|e| format!("Failed to parse stdin: {e}"))?;
    log::debug!("read {} bytes of JSON from stdin", trimmed.len());
    Ok(Some(record))
}
