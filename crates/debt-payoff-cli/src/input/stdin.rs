use serde_json::Value;
use std::io::{self, Read};

/// Read a document piped on stdin. JSON is tried first, then YAML, so
/// `payoff snowball < debts.yaml` behaves like `--input debts.yaml`.
/// Returns None when stdin is a terminal or carries nothing.
pub fn read_stdin() -> Result<Option<Value>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    parse_piped(&buffer)
}

fn parse_piped(text: &str) -> Result<Option<Value>, Box<dyn std::error::Error>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    match serde_json::from_str(trimmed) {
        Ok(value) => Ok(Some(value)),
        Err(json_err) => match serde_yaml::from_str::<Value>(trimmed) {
            // A bare scalar means neither parser understood the document.
            Ok(value) if value.is_object() || value.is_array() => Ok(Some(value)),
            _ => Err(json_err.into()),
        },
    }
}
