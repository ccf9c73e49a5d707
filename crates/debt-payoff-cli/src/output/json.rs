use serde_json::Value;

/// Pretty-print the envelope to stdout. Envelope warnings are also logged so
/// they reach stderr when stdout is piped into another tool.
pub fn print_json(value: &Value) {
    for warning in envelope_warnings(value) {
        log::warn!("{warning}");
    }
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => log::error!("failed to serialise output: {e}"),
    }
}

fn envelope_warnings(value: &Value) -> impl Iterator<Item = &str> {
    value
        .get("warnings")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
}
