pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Scalar fields keyed by dotted path, plus arrays of objects (timelines,
/// breakdowns) pulled out as their own sections.
pub(crate) struct Flattened {
    pub rows: Vec<(String, String)>,
    pub sections: Vec<(String, Vec<Value>)>,
}

pub(crate) fn flatten(value: &Value) -> Flattened {
    let mut flat = Flattened {
        rows: Vec::new(),
        sections: Vec::new(),
    };
    flatten_into(None, value, &mut flat);
    flat
}

fn flatten_into(prefix: Option<&str>, value: &Value, flat: &mut Flattened) {
    let Value::Object(map) = value else {
        flat.rows.push((prefix.unwrap_or("value").to_string(), format_value(value)));
        return;
    };

    for (key, val) in map {
        let path = match prefix {
            Some(p) => format!("{p}.{key}"),
            None => key.clone(),
        };
        match val {
            Value::Object(_) => flatten_into(Some(&path), val, flat),
            Value::Array(arr) if arr.first().is_some_and(Value::is_object) => {
                flat.sections.push((path, arr.clone()));
            }
            _ => flat.rows.push((path, format_value(val))),
        }
    }
}

pub(crate) fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

/// Column headers taken from the first object in a section.
pub(crate) fn section_headers(rows: &[Value]) -> Vec<String> {
    match rows.first() {
        Some(Value::Object(first)) => first.keys().cloned().collect(),
        _ => Vec::new(),
    }
}

pub(crate) fn section_row(item: &Value, headers: &[String]) -> Vec<String> {
    headers
        .iter()
        .map(|h| item.get(h.as_str()).map(format_value).unwrap_or_default())
        .collect()
}
