use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::{flatten, section_headers, section_row};

/// Format output as tables using the tabled crate: one field/value table for
/// the scalar results, then one table per timeline or breakdown.
pub fn print_table(value: &Value) {
    let Value::Object(envelope) = value else {
        println!("{}", value);
        return;
    };

    let result = envelope.get("result").unwrap_or(value);
    let flat = flatten(result);

    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in &flat.rows {
        builder.push_record([key.as_str(), val.as_str()]);
    }
    println!("{}", Table::from(builder));

    for (name, rows) in &flat.sections {
        println!("\n{}:", name);
        print_section(rows);
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_section(rows: &[Value]) {
    let headers = section_headers(rows);
    let mut builder = Builder::default();
    builder.push_record(headers.iter().map(String::as_str));
    for item in rows {
        builder.push_record(section_row(item, &headers));
    }
    println!("{}", Table::from(builder));
}
