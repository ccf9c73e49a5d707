use serde_json::Value;
use std::io;

use super::{flatten, section_headers, section_row};

/// Write output as CSV to stdout.
///
/// Projections export their month-by-month timeline (the scenario's when
/// both scenario and baseline are present); everything else is written as
/// two-column field/value rows.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let result = value.get("result").unwrap_or(value);
    let flat = flatten(result);

    let timeline = flat
        .sections
        .iter()
        .find(|(name, _)| name == "scenario.timeline")
        .or_else(|| flat.sections.iter().find(|(name, _)| name.ends_with("timeline")));

    match timeline {
        Some((_, rows)) => {
            let headers = section_headers(rows);
            let _ = wtr.write_record(&headers);
            for item in rows {
                let _ = wtr.write_record(section_row(item, &headers));
            }
        }
        None => {
            let _ = wtr.write_record(["field", "value"]);
            for (key, val) in &flat.rows {
                let _ = wtr.write_record([key.as_str(), val.as_str()]);
            }
        }
    }

    let _ = wtr.flush();
}
