use serde_json::Value;

use super::format_value;

/// Print just the key answer value from the output.
///
/// Heuristic: look for well-known result fields (dotted paths) in order of
/// priority, then fall back to the first field in the result object.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let priority_paths = [
        "scenario.months_to_payoff",
        "months_to_payoff",
        "monthly_savings",
        "debt_to_income_percent",
        "label",
    ];

    for path in &priority_paths {
        if let Some(val) = lookup(result_obj, path) {
            if !val.is_null() {
                println!("{}", format_value(val));
                return;
            }
        }
    }

    if let Some((key, val)) = result_obj.as_object().and_then(|m| m.iter().next()) {
        println!("{}: {}", key, format_value(val));
        return;
    }

    println!("{}", format_value(result_obj));
}

fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(value, |v, key| v.get(key))
}
