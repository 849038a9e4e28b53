use serde_json::Value;

use super::format_scalar;

/// Headline figure per command, most specific first.
const PRIORITY_PATHS: [&str; 5] = [
    "summary.net_net_yield_percent",
    "key_results.net_net_yield_percent",
    "gross_yield_percent",
    "monthly_payment",
    "project_name",
];

/// Print just the key answer value from the output.
///
/// Looks up well-known result paths in priority order, then falls back to
/// the first field of the result object.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    for path in PRIORITY_PATHS {
        if let Some(val) = lookup(result_obj, path) {
            if !val.is_null() {
                println!("{}", format_scalar(val));
                return;
            }
        }
    }

    if let Value::Object(map) = result_obj {
        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_scalar(val));
            return;
        }
    }

    println!("{}", format_scalar(result_obj));
}

fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(value, |current, key| current.get(key))
}
