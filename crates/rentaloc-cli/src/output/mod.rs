pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::{Map, Value};

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Split an object into flattened `a.b.c` scalar fields and the arrays of
/// records it holds (amortization rows), which get their own tables.
pub(crate) fn split_fields(map: &Map<String, Value>) -> (Vec<(String, Value)>, Vec<(String, Vec<Value>)>) {
    let mut fields = Vec::new();
    let mut sections = Vec::new();
    for (key, val) in map {
        collect(key.clone(), val, &mut fields, &mut sections);
    }
    (fields, sections)
}

fn collect(
    path: String,
    value: &Value,
    fields: &mut Vec<(String, Value)>,
    sections: &mut Vec<(String, Vec<Value>)>,
) {
    match value {
        Value::Object(inner) => {
            for (key, val) in inner {
                collect(format!("{path}.{key}"), val, fields, sections);
            }
        }
        Value::Array(items) if !items.is_empty() && items.iter().all(Value::is_object) => {
            sections.push((path, items.clone()));
        }
        _ => fields.push((path, value.clone())),
    }
}

/// Render a scalar for a table cell or CSV field.
pub(crate) fn format_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(arr) => arr.iter().map(format_scalar).collect::<Vec<_>>().join(", "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_split_flattens_nested_and_extracts_rows() {
        let value = json!({
            "summary": {"gross_yield_percent": "9.6"},
            "rows": [{"year": 1}, {"year": 2}],
            "warnings": [],
        });
        let (fields, sections) = split_fields(value.as_object().unwrap());
        assert!(fields.iter().any(|(k, v)| k == "summary.gross_yield_percent" && v == "9.6"));
        assert!(fields.iter().any(|(k, _)| k == "warnings"));
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].0, "rows");
        assert_eq!(sections[0].1.len(), 2);
    }

    #[test]
    fn test_format_scalar() {
        assert_eq!(format_scalar(&json!("463.97")), "463.97");
        assert_eq!(format_scalar(&json!(null)), "");
        assert_eq!(format_scalar(&json!(["a", "b"])), "a, b");
    }
}
