use serde_json::{Map, Value};
use std::io;

use super::{format_scalar, split_fields};

type StdoutWriter<'a> = csv::Writer<io::StdoutLock<'a>>;

/// Write output as CSV to stdout. Scalar fields come first as `field,value`
/// pairs; each list of records follows after a blank line with its own
/// header row.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(stdout.lock());

    let written = match value {
        Value::Object(map) => match map.get("result") {
            Some(Value::Object(result)) => write_object(&mut wtr, result),
            _ => write_object(&mut wtr, map),
        },
        Value::Array(arr) => write_records(&mut wtr, arr),
        _ => wtr.write_record([format_scalar(value)]),
    };

    if let Err(e) = written.and_then(|_| wtr.flush().map_err(csv::Error::from)) {
        log::error!("CSV output error: {}", e);
    }
}

fn write_object(wtr: &mut StdoutWriter<'_>, map: &Map<String, Value>) -> csv::Result<()> {
    let (fields, sections) = split_fields(map);

    if !fields.is_empty() {
        wtr.write_record(["field", "value"])?;
        for (key, val) in &fields {
            wtr.write_record([key.as_str(), format_scalar(val).as_str()])?;
        }
    }

    for (_, records) in &sections {
        wtr.write_record([""])?;
        write_records(wtr, records)?;
    }
    Ok(())
}

fn write_records(wtr: &mut StdoutWriter<'_>, arr: &[Value]) -> csv::Result<()> {
    let Some(Value::Object(first)) = arr.first() else {
        for item in arr {
            wtr.write_record([format_scalar(item)])?;
        }
        return Ok(());
    };

    let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
    wtr.write_record(&headers)?;

    for item in arr {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(*h).map(format_scalar).unwrap_or_default())
                .collect();
            wtr.write_record(&row)?;
        }
    }
    Ok(())
}
