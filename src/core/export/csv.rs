//! CSV serialization of exported rows
//!
//! The header is taken from the first record and every row is written in that
//! column order. Fields are quoted only when they contain a comma, a quote or
//! a line break; embedded quotes are doubled.

use crate::domain::{Record, Result};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use serde_json::Value;

/// Serialize records to UTF-8 CSV
///
/// Returns an empty buffer for an empty slice. A record whose column set
/// differs from the header is written anyway (missing columns empty, extra
/// columns dropped) and logged as a warning.
///
/// # Errors
///
/// Returns a serialization error if the CSV writer fails.
///
/// # Examples
///
/// ```
/// use ferry::core::export::csv::serialize_csv;
/// use serde_json::json;
///
/// let row = json!({"id": 1, "note": "a, b"}).as_object().unwrap().clone();
/// let bytes = serialize_csv(&[row]).unwrap();
/// assert_eq!(String::from_utf8(bytes).unwrap(), "id,note\n1,\"a, b\"\n");
/// ```
pub fn serialize_csv(records: &[Record]) -> Result<Vec<u8>> {
    let Some(first) = records.first() else {
        return Ok(Vec::new());
    };
    let header: Vec<&str> = first.keys().map(String::as_str).collect();

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(&header)?;

    for (index, record) in records.iter().enumerate() {
        if !same_columns(&header, record) {
            tracing::warn!(
                row = index,
                expected = header.len(),
                actual = record.len(),
                "Row shape differs from header; writing header columns only"
            );
        }

        let fields = header
            .iter()
            .map(|column| record.get(*column).map(render_field).unwrap_or_default());
        writer.write_record(fields)?;
    }

    writer
        .into_inner()
        .map_err(|e| crate::domain::FerryError::Serialization(format!("CSV flush failed: {e}")))
}

fn same_columns(header: &[&str], record: &Record) -> bool {
    record.len() == header.len() && header.iter().all(|c| record.contains_key(*c))
}

/// Text form of one field
fn render_field(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        nested @ (Value::Array(_) | Value::Object(_)) => nested.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    fn to_string(records: &[Record]) -> String {
        String::from_utf8(serialize_csv(records).unwrap()).unwrap()
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        assert!(serialize_csv(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_header_follows_first_record_order() {
        let rows = vec![
            record(json!({"zeta": 1, "alpha": "x"})),
            record(json!({"alpha": "y", "zeta": 2})),
        ];
        assert_eq!(to_string(&rows), "zeta,alpha\n1,x\n2,y\n");
    }

    #[test]
    fn test_scalar_rendering() {
        let rows = vec![record(json!({
            "n": null,
            "b": true,
            "i": -3,
            "f": 1.5,
            "tags": ["a", "b"],
            "meta": {"k": 1}
        }))];
        assert_eq!(
            to_string(&rows),
            "n,b,i,f,tags,meta\n,true,-3,1.5,\"[\"\"a\"\",\"\"b\"\"]\",\"{\"\"k\"\":1}\"\n"
        );
    }

    #[test]
    fn test_quoting_special_characters() {
        let rows = vec![record(json!({"v": "say \"hi\", then\nleave"}))];
        assert_eq!(to_string(&rows), "v\n\"say \"\"hi\"\", then\nleave\"\n");
    }

    #[test]
    fn test_heterogeneous_rows_use_header_columns() {
        let rows = vec![
            record(json!({"id": 1, "name": "a"})),
            record(json!({"id": 2, "extra": "dropped"})),
        ];
        assert_eq!(to_string(&rows), "id,name\n1,a\n2,\n");
    }

    #[test]
    fn test_deterministic() {
        let rows = vec![record(json!({"id": 1, "name": "a"}))];
        assert_eq!(serialize_csv(&rows).unwrap(), serialize_csv(&rows).unwrap());
    }
}
